//! Retro Blitz - a top-down wave shooter
//!
//! Core modules:
//! - `sim`: fixed-timestep simulation (entities, collisions, run state)
//! - `render`: draw-command builder consumed by a pluggable canvas
//! - `audio`: sound cue dispatch behind a pluggable sink
//! - `scores`: best-score file persistence
//! - `runner`: frame loop wiring collaborators to the sim

pub mod audio;
pub mod render;
pub mod runner;
pub mod scores;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions in pixels
    pub const PLAYFIELD_W: f32 = 750.0;
    pub const PLAYFIELD_H: f32 = 750.0;

    /// Fixed tick rate (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;

    /// Player spawn position and stats
    pub const PLAYER_START_X: f32 = 325.0;
    pub const PLAYER_START_Y: f32 = 625.0;
    pub const PLAYER_START_HEALTH: i32 = 100;
    pub const PLAYER_START_LIVES: i32 = 5;

    /// Per-frame movement in pixels
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const ENEMY_SPEED: f32 = 1.0;
    pub const LASER_SPEED: f32 = 4.0;

    /// Frames a combatant must wait between shots
    pub const COOLDOWN_FRAMES: u32 = 30;
    /// Damage applied by a laser hit
    pub const LASER_DAMAGE: i32 = 10;
    /// Damage applied by an enemy ramming the player
    pub const COLLISION_DAMAGE: i32 = 10;
    /// Score awarded per enemy destroyed
    pub const KILL_SCORE: u64 = 100;

    /// Wave sizing: each replenishment grows the wave by the increment
    pub const INITIAL_WAVE_LENGTH: u32 = 5;
    pub const WAVE_INCREMENT: u32 = 5;

    /// Enemy spawn band: uniform x inside the playfield, staggered above it
    pub const SPAWN_X_MIN: f32 = 50.0;
    pub const SPAWN_X_MAX: f32 = PLAYFIELD_W - 100.0;
    pub const SPAWN_Y_MIN: f32 = -1500.0;
    pub const SPAWN_Y_MAX: f32 = -100.0;

    /// One-in-N chance per enemy per frame to attempt a shot
    pub const ENEMY_FIRE_ODDS: u32 = 120;

    /// Bottom rows reserved for the health bar; the ship cannot enter them
    pub const HEALTH_BAR_MARGIN: f32 = 30.0;

    /// Frames of frozen gameplay after a loss before the run ends (3 s)
    pub const GRACE_TICKS: u32 = TICK_RATE * 3;
}
