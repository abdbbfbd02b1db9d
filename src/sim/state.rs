//! Run state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::mask::{sprites_overlap, SpriteKind};
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Loss detected; gameplay frozen while the grace period elapses
    Ending,
    /// Run finished, control returns to the caller
    Ended,
}

/// Events emitted by the simulation for the presentation layer.
/// Fire-and-forget: the sim never waits on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Fire key pressed (cue plays even when the cooldown blocks the shot)
    Shoot,
    /// Enemy laser struck the player
    LaserImpact,
    /// Enemy rammed the player
    Explosion,
    /// Player laser destroyed an enemy
    EnemyKilled,
    /// Enemy escaped past the bottom edge
    EnemyDespawned,
    /// Wave replenished
    LevelUp { level: u32 },
    /// Run lost without beating the best score
    GameOver { score: u64 },
    /// Run lost with a new best score; the caller persists it
    NewRecord { score: u64 },
    /// Grace period elapsed, the run is over
    RunEnded,
}

/// A moving, expiring laser bolt. Owned by exactly one combatant's
/// collection; the sign of the per-frame velocity encodes direction.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub sprite: SpriteKind,
}

impl Projectile {
    pub fn new(pos: Vec2, sprite: SpriteKind) -> Self {
        Self { pos, sprite }
    }

    /// Vertical move; enemy bolts pass positive, player bolts negative.
    pub fn advance(&mut self, dy: f32) {
        self.pos.y += dy;
    }

    /// True once the bolt's origin leaves [0, bound] vertically.
    pub fn off_playfield(&self, bound: f32) -> bool {
        !(0.0..=bound).contains(&self.pos.y)
    }

    /// Mask-accurate hit test against another positioned sprite.
    pub fn hits(&self, sprite: SpriteKind, pos: Vec2) -> bool {
        sprites_overlap(self.sprite, self.pos, sprite, pos)
    }
}

/// Shared combatant state: position, health, fire cooldown, and the owned
/// projectile collection. Player- and enemy-specific behavior wraps this
/// instead of inheriting from it.
#[derive(Debug, Clone)]
pub struct ShipCore {
    pub pos: Vec2,
    pub health: i32,
    /// 0 means ready to fire; counts frames while > 0
    pub cooldown: u32,
    pub sprite: SpriteKind,
    pub laser_sprite: SpriteKind,
    pub lasers: Vec<Projectile>,
}

impl ShipCore {
    pub fn new(pos: Vec2, health: i32, sprite: SpriteKind, laser_sprite: SpriteKind) -> Self {
        Self {
            pos,
            health,
            cooldown: 0,
            sprite,
            laser_sprite,
            lasers: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.sprite.width()
    }

    pub fn height(&self) -> f32 {
        self.sprite.height()
    }

    /// Advance the cooldown counter once per frame: a counter at the
    /// threshold wraps to 0 (ready), a running counter keeps counting.
    pub fn step_cooldown(&mut self) {
        if self.cooldown >= COOLDOWN_FRAMES {
            self.cooldown = 0;
        } else if self.cooldown > 0 {
            self.cooldown += 1;
        }
    }

    /// Fire if the cooldown allows it. The bolt spawns at the ship's
    /// vertical position, shifted by the sprite-dependent offset.
    /// Returns whether a bolt was created.
    pub fn try_fire(&mut self, offset_x: f32) -> bool {
        if self.cooldown != 0 {
            return false;
        }
        self.lasers.push(Projectile::new(
            Vec2::new(self.pos.x + offset_x, self.pos.y),
            self.laser_sprite,
        ));
        self.cooldown = 1;
        true
    }

    /// Body-vs-body mask overlap.
    pub fn overlaps(&self, other: &ShipCore) -> bool {
        sprites_overlap(self.sprite, self.pos, other.sprite, other.pos)
    }
}

/// The player's ship plus run progression
#[derive(Debug, Clone)]
pub struct Player {
    pub ship: ShipCore,
    pub lives: i32,
    pub score: u64,
    pub level: u32,
    pub max_health: i32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            ship: ShipCore::new(
                Vec2::new(PLAYER_START_X, PLAYER_START_Y),
                PLAYER_START_HEALTH,
                SpriteKind::PlayerShip,
                SpriteKind::PlayerLaser,
            ),
            lives: PLAYER_START_LIVES,
            score: 0,
            level: 0,
            max_health: PLAYER_START_HEALTH,
        }
    }

    /// Horizontal bolt spawn offset centering the bolt under the nose.
    pub fn laser_offset(&self) -> f32 {
        (self.ship.width() - self.ship.laser_sprite.width()) / 2.0
    }

    /// The run is lost once either pool is exhausted. The player object
    /// itself survives for the overlay rendering.
    pub fn is_defeated(&self) -> bool {
        self.lives <= 0 || self.ship.health <= 0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Enemy visual/behavioral class. Chosen at spawn, immutable after; selects
/// sprites and the bolt spawn offset only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyVariant {
    Red,
    Green,
    Blue,
}

impl EnemyVariant {
    pub fn ship_sprite(self) -> SpriteKind {
        match self {
            EnemyVariant::Red => SpriteKind::RedShip,
            EnemyVariant::Green => SpriteKind::GreenShip,
            EnemyVariant::Blue => SpriteKind::BlueShip,
        }
    }

    pub fn laser_sprite(self) -> SpriteKind {
        match self {
            EnemyVariant::Red => SpriteKind::RedLaser,
            EnemyVariant::Green => SpriteKind::GreenLaser,
            EnemyVariant::Blue => SpriteKind::BlueLaser,
        }
    }

    /// Bolt spawn offset from the ship origin. Blue's wider hull takes
    /// the larger shift to keep the bolt under the nose.
    pub fn laser_offset(self) -> f32 {
        match self {
            EnemyVariant::Red | EnemyVariant::Green => 5.0,
            EnemyVariant::Blue => 6.0,
        }
    }
}

/// A descending enemy ship
#[derive(Debug, Clone)]
pub struct Enemy {
    pub ship: ShipCore,
    pub variant: EnemyVariant,
}

impl Enemy {
    pub fn new(pos: Vec2, variant: EnemyVariant) -> Self {
        Self {
            ship: ShipCore::new(pos, 100, variant.ship_sprite(), variant.laser_sprite()),
            variant,
        }
    }

    /// Unconditional downward movement, once per frame.
    pub fn descend(&mut self, velocity: f32) {
        self.ship.pos.y += velocity;
    }

    /// True once the hull's bottom edge passes the playfield bound.
    pub fn past_bottom(&self, bound: f32) -> bool {
        self.ship.pos.y + self.ship.height() > bound
    }
}

/// Complete run state. All live entities are owned here exclusively; the
/// tick function is the only mutator.
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Size of the next wave before its increment is applied
    pub wave_length: u32,
    pub phase: GamePhase,
    /// Frames elapsed since the loss was detected
    pub grace_ticks: u32,
    /// Best score read once at run start
    pub best_score: u64,
    /// Set when this run beat `best_score`
    pub new_record: bool,
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    /// Events accumulated this frame, drained by the caller
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, best_score: u64) -> Self {
        Self {
            seed,
            player: Player::new(),
            enemies: Vec::new(),
            wave_length: INITIAL_WAVE_LENGTH,
            phase: GamePhase::Running,
            grace_ticks: 0,
            best_score,
            new_record: false,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Hand this frame's events to the presentation layer.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
