//! Wave replenishment
//!
//! The sole population-growth mechanism: when the live set empties, the
//! next, larger wave spawns above the visible playfield with staggered
//! entry heights. Difficulty is unbounded and monotonic.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::sim::state::{Enemy, EnemyVariant, GameEvent, GameState};

/// Spawn the next wave: bump the level and wave size, then place
/// `wave_length` enemies at uniformly random positions and variants.
pub fn replenish_wave(state: &mut GameState) {
    state.player.level += 1;
    state.wave_length += WAVE_INCREMENT;
    for _ in 0..state.wave_length {
        let x = state.rng.random_range(SPAWN_X_MIN..SPAWN_X_MAX);
        let y = state.rng.random_range(SPAWN_Y_MIN..SPAWN_Y_MAX);
        let variant = match state.rng.random_range(0..3) {
            0 => EnemyVariant::Red,
            1 => EnemyVariant::Green,
            _ => EnemyVariant::Blue,
        };
        state.enemies.push(Enemy::new(Vec2::new(x, y), variant));
    }
    state.events.push(GameEvent::LevelUp {
        level: state.player.level,
    });
    log::info!(
        "wave {} spawned: {} enemies",
        state.player.level,
        state.wave_length
    );
}
