//! Per-frame simulation step
//!
//! One call advances the run by exactly one frame at the fixed tick rate.
//! The loop owns all live entities for the duration of the call; there is
//! no mutation from anywhere else.

use rand::Rng;

use crate::consts::*;
use crate::sim::combat::{
    advance_lasers_vs_target, advance_player_lasers, apply_player_input, resolve_enemy_contacts,
};
use crate::sim::state::{GameEvent, GamePhase, GameState};
use crate::sim::wave::replenish_wave;

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    /// Demo mode: the sim steers and fires by itself
    pub autopilot: bool,
}

/// Advance the run by one frame.
///
/// Running frames apply input, move enemies and projectiles, resolve
/// collisions and replenish the wave. Once the run is lost, gameplay
/// freezes and only the grace counter advances until the run ends.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::Running && state.player.is_defeated() {
        end_run(state);
    }

    match state.phase {
        GamePhase::Ended => return,
        GamePhase::Ending => {
            // Frozen frame: the counter runs regardless of input, nothing
            // else moves.
            state.grace_ticks += 1;
            if state.grace_ticks > GRACE_TICKS {
                state.phase = GamePhase::Ended;
                state.events.push(GameEvent::RunEnded);
                log::info!(
                    "run ended: score {} (best {})",
                    state.player.score,
                    state.best_score
                );
            }
            return;
        }
        GamePhase::Running => {}
    }

    state.time_ticks += 1;

    let input = if input.autopilot {
        autopilot(state)
    } else {
        input.clone()
    };
    apply_player_input(&mut state.player, &input, &mut state.events);

    // Enemy descent and randomized fire attempts, independent per enemy.
    for enemy in &mut state.enemies {
        enemy.descend(ENEMY_SPEED);
        if state.rng.random_range(0..ENEMY_FIRE_ODDS) == 0 {
            enemy.ship.try_fire(enemy.variant.laser_offset());
        }
    }

    // Body contact before bottom-exit; a removed enemy takes its
    // in-flight bolts with it.
    resolve_enemy_contacts(&mut state.enemies, &mut state.player, &mut state.events);

    // Projectile motion and hits, both sides.
    for enemy in &mut state.enemies {
        advance_lasers_vs_target(
            &mut enemy.ship,
            LASER_SPEED,
            &mut state.player.ship,
            &mut state.events,
        );
    }
    advance_player_lasers(
        &mut state.player,
        LASER_SPEED,
        &mut state.enemies,
        &mut state.events,
    );

    if state.enemies.is_empty() {
        replenish_wave(state);
    }
}

/// First frame of a lost run: decide the record outcome and start the
/// grace period. The caller persists the new best on the event.
fn end_run(state: &mut GameState) {
    state.phase = GamePhase::Ending;
    state.grace_ticks = 0;
    let score = state.player.score;
    if score > state.best_score {
        state.new_record = true;
        state.events.push(GameEvent::NewRecord { score });
        log::info!("new record: {} beats {}", score, state.best_score);
    } else {
        state.events.push(GameEvent::GameOver { score });
    }
}

/// Demo steering: chase the column of the lowest enemy and hold fire.
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput {
        fire: true,
        ..TickInput::default()
    };
    let target = state.enemies.iter().max_by(|a, b| {
        a.ship
            .pos
            .y
            .partial_cmp(&b.ship.pos.y)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    if let Some(enemy) = target {
        let enemy_center = enemy.ship.pos.x + enemy.ship.width() / 2.0;
        let player_center = state.player.ship.pos.x + state.player.ship.width() / 2.0;
        if enemy_center < player_center - PLAYER_SPEED {
            input.left = true;
        } else if enemy_center > player_center + PLAYER_SPEED {
            input.right = true;
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, EnemyVariant};
    use glam::Vec2;

    fn running_state() -> GameState {
        GameState::new(1, 0)
    }

    #[test]
    fn empty_field_replenishes_at_end_of_frame() {
        let mut state = running_state();
        assert!(state.enemies.is_empty());
        tick(&mut state, &TickInput::default());
        assert_eq!(
            state.enemies.len() as u32,
            INITIAL_WAVE_LENGTH + WAVE_INCREMENT
        );
        assert_eq!(state.player.level, 1);
    }

    #[test]
    fn tenth_hit_of_ten_damage_triggers_ending() {
        let mut state = running_state();
        for hit in 1..=10 {
            state.player.ship.health -= 10;
            tick(&mut state, &TickInput::default());
            if hit < 10 {
                assert_eq!(state.phase, GamePhase::Running, "hit {hit}");
            } else {
                assert_eq!(state.phase, GamePhase::Ending);
            }
        }
        // Lives were never touched; health alone ended the run.
        assert_eq!(state.player.lives, PLAYER_START_LIVES);
    }

    #[test]
    fn losing_all_lives_triggers_ending() {
        let mut state = running_state();
        state.player.lives = 0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Ending);
    }

    #[test]
    fn gameplay_freezes_during_grace_period() {
        let mut state = running_state();
        tick(&mut state, &TickInput::default());
        state.player.ship.health = 0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Ending);

        let score = state.player.score;
        let ticks = state.time_ticks;
        let positions: Vec<Vec2> = state.enemies.iter().map(|e| e.ship.pos).collect();
        let input = TickInput {
            fire: true,
            left: true,
            ..TickInput::default()
        };
        for _ in 0..50 {
            tick(&mut state, &input);
        }
        assert_eq!(state.player.score, score);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(
            state.enemies.iter().map(|e| e.ship.pos).collect::<Vec<_>>(),
            positions
        );
        assert!(state.player.ship.lasers.is_empty());
    }

    #[test]
    fn grace_period_lasts_three_seconds_of_frames() {
        let mut state = running_state();
        state.player.ship.health = 0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.grace_ticks, 1);
        for _ in 0..GRACE_TICKS - 1 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.phase, GamePhase::Ending);
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Ended);
        assert!(state.drain_events().contains(&GameEvent::RunEnded));
        // Further ticks are no-ops.
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Ended);
        assert!(state.events.is_empty());
    }

    #[test]
    fn beating_the_best_score_emits_new_record() {
        let mut state = GameState::new(1, 150);
        state.player.score = 300;
        state.player.ship.health = 0;
        tick(&mut state, &TickInput::default());
        assert!(state.new_record);
        assert!(state
            .drain_events()
            .contains(&GameEvent::NewRecord { score: 300 }));
    }

    #[test]
    fn matching_the_best_score_is_not_a_record() {
        let mut state = GameState::new(1, 300);
        state.player.score = 300;
        state.player.ship.health = 0;
        tick(&mut state, &TickInput::default());
        assert!(!state.new_record);
        assert!(state
            .drain_events()
            .contains(&GameEvent::GameOver { score: 300 }));
    }

    #[test]
    fn score_is_monotonic_and_pays_per_kill() {
        let mut state = running_state();
        let input = TickInput {
            autopilot: true,
            ..TickInput::default()
        };
        let mut last_score = 0;
        let mut kills = 0;
        for _ in 0..2000 {
            tick(&mut state, &input);
            for event in state.drain_events() {
                if event == GameEvent::EnemyKilled {
                    kills += 1;
                }
            }
            assert!(state.player.score >= last_score);
            last_score = state.player.score;
            if state.phase != GamePhase::Running {
                break;
            }
        }
        assert_eq!(state.player.score, kills * KILL_SCORE);
    }

    #[test]
    fn defeated_enemy_takes_its_bolts_along() {
        let mut state = running_state();
        // Park an enemy on the player with a bolt in flight.
        let mut enemy = Enemy::new(state.player.ship.pos, EnemyVariant::Red);
        enemy.ship.try_fire(0.0);
        state.enemies.push(enemy);
        tick(&mut state, &TickInput::default());
        assert!(state
            .drain_events()
            .contains(&GameEvent::Explosion));
        // The rammer is gone and no enemy bolt survived it; the next wave
        // spawned fresh.
        assert!(state
            .enemies
            .iter()
            .all(|enemy| enemy.ship.lasers.is_empty()));
    }
}
