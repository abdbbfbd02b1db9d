//! Combat resolution: firing, projectile motion, and collision outcomes
//!
//! Every pass that can remove entities rebuilds the surviving collection
//! instead of removing in place mid-iteration, so a removal never skips
//! the element after it within the same frame. Removals are idempotent:
//! an entity flagged twice in one frame is dropped once.

use crate::consts::*;
use crate::sim::state::{Enemy, GameEvent, Player, ShipCore};
use crate::sim::tick::TickInput;

/// Apply directional input and firing for the player. Each direction is
/// clamped independently so the hull never leaves the playfield; the
/// bottom margin stays reserved for the health bar.
pub fn apply_player_input(player: &mut Player, input: &TickInput, events: &mut Vec<GameEvent>) {
    let ship = &mut player.ship;
    if input.left && ship.pos.x - PLAYER_SPEED > 0.0 {
        ship.pos.x -= PLAYER_SPEED;
    }
    if input.right && ship.pos.x + PLAYER_SPEED + ship.width() < PLAYFIELD_W {
        ship.pos.x += PLAYER_SPEED;
    }
    if input.up && ship.pos.y - PLAYER_SPEED > 0.0 {
        ship.pos.y -= PLAYER_SPEED;
    }
    if input.down && ship.pos.y + PLAYER_SPEED + ship.height() + HEALTH_BAR_MARGIN < PLAYFIELD_H {
        ship.pos.y += PLAYER_SPEED;
    }
    if input.fire {
        // The cue plays on the press even when the cooldown blocks the
        // shot, matching the cabinet feel.
        events.push(GameEvent::Shoot);
        let offset = player.laser_offset();
        player.ship.try_fire(offset);
    }
}

/// Resolve enemy-vs-player body contact and bottom-edge escapes. Contact
/// is checked first, so an enemy triggers at most one of the two outcomes
/// per frame.
pub fn resolve_enemy_contacts(
    enemies: &mut Vec<Enemy>,
    player: &mut Player,
    events: &mut Vec<GameEvent>,
) {
    enemies.retain(|enemy| {
        if enemy.ship.overlaps(&player.ship) {
            player.ship.health -= COLLISION_DAMAGE;
            events.push(GameEvent::Explosion);
            false
        } else if enemy.past_bottom(PLAYFIELD_H) {
            player.lives -= 1;
            events.push(GameEvent::EnemyDespawned);
            false
        } else {
            true
        }
    });
}

/// Advance one combatant's bolts downward against a single target.
/// Steps the shooter's cooldown once, then rebuilds the bolt collection:
/// off-playfield bolts expire, hits damage the target and expire.
pub fn advance_lasers_vs_target(
    shooter: &mut ShipCore,
    velocity: f32,
    target: &mut ShipCore,
    events: &mut Vec<GameEvent>,
) {
    shooter.step_cooldown();
    let lasers = std::mem::take(&mut shooter.lasers);
    shooter.lasers = lasers
        .into_iter()
        .filter_map(|mut laser| {
            laser.advance(velocity);
            if laser.off_playfield(PLAYFIELD_H) {
                return None;
            }
            if laser.hits(target.sprite, target.pos) {
                target.health -= LASER_DAMAGE;
                events.push(GameEvent::LaserImpact);
                return None;
            }
            Some(laser)
        })
        .collect();
}

/// Player variant: bolts travel upward and are tested against every live
/// enemy. The first enemy hit is removed and scored; a bolt removes at
/// most one enemy, then expires itself.
pub fn advance_player_lasers(
    player: &mut Player,
    velocity: f32,
    enemies: &mut Vec<Enemy>,
    events: &mut Vec<GameEvent>,
) {
    player.ship.step_cooldown();
    let lasers = std::mem::take(&mut player.ship.lasers);
    player.ship.lasers = lasers
        .into_iter()
        .filter_map(|mut laser| {
            laser.advance(-velocity);
            if laser.off_playfield(PLAYFIELD_H) {
                return None;
            }
            if let Some(hit) = enemies
                .iter()
                .position(|enemy| laser.hits(enemy.ship.sprite, enemy.ship.pos))
            {
                enemies.remove(hit);
                player.score += KILL_SCORE;
                events.push(GameEvent::EnemyKilled);
                return None;
            }
            Some(laser)
        })
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyVariant;
    use glam::Vec2;

    fn player_at(pos: Vec2) -> Player {
        let mut player = Player::new();
        player.ship.pos = pos;
        player
    }

    fn far_target() -> ShipCore {
        let mut player = Player::new();
        player.ship.pos = Vec2::new(-500.0, -500.0);
        player.ship
    }

    #[test]
    fn cooldown_blocks_until_exactly_threshold_frames() {
        let mut enemy = Enemy::new(Vec2::new(100.0, 100.0), EnemyVariant::Red);
        assert!(enemy.ship.try_fire(0.0));
        for _ in 0..COOLDOWN_FRAMES {
            assert!(!enemy.ship.try_fire(0.0));
            enemy.ship.step_cooldown();
        }
        assert!(enemy.ship.try_fire(0.0));
        assert_eq!(enemy.ship.lasers.len(), 2);
    }

    #[test]
    fn bolt_expires_the_frame_it_leaves_the_playfield() {
        // A player bolt at y=20 moving 4 px/frame: y=0 on frame 5 is still
        // on-field, y=-4 on frame 6 expires it.
        let mut player = player_at(Vec2::new(300.0, 300.0));
        player.ship.lasers.push(crate::sim::state::Projectile::new(
            Vec2::new(300.0, 20.0),
            player.ship.laser_sprite,
        ));
        let mut enemies = Vec::new();
        let mut events = Vec::new();
        for _ in 0..5 {
            advance_player_lasers(&mut player, LASER_SPEED, &mut enemies, &mut events);
            assert_eq!(player.ship.lasers.len(), 1);
        }
        advance_player_lasers(&mut player, LASER_SPEED, &mut enemies, &mut events);
        assert!(player.ship.lasers.is_empty());
    }

    #[test]
    fn enemy_bolt_damages_player_and_expires() {
        let mut enemy = Enemy::new(Vec2::new(325.0, 500.0), EnemyVariant::Green);
        let mut player = player_at(Vec2::new(325.0, 550.0));
        enemy.ship.try_fire(enemy.variant.laser_offset());
        let mut events = Vec::new();
        let mut frames = 0;
        while !enemy.ship.lasers.is_empty() {
            advance_lasers_vs_target(
                &mut enemy.ship,
                LASER_SPEED,
                &mut player.ship,
                &mut events,
            );
            frames += 1;
            assert!(frames < 100, "bolt never resolved");
        }
        assert_eq!(player.ship.health, PLAYER_START_HEALTH - LASER_DAMAGE);
        assert!(events.contains(&GameEvent::LaserImpact));
    }

    #[test]
    fn one_bolt_removes_at_most_one_enemy() {
        // Two enemies stacked on the same spot; a single bolt passes
        // through their shared footprint.
        let spot = Vec2::new(300.0, 290.0);
        let mut enemies = vec![
            Enemy::new(spot, EnemyVariant::Red),
            Enemy::new(spot, EnemyVariant::Red),
        ];
        let mut player = player_at(Vec2::new(300.0, 400.0));
        player.ship.lasers.push(crate::sim::state::Projectile::new(
            Vec2::new(305.0, 300.0),
            player.ship.laser_sprite,
        ));
        let mut events = Vec::new();
        advance_player_lasers(&mut player, LASER_SPEED, &mut enemies, &mut events);
        assert_eq!(enemies.len(), 1);
        assert_eq!(player.score, KILL_SCORE);
        assert!(player.ship.lasers.is_empty());
        assert_eq!(events, vec![GameEvent::EnemyKilled]);
    }

    #[test]
    fn bolt_after_a_hit_is_still_evaluated_same_frame() {
        // Two bolts in the collection; the first one hits. The rebuild
        // must still advance and evaluate the second.
        let mut player = player_at(Vec2::new(300.0, 400.0));
        let mut enemies = vec![Enemy::new(Vec2::new(300.0, 290.0), EnemyVariant::Blue)];
        player.ship.lasers.push(crate::sim::state::Projectile::new(
            Vec2::new(305.0, 300.0),
            player.ship.laser_sprite,
        ));
        player.ship.lasers.push(crate::sim::state::Projectile::new(
            Vec2::new(100.0, 300.0),
            player.ship.laser_sprite,
        ));
        let mut events = Vec::new();
        advance_player_lasers(&mut player, LASER_SPEED, &mut enemies, &mut events);
        assert!(enemies.is_empty());
        assert_eq!(player.ship.lasers.len(), 1);
        // The surviving bolt advanced this frame too.
        assert_eq!(player.ship.lasers[0].pos.y, 300.0 - LASER_SPEED);
    }

    #[test]
    fn contact_outcome_wins_over_bottom_exit() {
        // An enemy that both touches the player and pokes past the bottom
        // edge resolves as a collision, not an escape.
        let mut player = player_at(Vec2::new(325.0, 737.0));
        let mut enemies = vec![Enemy::new(Vec2::new(325.0, 744.0), EnemyVariant::Red)];
        assert!(enemies[0].past_bottom(PLAYFIELD_H));
        assert!(enemies[0].ship.overlaps(&player.ship));
        let mut events = Vec::new();
        resolve_enemy_contacts(&mut enemies, &mut player, &mut events);
        assert!(enemies.is_empty());
        assert_eq!(player.ship.health, PLAYER_START_HEALTH - COLLISION_DAMAGE);
        assert_eq!(player.lives, PLAYER_START_LIVES);
        assert_eq!(events, vec![GameEvent::Explosion]);
    }

    #[test]
    fn bottom_exit_costs_a_life() {
        let mut player = player_at(Vec2::new(50.0, 300.0));
        let mut enemies = vec![Enemy::new(Vec2::new(600.0, 745.0), EnemyVariant::Green)];
        let mut events = Vec::new();
        resolve_enemy_contacts(&mut enemies, &mut player, &mut events);
        assert!(enemies.is_empty());
        assert_eq!(player.lives, PLAYER_START_LIVES - 1);
        assert_eq!(player.ship.health, PLAYER_START_HEALTH);
        assert_eq!(events, vec![GameEvent::EnemyDespawned]);
    }

    #[test]
    fn movement_clamps_at_playfield_edges() {
        let mut player = Player::new();
        player.ship.pos = Vec2::new(2.0, 2.0);
        let mut events = Vec::new();
        let input = TickInput {
            left: true,
            up: true,
            ..TickInput::default()
        };
        apply_player_input(&mut player, &input, &mut events);
        assert_eq!(player.ship.pos, Vec2::new(2.0, 2.0));

        player.ship.pos = Vec2::new(
            PLAYFIELD_W - player.ship.width() - 2.0,
            PLAYFIELD_H - player.ship.height() - HEALTH_BAR_MARGIN - 2.0,
        );
        let start = player.ship.pos;
        let input = TickInput {
            right: true,
            down: true,
            ..TickInput::default()
        };
        apply_player_input(&mut player, &input, &mut events);
        assert_eq!(player.ship.pos, start);
    }

    #[test]
    fn fire_cue_plays_even_when_cooldown_blocks() {
        let mut player = Player::new();
        let mut events = Vec::new();
        let input = TickInput {
            fire: true,
            ..TickInput::default()
        };
        apply_player_input(&mut player, &input, &mut events);
        apply_player_input(&mut player, &input, &mut events);
        assert_eq!(player.ship.lasers.len(), 1);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::Shoot).count(),
            2
        );
    }

    #[test]
    fn distant_bolt_misses_far_target() {
        let mut enemy = Enemy::new(Vec2::new(100.0, 100.0), EnemyVariant::Red);
        enemy.ship.try_fire(0.0);
        let mut target = far_target();
        let mut events = Vec::new();
        advance_lasers_vs_target(&mut enemy.ship, LASER_SPEED, &mut target, &mut events);
        assert_eq!(enemy.ship.lasers.len(), 1);
        assert!(events.is_empty());
    }
}
