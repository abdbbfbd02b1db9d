//! Draw-command builder
//!
//! The core issues draw calls; it never touches a real surface. Each frame
//! `draw_frame` flattens the run state into an ordered command list and a
//! `Canvas` implementation presents it however it likes.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GamePhase, GameState, SpriteKind};

pub type Color = [u8; 3];

pub const WHITE: Color = [255, 255, 255];
pub const RED: Color = [255, 0, 0];
pub const GREEN: Color = [0, 255, 0];
pub const GOLD: Color = [255, 247, 0];

/// A single presentation instruction, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Blit a sprite with its top-left corner at `pos`
    Sprite { sprite: SpriteKind, pos: Vec2 },
    /// Filled rectangle
    Rect { pos: Vec2, size: Vec2, color: Color },
    /// Text run; `size` is the font size in points
    Text {
        text: String,
        pos: Vec2,
        size: u32,
        color: Color,
    },
}

/// Rendering collaborator: consumes one frame's command list.
pub trait Canvas {
    fn present(&mut self, frame: &[DrawCmd]);
}

/// Canvas for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn present(&mut self, _frame: &[DrawCmd]) {}
}

/// Build the frame: HUD, enemies and their bolts, the player ship with
/// its bolts and health bar, and the loss overlay once the run is lost.
pub fn draw_frame(state: &GameState) -> Vec<DrawCmd> {
    let mut frame = Vec::new();

    hud(state, &mut frame);

    for enemy in &state.enemies {
        frame.push(DrawCmd::Sprite {
            sprite: enemy.ship.sprite,
            pos: enemy.ship.pos,
        });
        for laser in &enemy.ship.lasers {
            frame.push(DrawCmd::Sprite {
                sprite: laser.sprite,
                pos: laser.pos,
            });
        }
    }

    let ship = &state.player.ship;
    frame.push(DrawCmd::Sprite {
        sprite: ship.sprite,
        pos: ship.pos,
    });
    for laser in &ship.lasers {
        frame.push(DrawCmd::Sprite {
            sprite: laser.sprite,
            pos: laser.pos,
        });
    }
    health_bar(state, &mut frame);

    if state.phase != GamePhase::Running {
        loss_overlay(state, &mut frame);
    }

    frame
}

fn hud(state: &GameState, frame: &mut Vec<DrawCmd>) {
    frame.push(DrawCmd::Text {
        text: format!("Score: {}", state.player.score),
        pos: Vec2::new(PLAYFIELD_W / 2.0, 10.0),
        size: 15,
        color: WHITE,
    });
    frame.push(DrawCmd::Text {
        text: format!("Best score: {}", state.best_score),
        pos: Vec2::new(PLAYFIELD_W / 2.0, 30.0),
        size: 15,
        color: WHITE,
    });
    frame.push(DrawCmd::Text {
        text: format!("Lives: {}", state.player.lives),
        pos: Vec2::new(10.0, 10.0),
        size: 18,
        color: WHITE,
    });
    frame.push(DrawCmd::Text {
        text: format!("Level: {}", state.player.level),
        pos: Vec2::new(PLAYFIELD_W - 110.0, 10.0),
        size: 18,
        color: WHITE,
    });
}

/// Red background bar with a green foreground proportional to health.
fn health_bar(state: &GameState, frame: &mut Vec<DrawCmd>) {
    let ship = &state.player.ship;
    let bar_pos = Vec2::new(ship.pos.x, ship.pos.y + ship.height() + 10.0);
    let bar_w = ship.width();
    frame.push(DrawCmd::Rect {
        pos: bar_pos,
        size: Vec2::new(bar_w, 10.0),
        color: RED,
    });
    let ratio = ship.health.max(0) as f32 / state.player.max_health as f32;
    frame.push(DrawCmd::Rect {
        pos: bar_pos,
        size: Vec2::new((bar_w * ratio).round(), 10.0),
        color: GREEN,
    });
}

fn loss_overlay(state: &GameState, frame: &mut Vec<DrawCmd>) {
    frame.push(DrawCmd::Text {
        text: "Game Over !!!".into(),
        pos: Vec2::new(PLAYFIELD_W / 2.0, PLAYFIELD_H / 2.5),
        size: 45,
        color: WHITE,
    });
    frame.push(DrawCmd::Text {
        text: format!("Score: {}", state.player.score),
        pos: Vec2::new(PLAYFIELD_W / 2.0, PLAYFIELD_H / 1.7),
        size: 45,
        color: WHITE,
    });
    if state.new_record {
        frame.push(DrawCmd::Text {
            text: "NEW RECORDS !!!".into(),
            pos: Vec2::new(PLAYFIELD_W / 2.0, PLAYFIELD_H / 1.5),
            size: 45,
            color: GOLD,
        });
    }
}
