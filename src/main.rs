//! Retro Blitz entry point
//!
//! Runs a headless autopilot demo: the sim plays itself for a bounded
//! number of frames against null presentation collaborators. Wire a real
//! `Canvas`, `AudioSink` and `InputSource` here to make it playable.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use retro_blitz::audio::NullAudio;
use retro_blitz::render::NullCanvas;
use retro_blitz::runner::{default_frame_budget, run_game, InputSnapshot, InputSource};
use retro_blitz::scores;
use retro_blitz::settings::{Settings, DEFAULT_SETTINGS_FILE};
use retro_blitz::sim::{GameState, TickInput};

/// Autopilot that gives up after a fixed number of frames.
struct DemoInput {
    frames_left: u32,
}

impl InputSource for DemoInput {
    fn poll(&mut self) -> InputSnapshot {
        if self.frames_left == 0 {
            return InputSnapshot {
                quit: true,
                ..InputSnapshot::default()
            };
        }
        self.frames_left -= 1;
        InputSnapshot {
            input: TickInput {
                autopilot: true,
                ..TickInput::default()
            },
            quit: false,
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Retro Blitz starting");

    let settings = Settings::load(Path::new(DEFAULT_SETTINGS_FILE));
    log::debug!("settings: {settings:?}");

    let score_path = Path::new(scores::DEFAULT_SCORE_FILE);
    let best_score = scores::read_best(score_path);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    log::info!("seed {seed}, best score {best_score}");

    let mut state = GameState::new(seed, best_score);
    let mut input = DemoInput { frames_left: 3600 };
    let outcome = run_game(
        &mut state,
        &mut NullCanvas,
        &mut NullAudio,
        &mut input,
        score_path,
        default_frame_budget(),
    );

    log::info!(
        "demo finished: score {} at level {}{}{}",
        outcome.score,
        outcome.level,
        if outcome.new_record {
            ", new record"
        } else {
            ""
        },
        if outcome.quit { " (frame cap hit)" } else { "" },
    );
}
