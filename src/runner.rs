//! Frame loop
//!
//! Drives the sim at the fixed tick rate and fans each frame's events
//! out to the collaborators. The loop owns nothing platform-specific:
//! input, canvas and audio all arrive as trait objects, so tests can run
//! the whole game headless.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::audio::{cue_for, AudioSink, SoundCue};
use crate::consts::TICK_RATE;
use crate::render::{draw_frame, Canvas};
use crate::scores;
use crate::sim::{tick, GameEvent, GamePhase, GameState, TickInput};

/// One frame of input plus the out-of-band quit request.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub input: TickInput,
    pub quit: bool,
}

/// Input collaborator, polled once per frame.
pub trait InputSource {
    fn poll(&mut self) -> InputSnapshot;
}

/// How a run finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub score: u64,
    pub level: u32,
    pub new_record: bool,
    /// True if the player quit before the run played out
    pub quit: bool,
}

/// Wall-clock budget for one frame at the fixed tick rate.
pub fn default_frame_budget() -> Duration {
    Duration::from_secs(1) / TICK_RATE
}

/// Run one game to completion (or until the input source quits).
///
/// Each frame: poll input, advance the sim, dispatch events, present.
/// Frames are paced to `frame_budget`; `Duration::ZERO` runs unpaced.
/// A new record is persisted the moment it is decided, not at exit.
pub fn run_game(
    state: &mut GameState,
    canvas: &mut dyn Canvas,
    audio: &mut dyn AudioSink,
    input: &mut dyn InputSource,
    score_path: &Path,
    frame_budget: Duration,
) -> RunOutcome {
    audio.play(SoundCue::MusicStart);

    let mut quit = false;
    loop {
        let frame_start = Instant::now();

        let snapshot = input.poll();
        if snapshot.quit {
            quit = true;
            break;
        }

        tick(state, &snapshot.input);

        for event in state.drain_events() {
            match event {
                GameEvent::NewRecord { score } => {
                    if let Err(err) = scores::write_best(score_path, score) {
                        log::warn!("could not save best score: {err}");
                    }
                    audio.play(SoundCue::MusicStop);
                }
                GameEvent::GameOver { .. } => audio.play(SoundCue::MusicStop),
                _ => {}
            }
            if let Some(cue) = cue_for(&event) {
                audio.play(cue);
            }
        }

        canvas.present(&draw_frame(state));

        if state.phase == GamePhase::Ended {
            break;
        }

        if !frame_budget.is_zero() {
            if let Some(remaining) = frame_budget.checked_sub(frame_start.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }

    RunOutcome {
        score: state.player.score,
        level: state.player.level,
        new_record: state.new_record,
        quit,
    }
}
