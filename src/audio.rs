//! Sound cue dispatch
//!
//! The sim emits `GameEvent`s; this module maps them to cues and hands
//! them to whatever sink the frontend provides. Cues are fire-and-forget,
//! never acknowledged.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Background music starts (menu / after a run)
    MusicStart,
    /// Background music stops (run lost)
    MusicStop,
    /// Player pressed fire
    Shoot,
    /// Enemy rammed the player
    Explosion,
    /// Player laser destroyed an enemy
    EnemyKilled,
    /// Enemy escaped past the bottom
    EnemyDespawned,
    /// Enemy laser struck the player
    LaserImpact,
    /// Wave replenished
    LevelUp,
    /// Run lost
    GameOver,
    /// Run lost with a new best score
    NewRecord,
}

/// Audio collaborator. Implementations may drop cues freely.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink for headless runs and tests; traces cues at debug level.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("audio cue: {cue:?}");
    }
}

/// Map a simulation event to its cue, if it has one.
pub fn cue_for(event: &GameEvent) -> Option<SoundCue> {
    match event {
        GameEvent::Shoot => Some(SoundCue::Shoot),
        GameEvent::LaserImpact => Some(SoundCue::LaserImpact),
        GameEvent::Explosion => Some(SoundCue::Explosion),
        GameEvent::EnemyKilled => Some(SoundCue::EnemyKilled),
        GameEvent::EnemyDespawned => Some(SoundCue::EnemyDespawned),
        GameEvent::LevelUp { .. } => Some(SoundCue::LevelUp),
        GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
        GameEvent::NewRecord { .. } => Some(SoundCue::NewRecord),
        // Menu music resumes once the grace period has played out.
        GameEvent::RunEnded => Some(SoundCue::MusicStart),
    }
}
