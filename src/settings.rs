//! Game settings and preferences
//!
//! Persisted as JSON next to the best-score file. Loading never fails:
//! a missing or unreadable file falls back to defaults.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default location, relative to the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "data/settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence all cues
    pub muted: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Tone down flashing effects
    pub reduced_flash: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            show_fps: false,
            reduced_flash: false,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults on any failure.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("settings file {} unreadable: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty-printed JSON, creating the parent
    /// directory if needed.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
