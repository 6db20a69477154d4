//! Player preferences
//!
//! Persisted as JSON next to the result files. Anything unreadable falls
//! back to defaults; the game never refuses to start over a settings file.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default settings file name
pub const SETTINGS_FILE: &str = "duckshot_settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute everything regardless of volumes
    pub muted: bool,
    /// Show the FPS counter in the HUD
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 0.8,
            music_volume: 0.5,
            muted: false,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Effective sfx volume after master and mute are applied
    pub fn effective_sfx(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.sfx_volume * self.master_volume
        }
    }

    /// Effective music volume after master and mute are applied
    pub fn effective_music(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.music_volume * self.master_volume
        }
    }

    /// Load from disk, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("unreadable settings ({err}), using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
