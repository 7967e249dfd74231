//! Player preferences
//!
//! Persisted separately from high scores. Load failures fall back to
//! defaults; save failures are logged and otherwise ignored.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::games::pong::Difficulty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,
    /// Computer paddle strength in pong
    pub pong_difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            pong_difficulty: Difficulty::Medium,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                log::warn!("corrupt settings file {}: {err}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("settings write to {} failed: {err}", path.display());
                }
            }
            Err(err) => log::warn!("settings serialization failed: {err}"),
        }
    }

    /// Volume the audio host should apply, with mute folded in.
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.25,
            muted: false,
            pong_difficulty: Difficulty::Hard,
        };
        settings.save(&path);
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn mute_zeroes_effective_volume() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        assert_eq!(settings.effective_volume(), 0.0);
    }
}
