//! Game settings and preferences
//!
//! Loaded from a JSON file; any key left out falls back to its default, and a
//! missing file means all defaults. Command-line flags override on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::AudioManager;
use crate::consts::{MAX_FPS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::persistence::{self, PersistenceError};
use crate::sim::{Field, Pilot};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    pub field_width: u32,
    pub field_height: u32,

    // === Loop ===
    /// Target ticks per second when pacing in real time
    pub max_fps: u32,
    /// Pace ticks to `max_fps` instead of running flat out
    pub realtime: bool,
    /// Stop after this many ticks even if the ship survives
    pub max_ticks: Option<u64>,
    /// Input source
    pub pilot: Pilot,
    /// Check state invariants after every tick and abort on violation
    pub strict: bool,

    // === HUD ===
    /// Log a HUD line every N frames (0 = never)
    pub hud_interval: u64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Scores ===
    /// Where the leaderboard lives (None = not persisted)
    pub highscores_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: SCREEN_WIDTH,
            field_height: SCREEN_HEIGHT,

            max_fps: MAX_FPS,
            realtime: false,
            max_ticks: None,
            pilot: Pilot::default(),
            strict: false,

            hud_interval: MAX_FPS as u64,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            highscores_path: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, or defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        match persistence::load_json::<Self>(path)? {
            Some(settings) => {
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            None => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        persistence::save_json(path, self)
    }

    /// Play field described by these settings
    pub fn field(&self) -> Field {
        Field::new(self.field_width.max(1), self.field_height.max(1))
    }

    /// Audio manager configured with these volumes
    pub fn audio(&self) -> AudioManager {
        AudioManager::with_levels(self.master_volume, self.sfx_volume, self.muted)
    }
}
