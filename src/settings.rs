//! Game settings and preferences
//!
//! Stored as JSON. Missing fields fall back to their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed (random when absent)
    pub seed: Option<u64>,

    // === Assets ===
    /// Directory holding `images/` and `sounds/`; when set every asset must exist
    pub asset_root: Option<PathBuf>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Headless runner ===
    /// Let the autopilot play
    pub idle_mode: bool,
    /// Sleep between ticks instead of running as fast as possible
    pub realtime: bool,
    /// Stop after this many seconds of game time
    pub run_secs: Option<u64>,
    /// Click through the title screen this many times (new games)
    pub auto_start_games: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            asset_root: None,

            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.3,
            muted: false,

            idle_mode: true,
            realtime: false,
            run_secs: Some(120),
            auto_start_games: 1,
        }
    }
}

impl Settings {
    /// Default settings file looked up in the working directory
    pub const DEFAULT_PATH: &'static str = "rock-blaster.json";

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, else from the default file if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(Self::DEFAULT_PATH);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    log::info!("Using default settings");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save settings as JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = self.to_json().map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
