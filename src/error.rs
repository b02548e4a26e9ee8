//! Startup errors
//!
//! Everything here is fatal: once the game loop runs there are no error
//! states, only phase transitions.

use std::path::PathBuf;

use thiserror::Error;

/// Asset category, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Sound,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Image => write!(f, "image"),
            AssetKind::Sound => write!(f, "sound"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing {kind} '{name}' (looked for {})", path.display())]
    Missing {
        kind: AssetKind,
        name: String,
        path: PathBuf,
    },
    #[error("{kind} '{name}' is not in the asset manifest")]
    Unknown { kind: AssetKind, name: String },
    #[error("{device} device failed to initialise: {reason}")]
    Device { device: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write settings to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error for the binary
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to write session summary: {0}")]
    Summary(#[from] serde_json::Error),
}
