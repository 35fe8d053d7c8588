//=========================================================================
// Configuration
//=========================================================================
//
// Start-up settings, read from TOML. Every field has a default so a
// partial (or missing) file is valid.
//
// ```toml
// tps = 60.0
// asset_root = "assets"
//
// [window]
// title = "Arcade"
// width = 800
// height = 600
//
// [audio]
// sound_enabled = true
// music_enabled = false
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    /// `true` when the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

//=== Sections ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Arcade".to_owned(),
            width: 800,
            height: 600,
        }
    }
}

/// Initial values of the player-facing audio toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub sound_enabled: bool,
    pub music_enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
        }
    }
}

//=== GameConfig ==========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logic ticks per second.
    pub tps: f64,

    /// Capacity of the platform → logic channel.
    pub channel_capacity: usize,

    /// Directory manifest paths are resolved against.
    pub asset_root: PathBuf,

    pub window: WindowConfig,
    pub audio: AudioConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            asset_root: PathBuf::from("assets"),
            window: WindowConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Rejects values the engine builder would refuse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tps.is_nan() || self.tps <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "tps",
                reason: format!("must be positive, got {}", self.tps),
            });
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "channel_capacity",
                reason: "must be positive".to_owned(),
            });
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid {
                field: "window",
                reason: format!("size {}x{} is empty", self.window.width, self.window.height),
            });
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
