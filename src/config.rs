//! Game configuration
//!
//! Read once at start-up from an optional JSON file.  Every field has a
//! default, so a partial file (or none at all) is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{ENEMY_SIZE, PLAYER_SIZE};
use crate::terrain::STEP;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SCROLL_SHOOTER_CONFIG";

/// File looked up in `$HOME` when `CONFIG_ENV` is unset.
const DEFAULT_FILE_NAME: &str = ".scroll_shooter.json";

const MAX_FPS: u32 = 240;

/// Narrowest field that still holds the ship.
pub const MIN_FIELD_WIDTH: f32 = PLAYER_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical field width in game units
    pub field_width: f32,
    /// Logical field height in game units
    pub field_height: f32,
    /// Simulation ticks per second
    pub fps: u32,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,
    /// Where to write logs; logging is off when absent
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,
            fps: 60,
            seed: None,
            log_file: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, which must exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Resolve the config for this run: `$SCROLL_SHOOTER_CONFIG` if set,
    /// else `~/.scroll_shooter.json` if present, else defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        match default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Also wide enough for one terrain segment.
        let min_width = MIN_FIELD_WIDTH.max(STEP);
        if self.field_width < min_width {
            return Err(ConfigError::Invalid(format!(
                "field_width must be at least {min_width}, got {}",
                self.field_width
            )));
        }
        // Spawned enemies need `field_height - ENEMY_SIZE > 0`; the ship needs
        // at least its own height.
        let min_height = PLAYER_SIZE.max(ENEMY_SIZE);
        if self.field_height <= min_height {
            return Err(ConfigError::Invalid(format!(
                "field_height must exceed {min_height}, got {}",
                self.field_height
            )));
        }
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(ConfigError::Invalid(format!(
                "fps must be within 1..={MAX_FPS}, got {}",
                self.fps
            )));
        }
        Ok(())
    }
}

fn default_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(DEFAULT_FILE_NAME))
}
