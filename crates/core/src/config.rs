//! Game configuration
//!
//! Defaults reproduce the classic rules: 1000ms gravity at level 1, 100ms
//! faster per level, floored at 100ms, one level per 10 lines, uniform piece
//! draws.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{BASE_DROP_MS, DROP_STEP_MS, LINES_PER_LEVEL, MIN_DROP_MS};

/// Result type alias for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How the next piece kind is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Randomizer {
    /// Independent uniform draw for every piece
    #[default]
    Uniform,
    /// 7-bag: every kind once per shuffled bag
    Bag,
}

/// Main configuration for a game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed for piece generation
    pub seed: u32,

    /// Piece randomizer
    pub randomizer: Randomizer,

    /// Gravity interval at level 1 (in milliseconds)
    pub base_drop_ms: u32,

    /// Gravity speed-up per level above 1 (in milliseconds)
    pub drop_step_ms: u32,

    /// Gravity interval floor (in milliseconds)
    pub min_drop_ms: u32,

    /// Lines needed per level
    pub lines_per_level: u32,

    /// Whether `reset` goes straight back to running instead of waiting in `Ready`
    pub start_on_reset: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            randomizer: Randomizer::Uniform,
            base_drop_ms: BASE_DROP_MS,
            drop_step_ms: DROP_STEP_MS,
            min_drop_ms: MIN_DROP_MS,
            lines_per_level: LINES_PER_LEVEL,
            start_on_reset: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the RNG seed
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the piece randomizer
    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }

    /// Set the gravity curve (base interval, per-level step, floor)
    pub fn with_drop_curve(mut self, base_ms: u32, step_ms: u32, min_ms: u32) -> Self {
        self.base_drop_ms = base_ms;
        self.drop_step_ms = step_ms;
        self.min_drop_ms = min_ms;
        self
    }

    /// Set the number of lines per level
    pub fn with_lines_per_level(mut self, lines: u32) -> Self {
        self.lines_per_level = lines;
        self
    }

    /// Set whether reset immediately restarts the game
    pub fn with_start_on_reset(mut self, start_on_reset: bool) -> Self {
        self.start_on_reset = start_on_reset;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.lines_per_level == 0 {
            return Err(ConfigError::Invalid(
                "lines_per_level must be at least 1".to_string(),
            ));
        }
        if self.min_drop_ms == 0 {
            return Err(ConfigError::Invalid(
                "min_drop_ms must be at least 1".to_string(),
            ));
        }
        if self.min_drop_ms > self.base_drop_ms {
            return Err(ConfigError::Invalid(format!(
                "min_drop_ms ({}) exceeds base_drop_ms ({})",
                self.min_drop_ms, self.base_drop_ms
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
