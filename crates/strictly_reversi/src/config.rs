//! Match configuration loaded from TOML.

use crate::error::ConfigError;
use crate::strategy::StrategySpec;
use crate::topology::Topology;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Board and player settings for one match.
///
/// Every field has a default, so an empty file is a valid config:
///
/// ```toml
/// topology = "square"
/// size = 8
///
/// [black]
/// kind = "minimax"
/// depth = 3
///
/// [white]
/// kind = "corner"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board shape.
    #[serde(default)]
    topology: Topology,

    /// Hex radius or square side length.
    #[serde(default = "default_size")]
    size: usize,

    /// Strategy playing Black.
    #[serde(default)]
    black: StrategySpec,

    /// Strategy playing White.
    #[serde(default = "default_white")]
    white: StrategySpec,
}

fn default_size() -> usize {
    5
}

fn default_white() -> StrategySpec {
    StrategySpec::Corner
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            topology: Topology::default(),
            size: default_size(),
            black: StrategySpec::default(),
            white: default_white(),
        }
    }
}

impl GameConfig {
    /// Creates a configuration from its parts.
    pub fn new(topology: Topology, size: usize, black: StrategySpec, white: StrategySpec) -> Self {
        Self {
            topology,
            size,
            black,
            white,
        }
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or
    /// validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the text cannot be parsed or validated.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(
            topology = %config.topology,
            size = config.size,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks the board size and both strategies.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first problem found.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.topology
            .validate_size(self.size)
            .map_err(|e| ConfigError::new(e.kind().to_string()))?;
        self.black
            .validate()
            .map_err(|e| ConfigError::new(format!("black: {}", e.message)))?;
        self.white
            .validate()
            .map_err(|e| ConfigError::new(format!("white: {}", e.message)))?;
        Ok(())
    }
}
