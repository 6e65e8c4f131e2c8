//! Configuration loading: tunable constants and character data tables

mod character;
mod constants;

pub use character::{CharacterConfig, MeleeProfile, SkillConfig};
pub use constants::{
    constants, constants_initialized, ensure_constants_initialized, init_constants,
    init_constants_default, CombatConstants, MeleeConstants, MovementConstants,
};

use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

/// Error loading combat configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file into any deserializable config type
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Parse a TOML string into any deserializable config type
pub fn parse_toml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load a data table, picking the format from the file extension
///
/// `.json` files are read with serde_json, everything else as TOML.
pub fn load_table<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if path.extension().is_some_and(|ext| ext == "json") {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    } else {
        load_toml(path)
    }
}
