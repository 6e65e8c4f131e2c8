use crate::{ConfigError, PoolError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pre-allocation spec for one named pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PooledObjectSpec {
    /// Unique pool key
    pub object_name: String,
    /// Opaque template handle passed through to the presentation layer
    #[serde(default)]
    pub template: String,
    pub pool_size: usize,
    /// Seconds an acquired entry stays active; 0 means until released
    #[serde(default)]
    pub lifespan: f64,
}

impl PooledObjectSpec {
    pub fn new(object_name: impl Into<String>, template: impl Into<String>, pool_size: usize) -> Self {
        PooledObjectSpec {
            object_name: object_name.into(),
            template: template.into(),
            pool_size,
            lifespan: 0.0,
        }
    }

    pub fn with_lifespan(mut self, lifespan: f64) -> Self {
        self.lifespan = lifespan;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), PoolError> {
        let invalid = |message: &str| PoolError::InvalidSpec {
            name: self.object_name.clone(),
            message: message.to_string(),
        };

        if self.object_name.is_empty() {
            return Err(invalid("object_name must not be empty"));
        }
        if self.pool_size == 0 {
            return Err(invalid("pool_size must be at least 1"));
        }
        if !self.lifespan.is_finite() || self.lifespan < 0.0 {
            return Err(invalid("lifespan must be a finite, non-negative number"));
        }
        Ok(())
    }
}

/// Data table file holding pool specs
///
/// ```toml
/// [[pools]]
/// object_name = "hit_spark"
/// template = "fx/hit_spark"
/// pool_size = 8
/// lifespan = 0.5
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolSpecFile {
    #[serde(default)]
    pub pools: Vec<PooledObjectSpec>,
}

/// Load pool specs from a `.toml` or `.json` data table
pub fn load_specs(path: &Path) -> Result<Vec<PooledObjectSpec>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        error: e,
        path: Some(path.to_path_buf()),
    })?;

    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let file: PoolSpecFile = if is_json {
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
            path: path.to_path_buf(),
        })?
    } else {
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
            path: path.to_path_buf(),
        })?
    };

    for spec in &file.pools {
        spec.validate().map_err(|e| ConfigError::Validation {
            message: e.to_string(),
            path: path.to_path_buf(),
        })?;
    }

    Ok(file.pools)
}

/// Parse pool specs from a TOML string
pub fn parse_specs(toml: &str) -> Result<Vec<PooledObjectSpec>, toml::de::Error> {
    let file: PoolSpecFile = toml::from_str(toml)?;
    Ok(file.pools)
}
