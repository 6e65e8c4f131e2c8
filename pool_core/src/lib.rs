//! pool_core - Reuse pools for spawned simulation objects
//!
//! Pools are keyed by a logical object name. Every entry is allocated once
//! when its spec is registered and is afterwards only toggled between active
//! and inactive; a pool never grows past its configured size.

mod config;
mod object;
mod pool;

pub use config::{load_specs, parse_specs, PoolSpecFile, PooledObjectSpec};
pub use object::{DeactivateReason, PoolEvent, PooledObject, PooledObjectId};
pub use pool::ObjectPool;

use std::path::PathBuf;
use thiserror::Error;

/// Error loading pool spec data tables
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{}': {message}", .path.display())]
    Parse { message: String, path: PathBuf },
    #[error("Validation error in '{}': {message}", .path.display())]
    Validation { message: String, path: PathBuf },
}

/// Error registering or drawing from a pool
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("Pool '{0}' is already registered")]
    DuplicateSpec(String),
    #[error("Invalid pool spec '{name}': {message}")]
    InvalidSpec { name: String, message: String },
    #[error("Unknown pool: {0}")]
    UnknownPool(String),
    #[error("Pool '{0}' has no inactive entries")]
    PoolExhausted(String),
}
