// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskguardError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A caller passed a value outside the accepted set (e.g. an unknown
    /// resource kind). Raised before any filesystem access.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TaskguardError>;
