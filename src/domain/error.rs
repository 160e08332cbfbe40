//! Domain error types

use thiserror::Error;

/// Errors from loading or updating the configuration file
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Read(String),

    #[error("config file is not valid TOML: {0}")]
    Parse(String),

    #[error("could not write config file: {0}")]
    Write(String),

    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("config file already exists at {0}")]
    AlreadyExists(String),
}
