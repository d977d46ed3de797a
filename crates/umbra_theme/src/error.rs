//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or saving a [`ThemeConfig`](crate::ThemeConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid TOML for this schema
    #[error(transparent)]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
