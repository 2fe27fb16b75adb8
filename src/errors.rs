// src/errors.rs

//! Crate-wide error type and `Result` alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathwatchError {
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("Watcher initialisation failed: {0}")]
    NotifyError(#[from] notify::Error),

    #[error("Cannot watch {path}: {source}")]
    WatchError {
        path: String,
        #[source]
        source: notify::Error,
    },
}

pub type Result<T> = std::result::Result<T, PathwatchError>;
