// src/config/model.rs

use serde::{Deserialize, Serialize};

/// Paths watched when the config file has to be created from scratch.
pub const DEFAULT_PATHS: [&str; 2] = ["/tmp", "/opt"];

/// Top-level configuration as read from the config file.
///
/// ```yaml
/// paths:
///   - /tmp
///   - /opt
/// ```
///
/// A missing `paths` key is not an error; it just means nothing is watched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Filesystem paths to watch, in registration order.
    #[serde(default)]
    pub paths: Vec<String>,
}

impl Config {
    /// A config that watches nothing (what an empty file loads as).
    pub fn empty() -> Self {
        Self { paths: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: DEFAULT_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}
