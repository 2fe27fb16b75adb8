// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::format::ConfigFormat;
use crate::config::model::Config;
use crate::errors::Result;

/// Load a configuration file from a given path.
///
/// The format is picked from the file extension. A blank file loads as an
/// empty config.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let contents = fs::read_to_string(path)?;

    let config = format.parse(&contents)?;
    debug!(path = %path.display(), %format, paths = ?config.paths, "config loaded");

    Ok(config)
}

/// Write the default configuration (`/tmp`, `/opt`) to `path`.
///
/// Overwrites whatever is there; callers check for existence first.
pub fn write_default(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let config = Config::default();

    fs::write(path, format.render(&config)?)?;
    Ok(config)
}

/// Load the config at `path`, creating it with defaults first if it does not
/// exist.
///
/// An existing file is never rewritten. Freshly written defaults are read
/// back from disk so both branches go through the same parser.
pub fn load_or_create_default(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();

    if !path.try_exists()? {
        write_default(path)?;
        info!("Default configuration created at {}", path.display());
    }

    load_from_path(path)
}

/// Default config location: `config.yml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.yml")
}
