// src/config/mod.rs

//! Configuration loading for pathwatch.
//!
//! Responsibilities:
//! - Define the serde-backed data model (`model.rs`).
//! - Pick a file format from the config path (`format.rs`).
//! - Load a config file from disk, creating the default one if missing
//!   (`loader.rs`).

pub mod format;
pub mod loader;
pub mod model;

pub use format::ConfigFormat;
pub use loader::{default_config_path, load_from_path, load_or_create_default, write_default};
pub use model::Config;
