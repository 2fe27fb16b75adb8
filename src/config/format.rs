// src/config/format.rs

//! Config file formats, chosen by file extension.

use std::fmt;
use std::path::Path;

use crate::config::model::Config;
use crate::errors::{PathwatchError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Detect the format from the extension of `path`.
    ///
    /// `.yml` / `.yaml` map to YAML and `.toml` to TOML (case-insensitive).
    /// Anything else is rejected rather than guessed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("yml") | Some("yaml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some(other) => Err(PathwatchError::UnsupportedFormat(format!(
                "{other:?} (from {})",
                path.display()
            ))),
            None => Err(PathwatchError::UnsupportedFormat(format!(
                "no file extension on {}",
                path.display()
            ))),
        }
    }

    pub fn parse(self, contents: &str) -> Result<Config> {
        // Both parsers reject a completely empty document for a struct.
        if contents.trim().is_empty() {
            return Ok(Config::empty());
        }

        let config = match self {
            ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
            ConfigFormat::Toml => toml::from_str(contents)?,
        };
        Ok(config)
    }

    pub fn render(self, config: &Config) -> Result<String> {
        let rendered = match self {
            ConfigFormat::Yaml => serde_yaml::to_string(config)?,
            ConfigFormat::Toml => toml::to_string(config)?,
        };
        Ok(rendered)
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Yaml => f.write_str("yaml"),
            ConfigFormat::Toml => f.write_str("toml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(ConfigFormat::from_path("config.yml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("a/b.YAML").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("watch.toml").unwrap(), ConfigFormat::Toml);
    }

    #[test]
    fn rejects_unknown_or_missing_extension() {
        assert!(matches!(
            ConfigFormat::from_path("config.ini"),
            Err(PathwatchError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ConfigFormat::from_path("config"),
            Err(PathwatchError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn blank_document_is_an_empty_config() {
        assert_eq!(ConfigFormat::Yaml.parse("  \n").unwrap(), Config::empty());
        assert_eq!(ConfigFormat::Toml.parse("").unwrap(), Config::empty());
    }

    #[test]
    fn missing_paths_key_is_an_empty_config() {
        let cfg = ConfigFormat::Yaml.parse("other: 1\n").unwrap();
        assert!(cfg.is_empty());
    }

    #[test]
    fn rendered_default_parses_back() {
        for format in [ConfigFormat::Yaml, ConfigFormat::Toml] {
            let text = format.render(&Config::default()).unwrap();
            assert_eq!(format.parse(&text).unwrap(), Config::default(), "{format}");
        }
    }
}
