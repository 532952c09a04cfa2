//! Settings file loading
//!
//! One settings document, three accepted syntaxes. The syntax is chosen from
//! the file extension.

use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{Error, Result, io};

/// Settings file syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// Detect the syntax from `path`'s extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    fn parse<T: DeserializeOwned>(self, content: &str) -> std::result::Result<T, String> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        })
    }
}

/// Loads typed settings from TOML, JSON or YAML files.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load and deserialize `path`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] for an unknown extension, [`Error::Io`]
    /// if the file cannot be read, [`Error::ConfigParse`] if it does not
    /// deserialize into `T`.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let format = Format::from_path(path)?;
        let content = io::read_text(path)?;
        format.parse(&content).map_err(|message| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.to_string(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_detection_ignores_case() {
        assert_eq!(Format::from_path(Path::new("s.TOML")).unwrap(), Format::Toml);
        assert_eq!(Format::from_path(Path::new("s.yml")).unwrap(), Format::Yaml);
    }

    #[test]
    fn missing_extension_is_unsupported() {
        let err = Format::from_path(Path::new("settings")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { extension } if extension.is_empty()));
    }
}
