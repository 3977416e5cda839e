//! Process-wide configuration, read once at manager materialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Errors from loading or parsing a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    Io(std::io::Error),
    /// The file was not valid configuration TOML.
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config: {e}"),
            Self::Parse(e) => write!(f, "failed to parse config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

/// Global settings.
///
/// Read exactly once, when the render manager materializes, to
/// parameterize context creation. `#[serde(default)]` means partial TOML
/// (or an empty file) works and missing fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Minimum OpenGL version the rendering context must provide, encoded
    /// as `major * 100 + minor * 10` (`330` = OpenGL 3.3).
    pub opengl_version: u32,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self { opengl_version: 330 }
    }
}

impl GlobalConfig {
    /// Parse configuration from a TOML string. Missing fields use
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on invalid TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Parse)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_opengl_version_is_330() {
        assert_eq!(GlobalConfig::default().opengl_version, 330);
    }

    #[test]
    fn empty_toml_fills_defaults() {
        let config = GlobalConfig::from_toml_str("").unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn explicit_version_overrides_default() {
        let config = GlobalConfig::from_toml_str("opengl_version = 450").unwrap();
        assert_eq!(config.opengl_version, 450);
    }

    #[test]
    fn default_round_trips_through_toml() {
        let config = GlobalConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed = GlobalConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = GlobalConfig::from_toml_str("opengl_version = \"three\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("failed to parse config"));
    }
}
