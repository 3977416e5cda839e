//! Crate-level error types.

use std::fmt;

use crate::config::ConfigError;
use crate::singleton::StaticClassError;

/// Errors produced by the monogl crate.
#[derive(Debug)]
pub enum MonoglError {
    /// Static-class misuse (attempted instantiation).
    StaticClass(StaticClassError),
    /// Configuration load/parse failure.
    Config(ConfigError),
}

impl fmt::Display for MonoglError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaticClass(e) => write!(f, "static class error: {e}"),
            Self::Config(e) => write!(f, "config error: {e}"),
        }
    }
}

impl std::error::Error for MonoglError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StaticClass(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<StaticClassError> for MonoglError {
    fn from(e: StaticClassError) -> Self {
        Self::StaticClass(e)
    }
}

impl From<ConfigError> for MonoglError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
