#![forbid(unsafe_code)]

//! Error types for configuration loading and engine setup.
//!
//! Frame-time code never returns these: per-frame math degrades to a static
//! element instead of failing. Errors only surface while loading
//! configuration or committing measurements.

use std::fmt;

/// Configuration loading and validation errors.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Unknown preset name.
    UnknownPreset(String),
    /// Validation errors, one message per problem.
    Validation(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::UnknownPreset(name) => write!(f, "unknown preset: {name:?}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::UnknownPreset(_) | Self::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Engine measurement errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A measurement list did not match the configured element count.
    MeasurementCount {
        /// Which list was wrong (`"parallax"`, `"grow"`, ...).
        kind: &'static str,
        expected: usize,
        got: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MeasurementCount {
                kind,
                expected,
                got,
            } => write!(
                f,
                "{kind} measurements: expected {expected}, got {got}"
            ),
        }
    }
}

impl std::error::Error for EngineError {}
