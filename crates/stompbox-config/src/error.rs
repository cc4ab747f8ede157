//! Error types for validation and configuration.

use std::path::PathBuf;
use thiserror::Error;

use crate::EffectKind;

/// Why a set of effect parameters was rejected.
///
/// Raised before any audio is touched; a request that fails validation does
/// no work at all.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown effect name.
    #[error("unknown effect type: {0}")]
    UnknownEffect(String),

    /// Wrong number of positional values.
    #[error("{kind} expects {expected} parameter values, got {got}")]
    CountMismatch {
        /// Effect the values were meant for.
        kind: EffectKind,
        /// Length of the effect's schema.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// Parameter value outside its declared range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Parameter name from the schema.
        param: String,
        /// Rejected value.
        value: f32,
        /// Inclusive lower bound.
        min: f32,
        /// Inclusive upper bound.
        max: f32,
    },

    /// NaN or infinite parameter value.
    #[error("parameter '{param}' must be a finite number")]
    NonFinite {
        /// Parameter name from the schema.
        param: String,
    },

    /// Parameter name not in the effect's schema.
    #[error("unknown parameter '{param}' for effect '{kind}'")]
    UnknownParameter {
        /// Effect being configured.
        kind: EffectKind,
        /// Name as given.
        param: String,
    },

    /// Required parameter not supplied.
    #[error("missing parameter '{param}' for effect '{kind}'")]
    MissingParameter {
        /// Effect being configured.
        kind: EffectKind,
        /// Name of the missing parameter.
        param: String,
    },

    /// Value that could not be parsed.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Parameter the text was meant for.
        param: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Errors from loading or saving request files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("cannot read {}: {source}", .path.display())]
    ReadFile {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("cannot write {}: {source}", .path.display())]
    WriteFile {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory.
    #[error("cannot create directory {}: {source}", .path.display())]
    CreateDir {
        /// Directory being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("invalid request TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML.
    #[error("cannot encode request as TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Request contents failed validation.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),
}

impl ConfigError {
    /// [`ConfigError::ReadFile`] for `path`.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::WriteFile`] for `path`.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::CreateDir`] for `path`.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
