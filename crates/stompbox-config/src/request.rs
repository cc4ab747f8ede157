//! Processing requests.
//!
//! A [`Request`] captures everything one run needs: which file to read, where
//! to write, which effect and with what values. It is built once and passed
//! into the pipeline; nothing reads effect settings from anywhere else.
//!
//! # TOML Format
//!
//! ```toml
//! input = "take1.wav"
//! output = "processed_output/output.wav"
//! effect = "phaser"
//!
//! [params]
//! rate_hz = 1.0
//! depth = 0.5
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, EffectKind, EffectParams, ValidationError};

/// Where processed audio goes unless told otherwise.
pub const DEFAULT_OUTPUT_PATH: &str = "processed_output/output.wav";

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

/// One processing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Input WAV file.
    pub input: PathBuf,

    /// Output WAV file, overwritten on every run.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Effect to apply.
    pub effect: EffectKind,

    /// Parameter values by name. Absent names take their defaults.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
}

impl Request {
    /// Create a request writing to [`DEFAULT_OUTPUT_PATH`].
    pub fn new(input: impl Into<PathBuf>, params: &EffectParams) -> Self {
        Self {
            input: input.into(),
            output: default_output(),
            effect: params.kind(),
            params: params.to_named(),
        }
    }

    /// Set the output path.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Load a request from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse a request from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the request to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Render the request as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the parameters against the effect's schema.
    pub fn resolve(&self, strict: bool) -> Result<EffectParams, ValidationError> {
        EffectParams::from_named(self.effect, &self.params, strict)
    }
}
