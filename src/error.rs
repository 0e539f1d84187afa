//! Centralized error handling for about-this-mac

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors that can fail a whole invocation.
///
/// Section collectors never return these; they degrade to unknown values.
/// Only the outer layers (config, output writing, serialization) surface them.
#[derive(Debug, Error)]
pub enum AboutMacError {
    /// I/O errors (config reading, output writing)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
    /// Report serialization errors (JSON, YAML)
    #[error("Serialize error: {0}")]
    Serialize(String),
    /// A command the caller insisted on could not be run
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl From<toml::de::Error> for AboutMacError {
    fn from(error: toml::de::Error) -> Self {
        AboutMacError::Config(error.to_string())
    }
}

impl From<serde_json::Error> for AboutMacError {
    fn from(error: serde_json::Error) -> Self {
        AboutMacError::Serialize(error.to_string())
    }
}

impl From<serde_yaml::Error> for AboutMacError {
    fn from(error: serde_yaml::Error) -> Self {
        AboutMacError::Serialize(error.to_string())
    }
}

/// Why a diagnostic command produced no usable output.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("command '{0}' not found")]
    NotFound(String),
    #[error("command '{program}' exited with status {code:?}")]
    NonZeroExit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("permission denied running '{0}'")]
    PermissionDenied(String),
    #[error("command '{program}' timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },
    #[error("failed to run '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl CommandError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, CommandError::PermissionDenied(_))
    }
}

/// Type alias for Results in about-this-mac
pub type Result<T> = std::result::Result<T, AboutMacError>;
