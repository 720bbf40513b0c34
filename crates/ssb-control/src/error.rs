//! Error types for the radio controller

use ssb_raster::RasterError;
use thiserror::Error;

use crate::classifier::ClassifiedError;

/// Errors that can occur while driving the radio
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// No engine could be attached to or started
    #[error("failed to reach or start engine: {0}")]
    EngineStart(String),

    /// Radio discovery raised an engine exception
    #[error("radio configuration failed: {0}")]
    Configuration(String),

    /// Radio discovery completed but the engine reported a problem
    #[error("radio not found: {0}")]
    RadioNotFound(#[source] ClassifiedError),

    /// Operation needs a configured radio
    #[error("no radio configured; discover a radio first")]
    NotConfigured,

    /// Channel number outside its numbering scheme
    #[error("invalid channel: {0}")]
    InvalidChannel(#[from] RasterError),

    /// Unrecognized attack mode
    #[error("invalid attack mode: {0}")]
    InvalidMode(String),

    /// Engine printed a warning
    #[error("engine warning: {0}")]
    EngineWarning(String),

    /// Engine raised an error
    #[error("engine error: {0}")]
    EngineExecution(String),

    /// Engine reply did not have any of the expected shapes
    #[error("malformed reply from {procedure}: {reason}")]
    MalformedReply { procedure: String, reason: String },
}

impl ControlError {
    pub(crate) fn malformed(procedure: &str, reason: impl Into<String>) -> Self {
        Self::MalformedReply {
            procedure: procedure.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<ClassifiedError> for ControlError {
    fn from(err: ClassifiedError) -> Self {
        match err {
            ClassifiedError::EngineExecution(msg) => Self::EngineExecution(msg),
            ClassifiedError::EngineWarning(msg) => Self::EngineWarning(msg),
        }
    }
}

/// Errors that can occur while persisting settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Neither `$XDG_CONFIG_HOME` nor a home directory is available
    #[error("could not determine settings path")]
    NoConfigDir,

    /// Reading or writing the settings file failed
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be encoded or decoded
    #[error("settings format error: {0}")]
    Format(#[from] serde_json::Error),
}
