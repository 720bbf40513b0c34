//! Error types for the engine bridge

use thiserror::Error;

/// Errors reported by an engine connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// No shared engine session could be found or connected to
    #[error("no engine session available: {0}")]
    NoEngine(String),

    /// A new engine process could not be started
    #[error("failed to start engine: {0}")]
    StartFailed(String),

    /// The engine raised an exception while running a procedure
    #[error("{procedure}: {message}")]
    Exception { procedure: String, message: String },

    /// The engine connection has already been terminated
    #[error("engine connection is closed")]
    Disconnected,
}

impl BridgeError {
    /// Create an exception error for a procedure
    pub fn exception(procedure: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Exception {
            procedure: procedure.into(),
            message: message.into(),
        }
    }
}
