//! Classification of engine output text
//!
//! The engine reports some failures only as text on its output streams.
//! This is the one place that scans that text; everything else deals in
//! typed errors.

use thiserror::Error;
use tracing::debug;

/// Marker the engine prefixes warnings with
pub const WARNING_MARKER: &str = "Warning:";

/// A failure recognized in captured engine output
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifiedError {
    /// Something was written to the error stream
    #[error("{0}")]
    EngineExecution(String),

    /// A warning line was written to the output stream
    #[error("{0}")]
    EngineWarning(String),
}

/// Inspect the captured output and error streams of an engine call
///
/// Any error text fails the call. Otherwise the first `Warning:` line in
/// the output fails it, whatever the warning is about.
pub fn classify(out: &str, err: &str) -> Result<(), ClassifiedError> {
    if !err.is_empty() {
        debug!("Engine error stream: {:?}", err);
        return Err(ClassifiedError::EngineExecution(err.trim_end().to_string()));
    }

    if let Some(start) = out.find(WARNING_MARKER) {
        let line = out[start..].lines().next().unwrap_or_default();
        debug!("Engine warning: {:?}", line);
        return Err(ClassifiedError::EngineWarning(line.to_string()));
    }

    Ok(())
}
