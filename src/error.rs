//! Error types for monitor operations.

use std::path::PathBuf;

/// All errors that can escape a monitor operation.
///
/// Per-process enrichment never returns these; it degrades to sentinel values
/// instead. Only the top-level process snapshot and the on-demand operations
/// surface them.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("{tool} could not be started: {source}")]
    ToolUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with status {code:?}: {stderr}")]
    ToolFailed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Could not parse {what}: {details}")]
    ParseFailed { what: String, details: String },

    #[error("Failed to get process list")]
    ProcessQueryFailed {
        #[source]
        source: Box<MonitorError>,
    },

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, MonitorError>;

// Handlers return Result<T, String> to the presentation layer
impl From<MonitorError> for String {
    fn from(err: MonitorError) -> String {
        err.to_string()
    }
}
