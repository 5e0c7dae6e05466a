//! Error types for trace recording and replay.

use thiserror::Error;

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Errors that can occur while recording or replaying a trace.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Trace file I/O failed.
    #[error("trace I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A trace line is not a valid event.
    #[error("malformed trace line {line}: {source}")]
    Parse {
        /// 1-based line number in the trace.
        line: usize,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// An event could not be encoded.
    #[error("trace encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
