//! Error types for rubric.
//!
//! Chunking itself never fails: every input string yields a (possibly
//! empty) chunk sequence. Errors come from configuration and from the
//! JSONL boundary.

/// Errors that can occur while configuring chunkers or moving chunks
/// across the JSONL boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid chunk size (must be > 0).
    #[error("invalid chunk size: {0} (must be > 0)")]
    InvalidChunkSize(usize),

    /// Overlap exceeds chunk size.
    #[error("overlap {overlap} exceeds chunk size {size}")]
    OverlapExceedsSize {
        /// The chunk size.
        size: usize,
        /// The overlap that exceeded the size.
        overlap: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading or writing a chunk stream failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A chunk could not be serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A line of a JSONL stream is not a valid chunk record.
    #[error("malformed chunk record on line {line}: {source}")]
    Jsonl {
        /// 1-based line number in the stream.
        line: usize,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// Layered settings could not be loaded.
    #[error("settings error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type for rubric operations.
pub type Result<T> = std::result::Result<T, Error>;
