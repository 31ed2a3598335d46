//! Error types for seeker-memory.

use thiserror::Error;

/// Result type for memory store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, writing or searching the memory store.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading or rewriting the memory file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The memory file could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The embedding backend failed to produce a vector.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Dimension mismatch between a query vector and a stored entry.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions.
        expected: usize,
        /// Actual dimensions provided.
        actual: usize,
    },

    /// The memory file failed to load; reads and writes are refused so the
    /// file is left as found.
    #[error("Memory store unavailable: {0}")]
    Unavailable(String),

    /// Invalid vector (empty, zero norm, contains NaN).
    #[error("Invalid vector: {0}")]
    InvalidVector(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
