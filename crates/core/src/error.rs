//! Error types for the alignment library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the alignment library.
#[derive(Error, Debug)]
pub enum AlignError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The two sides of a bitext have a different number of lines
    #[error(
        "Bitext length mismatch: source has {source_lines} lines, target has {target_lines} lines"
    )]
    StreamLengthMismatch {
        source_lines: usize,
        target_lines: usize,
    },

    /// No target token has a positive probability for this source token
    #[error("No alignment found for source token {token}")]
    NoAlignment { token: String },

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Error while reading lines from an open stream
    #[error("Read error in {stream}: {err}")]
    Read {
        stream: String,
        #[source]
        err: std::io::Error,
    },

    /// Error loading a saved model
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving a model
    #[error("Save error: {0}")]
    Save(String),
}

/// Result type alias for alignment operations.
pub type Result<T> = std::result::Result<T, AlignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_message_names_both_sides() {
        let err = AlignError::StreamLengthMismatch {
            source_lines: 3,
            target_lines: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("source has 3"));
        assert!(msg.contains("target has 5"));
    }
}
