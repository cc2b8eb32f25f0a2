//! Error types for the post-processing library

use thiserror::Error;

/// Result type alias for the post-processing library
pub type Result<T> = std::result::Result<T, PostprocessError>;

/// Errors that can occur while loading, repairing, or saving track data
#[derive(Error, Debug)]
pub enum PostprocessError {
    #[error("malformed record at line {line}: {message}")]
    MalformedRecord { line: u64, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("track repair failed: {0}")]
    RepairError(#[from] trackstitch::StitchError),
}

impl PostprocessError {
    pub fn malformed<S: Into<String>>(line: u64, message: S) -> Self {
        Self::MalformedRecord {
            line,
            message: message.into(),
        }
    }
}
