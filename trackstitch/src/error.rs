//! Error types for the track repair library

use thiserror::Error;

/// Result type alias for the track repair library
pub type Result<T> = std::result::Result<T, StitchError>;

/// Errors that can occur while repairing a detection table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StitchError {
    /// The link table loops back on itself instead of reaching a root id
    #[error("link table contains a cycle reachable from id {id}")]
    CyclicLink { id: u32 },

    /// A gap run's bounding frame holds no detection for the gapped id
    #[error("track {id} has no detection in boundary frame {frame}")]
    MissingBoundary { id: u32, frame: usize },
}
