//! Detection records and the frame-indexed table they live in

use crate::bbox::Bbox;
use std::collections::BTreeSet;

/// One tracked object in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Tracker-assigned identity; id 0 is reserved for discarding
    pub id: u32,
    /// `None` when the tracker only predicted the position this frame
    /// (coasting), or when the point was produced by gap interpolation
    pub confidence: Option<f32>,
    pub bbox: Bbox,
}

impl Detection {
    pub fn new(id: u32, confidence: Option<f32>, bbox: Bbox) -> Self {
        Self {
            id,
            confidence,
            bbox,
        }
    }

    /// Synthetic interpolated detection: a zero-area box at `(x, y)`
    /// with no confidence
    pub fn interpolated(id: u32, x: f32, y: f32) -> Self {
        Self::new(id, None, Bbox::point(x, y))
    }

    /// True when the tracker did not match a real detection this frame
    pub fn is_coasting(&self) -> bool {
        self.confidence.is_none()
    }
}

/// All detections attributed to a single frame
pub type Frame = Vec<Detection>;

/// Frame-indexed detection table. Frame numbers are contiguous from 0,
/// so the vector index is the frame number.
pub type FrameTable = Vec<Frame>;

/// Set of ids present in a frame
pub fn frame_ids(frame: &Frame) -> BTreeSet<u32> {
    frame.iter().map(|track| track.id).collect()
}
