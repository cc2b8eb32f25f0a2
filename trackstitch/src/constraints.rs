//! Spatial constraint filtering

use crate::bbox::Bbox;
use crate::detection::{Frame, FrameTable};
use rayon::prelude::*;

/// Inclusive rectangle that detections must lie fully inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Constraints {
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Both corners of the box inside the rectangle, bounds inclusive
    pub fn contains(&self, bbox: &Bbox) -> bool {
        let x_inside = |x: f32| x >= self.x_min && x <= self.x_max;
        let y_inside = |y: f32| y >= self.y_min && y <= self.y_max;
        x_inside(bbox.xmin) && x_inside(bbox.xmax) && y_inside(bbox.ymin) && y_inside(bbox.ymax)
    }
}

/// Drop detections not fully inside the constraint rectangle.
///
/// Frames are never removed; a frame whose detections all fall outside
/// simply becomes empty.
pub fn apply_constraints(frames: &[Frame], constraints: &Constraints) -> FrameTable {
    frames
        .par_iter()
        .map(|tracks| {
            tracks
                .iter()
                .filter(|track| constraints.contains(&track.bbox))
                .cloned()
                .collect()
        })
        .collect()
}
