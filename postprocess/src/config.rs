//! Caller-facing configuration for the post-processing pipeline

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use trackstitch::Constraints;

/// Default distance threshold for merging a new id into a coasting track
pub const DEFAULT_MAX_TRACKS_GAP: f32 = 3.0;

/// Inward margins from the video edges, in pixels; an unset edge means
/// no margin
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
}

impl Margins {
    /// Convert margins to the constraint rectangle for a video of the
    /// given dimensions.
    ///
    /// Bounds are clamped into the frame and swapped when oversized
    /// margins cross each other, so user input can never produce an
    /// unsatisfiable rectangle.
    pub fn resolve(&self, width: f32, height: f32) -> Constraints {
        let mut x_min = self.left.unwrap_or(0.0).clamp(0.0, width - 1.0);
        let mut x_max = (width - self.right.unwrap_or(0.0) - 1.0).clamp(0.0, width - 1.0);
        let mut y_min = self.top.unwrap_or(0.0).clamp(0.0, height - 1.0);
        let mut y_max = (height - self.bottom.unwrap_or(0.0) - 1.0).clamp(0.0, height - 1.0);
        if x_max < x_min {
            std::mem::swap(&mut x_min, &mut x_max);
        }
        if y_max < y_min {
            std::mem::swap(&mut y_min, &mut y_max);
        }
        Constraints::new(x_min, x_max, y_min, y_max)
    }
}

/// Frame range to keep, end exclusive; unset bounds mean the whole video
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeBounds {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl TimeBounds {
    /// Clamp the bounds into `[0, total_frames]`, swapping them when
    /// inverted
    pub fn resolve(&self, total_frames: usize) -> (usize, usize) {
        let mut start = self.start.unwrap_or(0).min(total_frames);
        let mut end = self.end.unwrap_or(total_frames).min(total_frames);
        if end < start {
            std::mem::swap(&mut start, &mut end);
        }
        (start, end)
    }
}

/// Configuration for the post-processing pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostprocessConfig {
    /// Maximum center distance for merging a new id into a coasting
    /// track
    pub max_tracks_gap: f32,
    /// Inward margins defining the working region
    pub margins: Margins,
    /// Frame range to keep
    pub time_bounds: TimeBounds,
    /// Ids to keep when exporting; empty keeps everything
    pub export_ids: BTreeSet<u32>,
}

impl Default for PostprocessConfig {
    fn default() -> Self {
        Self {
            max_tracks_gap: DEFAULT_MAX_TRACKS_GAP,
            margins: Margins::default(),
            time_bounds: TimeBounds::default(),
            export_ids: BTreeSet::new(),
        }
    }
}

impl PostprocessConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(serde_json::from_reader(File::open(path)?)?)
    }
}
