//! Trajectory gap detection and linear interpolation

use crate::detection::{Detection, Frame, FrameTable};
use crate::error::{Result, StitchError};
use ndarray::Array1;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Maximal run of consecutive frames missing from a track, bounds
/// inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapRun {
    pub start: usize,
    pub end: usize,
}

impl GapRun {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of missing frames in the run
    pub fn frame_count(&self) -> usize {
        self.end - self.start + 1
    }

    /// The missing frame numbers, in order
    pub fn frames(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// All gap runs for one track id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackGaps {
    pub id: u32,
    pub runs: Vec<GapRun>,
}

/// Find, per id, the maximal runs of frames where the id is absent
/// between its first and last appearance.
///
/// Ids without gaps contribute no entry; results are ascending by id.
pub fn find_gaps(frames: &[Frame]) -> Vec<TrackGaps> {
    let mut appearances: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (frame_number, tracks) in frames.iter().enumerate() {
        for track in tracks {
            appearances.entry(track.id).or_default().push(frame_number);
        }
    }

    let mut gaps = Vec::new();
    for (id, observed) in appearances {
        let runs: Vec<GapRun> = observed
            .windows(2)
            .filter(|pair| pair[1] > pair[0] + 1)
            .map(|pair| GapRun::new(pair[0] + 1, pair[1] - 1))
            .collect();
        if !runs.is_empty() {
            gaps.push(TrackGaps { id, runs });
        }
    }
    gaps
}

/// Interpolate synthetic detections across every gap run.
///
/// For a run of `n` missing frames, the segment between the centers of
/// the detections bounding the run is sampled at `n + 2` evenly spaced
/// points and the two endpoints are discarded, leaving strictly
/// interior positions. Each inserted detection is a zero-area box with
/// no confidence, and every modified frame is kept ordered by id.
pub fn fill_gaps(frames: &[Frame], gaps: &[TrackGaps]) -> Result<FrameTable> {
    let mut result: FrameTable = frames.to_vec();

    for track in gaps {
        for run in &track.runs {
            let before = run.start.checked_sub(1).ok_or(StitchError::MissingBoundary {
                id: track.id,
                frame: run.start,
            })?;
            let after = run.end + 1;

            let (x0, y0) = boundary_center(&result, track.id, before)?;
            let (x1, y1) = boundary_center(&result, track.id, after)?;

            let samples = run.frame_count() + 2;
            let xs = Array1::linspace(x0, x1, samples);
            let ys = Array1::linspace(y0, y1, samples);

            for (offset, frame_number) in run.frames().enumerate() {
                let detection =
                    Detection::interpolated(track.id, xs[offset + 1], ys[offset + 1]);
                let frame = &mut result[frame_number];
                frame.push(detection);
                frame.sort_by_key(|t| t.id);
            }
        }
    }

    Ok(result)
}

/// Center of `id`'s detection in a gap's bounding frame; the detection
/// must exist for the gap to be well formed
fn boundary_center(frames: &[Frame], id: u32, frame_number: usize) -> Result<(f32, f32)> {
    frames
        .get(frame_number)
        .and_then(|frame| frame.iter().find(|track| track.id == id))
        .map(|track| track.bbox.center())
        .ok_or(StitchError::MissingBoundary {
            id,
            frame: frame_number,
        })
}
