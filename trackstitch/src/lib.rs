//! Pure Rust track identity repair and gap interpolation
//!
//! Multi-object trackers occasionally lose an object and re-acquire it
//! under a fresh id, leaving one physical object split across several
//! identities with missing frames in between. This crate repairs such
//! detection tables entirely in memory:
//!
//! - [`generate_links`] / [`propagate_links`] propose identity merges
//!   between newly appeared ids and nearby coasting tracks, then
//!   collapse merge chains into direct mappings
//! - [`apply_links`] rewrites ids and drops discarded tracks
//! - [`apply_constraints`] removes detections outside a working region
//! - [`find_gaps`] / [`fill_gaps`] detect missing-frame runs and fill
//!   them with linearly interpolated points
//!
//! ```rust,ignore
//! use trackstitch::{apply_links, generate_links, propagate_links};
//!
//! let links = propagate_links(&generate_links(&frames, 3.0))?;
//! let repaired = apply_links(&frames, &links);
//! ```

pub mod bbox;
pub mod constraints;
pub mod detection;
pub mod error;
pub mod gaps;
pub mod links;
pub mod reconcile;

pub use bbox::{center_distance, Bbox};
pub use constraints::{apply_constraints, Constraints};
pub use detection::{frame_ids, Detection, Frame, FrameTable};
pub use error::{Result, StitchError};
pub use gaps::{fill_gaps, find_gaps, GapRun, TrackGaps};
pub use links::{generate_links, propagate_links, LinkTable};
pub use reconcile::{apply_links, filter_by_ids, DISCARD_ID};
