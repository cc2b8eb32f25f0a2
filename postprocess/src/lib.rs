//! Track post-processing for fly-behavior video experiments
//!
//! Loads the raw per-frame CSV emitted by the tracking stage, repairs
//! identity swaps and trajectory gaps with [`trackstitch`], applies the
//! configured working-region and time constraints, and writes the
//! repaired table back out in the same CSV schema.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod storage;

pub use config::{Margins, PostprocessConfig, TimeBounds, DEFAULT_MAX_TRACKS_GAP};
pub use error::{PostprocessError, Result};
pub use pipeline::{resolve_export_ids, run, select_for_export, PipelineOutput};
pub use storage::{read_tracks, read_tracks_from_file, write_tracks, write_tracks_to_file};
