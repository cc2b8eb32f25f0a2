//! Pipeline driver sequencing the repair stages over a loaded table

use crate::config::PostprocessConfig;
use crate::error::Result;
use std::collections::BTreeSet;
use trackstitch::{
    apply_constraints, apply_links, fill_gaps, filter_by_ids, find_gaps, generate_links,
    propagate_links, FrameTable, LinkTable,
};

/// Repaired table together with the collapsed link table that produced
/// it; the links are needed later to resolve export ids
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub frames: FrameTable,
    pub links: LinkTable,
}

/// Run the full repair pipeline over a raw detection table.
///
/// `width` and `height` are the video dimensions, used to resolve the
/// configured margins into the constraint rectangle.
pub fn run(
    frames: &FrameTable,
    config: &PostprocessConfig,
    width: f32,
    height: f32,
) -> Result<PipelineOutput> {
    let links = generate_links(frames, config.max_tracks_gap);
    log::info!("proposed {} identity links", links.len());
    for (swapped, target) in &links {
        log::debug!("link {} -> {}", swapped, target);
    }
    let links = propagate_links(&links)?;

    let mut data = apply_links(frames, &links);

    let constraints = config.margins.resolve(width, height);
    let before: usize = data.iter().map(Vec::len).sum();
    data = apply_constraints(&data, &constraints);
    let after: usize = data.iter().map(Vec::len).sum();
    log::debug!(
        "constraint filter removed {} of {} detections",
        before - after,
        before
    );

    let (start, end) = config.time_bounds.resolve(data.len());
    for (frame_number, frame) in data.iter_mut().enumerate() {
        if frame_number < start || frame_number >= end {
            frame.clear();
        }
    }

    let gaps = find_gaps(&data);
    log::info!("interpolating gaps for {} tracks", gaps.len());
    let frames = fill_gaps(&data, &gaps)?;

    Ok(PipelineOutput { frames, links })
}

/// Resolve requested export ids through the link table, so asking for a
/// swapped id yields its merged track
pub fn resolve_export_ids(links: &LinkTable, requested: &BTreeSet<u32>) -> BTreeSet<u32> {
    requested
        .iter()
        .map(|id| links.get(id).copied().unwrap_or(*id))
        .collect()
}

/// Restrict the repaired table to the configured export ids; an empty
/// request keeps every track
pub fn select_for_export(output: &PipelineOutput, requested: &BTreeSet<u32>) -> FrameTable {
    if requested.is_empty() {
        return output.frames.clone();
    }
    let resolved = resolve_export_ids(&output.links, requested);
    filter_by_ids(&output.frames, &resolved)
}
