//! Id rewriting and id-based selection over a detection table

use crate::detection::{Detection, Frame, FrameTable};
use crate::links::LinkTable;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Resolved id that marks a detection for removal
pub const DISCARD_ID: u32 = 0;

/// Rewrite detection ids through a collapsed link table.
///
/// Detections whose resolved id is [`DISCARD_ID`] are dropped. When
/// several detections in one frame resolve to the same id, the last one
/// in input order wins. Detections within each output frame are ordered
/// by ascending id.
pub fn apply_links(frames: &[Frame], links: &LinkTable) -> FrameTable {
    frames
        .iter()
        .map(|tracks| {
            let mut fixed: BTreeMap<u32, Detection> = BTreeMap::new();
            for track in tracks {
                let id = links.get(&track.id).copied().unwrap_or(track.id);
                if id == DISCARD_ID {
                    continue;
                }
                fixed.insert(id, Detection { id, ..track.clone() });
            }
            fixed.into_values().collect()
        })
        .collect()
}

/// Keep only detections whose id is in `requested`.
///
/// An empty request set selects everything (identity), so callers can
/// pass an unset export list straight through.
pub fn filter_by_ids(frames: &[Frame], requested: &BTreeSet<u32>) -> FrameTable {
    if requested.is_empty() {
        return frames.to_vec();
    }
    frames
        .par_iter()
        .map(|tracks| {
            tracks
                .iter()
                .filter(|track| requested.contains(&track.id))
                .cloned()
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::Bbox;

    fn det(id: u32, confidence: Option<f32>, x1: f32, y1: f32, x2: f32, y2: f32) -> Detection {
        Detection::new(id, confidence, Bbox::new(x1, y1, x2, y2))
    }

    #[test]
    fn test_links_rewrite_ids() {
        let frames = vec![vec![det(5, Some(0.8), 1.0, 1.0, 3.0, 3.0)]];
        let links = LinkTable::from([(5, 1)]);
        let fixed = apply_links(&frames, &links);
        assert_eq!(fixed[0].len(), 1);
        assert_eq!(fixed[0][0].id, 1);
        assert_eq!(fixed[0][0].bbox, Bbox::new(1.0, 1.0, 3.0, 3.0));
    }

    #[test]
    fn test_discard_id_removes_detections() {
        let frames = vec![vec![
            det(3, Some(0.7), 0.0, 0.0, 1.0, 1.0),
            det(0, Some(0.9), 5.0, 5.0, 6.0, 6.0),
            det(4, Some(0.6), 2.0, 2.0, 3.0, 3.0),
        ]];
        // linking 3 to 0 deletes the track; raw id 0 is dropped as well
        let links = LinkTable::from([(3, 0)]);
        let fixed = apply_links(&frames, &links);
        assert_eq!(fixed[0].len(), 1);
        assert_eq!(fixed[0][0].id, 4);
    }

    #[test]
    fn test_colliding_ids_keep_last_detection() {
        let frames = vec![vec![
            det(2, Some(0.5), 0.0, 0.0, 1.0, 1.0),
            det(7, Some(0.9), 4.0, 4.0, 5.0, 5.0),
        ]];
        let links = LinkTable::from([(7, 2)]);
        let fixed = apply_links(&frames, &links);
        assert_eq!(fixed[0].len(), 1);
        assert_eq!(fixed[0][0].id, 2);
        assert_eq!(fixed[0][0].bbox, Bbox::new(4.0, 4.0, 5.0, 5.0));
    }

    #[test]
    fn test_output_is_ordered_by_id() {
        let frames = vec![vec![
            det(9, Some(0.5), 0.0, 0.0, 1.0, 1.0),
            det(4, Some(0.5), 2.0, 2.0, 3.0, 3.0),
            det(7, Some(0.5), 4.0, 4.0, 5.0, 5.0),
        ]];
        let fixed = apply_links(&frames, &LinkTable::new());
        let ids: Vec<u32> = fixed[0].iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 7, 9]);
    }

    #[test]
    fn test_filter_by_ids_containment() {
        let frames = vec![
            vec![det(1, Some(0.9), 0.0, 0.0, 1.0, 1.0), det(2, None, 2.0, 2.0, 3.0, 3.0)],
            vec![det(2, Some(0.8), 2.0, 2.0, 3.0, 3.0)],
        ];
        let requested = BTreeSet::from([1]);
        let filtered = filter_by_ids(&frames, &requested);
        for frame in &filtered {
            assert!(frame.iter().all(|track| requested.contains(&track.id)));
        }
        assert_eq!(filtered[0].len(), 1);
        assert!(filtered[1].is_empty());
    }

    #[test]
    fn test_filter_by_empty_set_is_identity() {
        let frames = vec![
            vec![det(1, Some(0.9), 0.0, 0.0, 1.0, 1.0)],
            vec![],
            vec![det(2, None, 2.0, 2.0, 3.0, 3.0)],
        ];
        assert_eq!(filter_by_ids(&frames, &BTreeSet::new()), frames);
    }
}
