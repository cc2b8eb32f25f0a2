//! Identity link generation and transitive collapse
//!
//! When a tracker loses an object and re-acquires it, the object comes
//! back under a fresh id while the old id is still coasting nearby for
//! a few frames. `generate_links` proposes a merge for every such pair;
//! `propagate_links` collapses chains of merges into direct mappings.

use crate::bbox::center_distance;
use crate::detection::{frame_ids, Frame};
use crate::error::{Result, StitchError};
use std::collections::BTreeMap;

/// Maps a swapped id to the id it should be merged into
pub type LinkTable = BTreeMap<u32, u32>;

/// Scan consecutive frames for ids that newly appear within `max_gap`
/// pixels of a coasting track and propose merging them.
///
/// Only coasting candidates (no detection confidence) are eligible to
/// receive a new identity; the nearest one wins, with ties going to the
/// smaller id. Frames following an empty frame are only adopted as the
/// next candidate pool, never matched.
pub fn generate_links(frames: &[Frame], max_gap: f32) -> LinkTable {
    let mut links = LinkTable::new();
    let Some(mut last_tracks) = frames.first() else {
        return links;
    };

    for tracks in &frames[1..] {
        // without a candidate pool there is nothing to match against
        if last_tracks.is_empty() {
            last_tracks = tracks;
            continue;
        }

        let old_ids = frame_ids(last_tracks);
        let cur_ids = frame_ids(tracks);
        if cur_ids.is_subset(&old_ids) {
            last_tracks = tracks;
            continue;
        }

        for track in tracks {
            if old_ids.contains(&track.id) {
                continue;
            }

            let nearest = last_tracks
                .iter()
                .filter(|candidate| candidate.is_coasting())
                .map(|candidate| {
                    (candidate.id, center_distance(&track.bbox, &candidate.bbox))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

            if let Some((candidate_id, distance)) = nearest {
                if distance <= max_gap {
                    links.insert(track.id, candidate_id);
                }
            }
        }

        last_tracks = tracks;
    }

    links
}

/// Collapse every chain `k -> links[k] -> ...` to its root id.
///
/// A cycle in the table means the input was malformed; it is reported
/// as an error rather than silently broken.
pub fn propagate_links(links: &LinkTable) -> Result<LinkTable> {
    let mut collapsed = LinkTable::new();
    for (&swapped, &target) in links {
        let mut root = target;
        let mut hops = 0usize;
        while let Some(&next) = links.get(&root) {
            if next == root {
                break;
            }
            root = next;
            hops += 1;
            if hops > links.len() {
                return Err(StitchError::CyclicLink { id: swapped });
            }
        }
        collapsed.insert(swapped, root);
    }
    Ok(collapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::Bbox;
    use crate::detection::Detection;

    fn det(id: u32, confidence: Option<f32>, x1: f32, y1: f32, x2: f32, y2: f32) -> Detection {
        Detection::new(id, confidence, Bbox::new(x1, y1, x2, y2))
    }

    #[test]
    fn test_link_proposed_for_reacquired_id() {
        // track 1 is matched in frame 0, coasts in frame 1, and comes
        // back as id 5 right next to the coasted position in frame 2
        let frames = vec![
            vec![det(1, Some(0.9), 0.0, 0.0, 2.0, 2.0)],
            vec![det(1, None, 0.0, 0.0, 2.0, 2.0)],
            vec![det(5, Some(0.8), 1.0, 1.0, 3.0, 3.0)],
        ];
        let links = generate_links(&frames, 3.0);
        assert_eq!(links.len(), 1);
        assert_eq!(links.get(&5), Some(&1));
    }

    #[test]
    fn test_confident_candidates_are_ineligible() {
        // the old track is still being matched, so the new id must be a
        // genuinely new object
        let frames = vec![
            vec![det(1, Some(0.9), 0.0, 0.0, 2.0, 2.0)],
            vec![det(5, Some(0.8), 1.0, 1.0, 3.0, 3.0)],
        ];
        assert!(generate_links(&frames, 3.0).is_empty());
    }

    #[test]
    fn test_no_link_beyond_max_gap() {
        let frames = vec![
            vec![det(1, None, 0.0, 0.0, 2.0, 2.0)],
            vec![det(5, Some(0.8), 50.0, 50.0, 52.0, 52.0)],
        ];
        assert!(generate_links(&frames, 3.0).is_empty());
    }

    #[test]
    fn test_nearest_candidate_wins() {
        let frames = vec![
            vec![
                det(7, None, 10.0, 10.0, 12.0, 12.0),
                det(9, None, 0.0, 0.0, 2.0, 2.0),
            ],
            vec![det(5, Some(0.8), 0.5, 0.5, 2.5, 2.5)],
        ];
        let links = generate_links(&frames, 30.0);
        assert_eq!(links.get(&5), Some(&9));
    }

    #[test]
    fn test_equidistant_tie_breaks_toward_smaller_id() {
        let frames = vec![
            vec![
                det(9, None, 2.0, 0.0, 4.0, 2.0),
                det(4, None, -2.0, 0.0, 0.0, 2.0),
            ],
            vec![det(5, Some(0.8), 0.0, 0.0, 2.0, 2.0)],
        ];
        let links = generate_links(&frames, 30.0);
        assert_eq!(links.get(&5), Some(&4));
    }

    #[test]
    fn test_ids_after_empty_frame_are_not_matched() {
        // the frame after an empty frame only becomes the next pool
        let frames = vec![
            vec![],
            vec![det(2, None, 0.0, 0.0, 2.0, 2.0)],
        ];
        assert!(generate_links(&frames, 3.0).is_empty());
    }

    #[test]
    fn test_propagate_collapses_chains() {
        let links = LinkTable::from([(3, 2), (2, 1)]);
        let collapsed = propagate_links(&links).unwrap();
        assert_eq!(collapsed, LinkTable::from([(3, 1), (2, 1)]));
    }

    #[test]
    fn test_propagate_is_idempotent() {
        let links = LinkTable::from([(9, 7), (7, 4), (4, 1), (6, 2)]);
        let once = propagate_links(&links).unwrap();
        let twice = propagate_links(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_propagate_reports_cycles() {
        let links = LinkTable::from([(1, 2), (2, 1)]);
        let err = propagate_links(&links).unwrap_err();
        assert!(matches!(err, StitchError::CyclicLink { .. }));
    }
}
