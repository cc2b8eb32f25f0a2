use trackstitch::{
    apply_links, fill_gaps, find_gaps, generate_links, propagate_links, Bbox, Detection,
};

fn main() -> anyhow::Result<()> {
    println!("Repairing a clip where track 1 is lost and re-acquired as id 5...");

    // Frames 0-1: track 1 is matched, then coasts (no confidence).
    // Frame 2: the tracker drops track 1 and starts id 5 right next to
    // the coasted position. Frames 3-4: id 5 disappears and returns,
    // leaving a one-frame gap.
    let frames = vec![
        vec![Detection::new(1, Some(0.92), Bbox::new(10.0, 10.0, 14.0, 14.0))],
        vec![Detection::new(1, None, Bbox::new(11.0, 10.5, 15.0, 14.5))],
        vec![Detection::new(5, Some(0.88), Bbox::new(12.0, 11.0, 16.0, 15.0))],
        vec![],
        vec![Detection::new(5, Some(0.90), Bbox::new(16.0, 13.0, 20.0, 17.0))],
    ];

    let links = generate_links(&frames, 3.0);
    println!("\nProposed links:");
    for (swapped, target) in &links {
        println!("  {} -> {}", swapped, target);
    }

    let links = propagate_links(&links)?;
    let repaired = apply_links(&frames, &links);

    let gaps = find_gaps(&repaired);
    println!("\nGaps after reconciliation:");
    for track in &gaps {
        for run in &track.runs {
            println!(
                "  id {}: frames {}..={} missing",
                track.id, run.start, run.end
            );
        }
    }

    let filled = fill_gaps(&repaired, &gaps)?;
    println!("\nRepaired table:");
    for (frame_number, frame) in filled.iter().enumerate() {
        for track in frame {
            let confidence = track
                .confidence
                .map(|c| format!("{:.2}", c))
                .unwrap_or_else(|| "----".to_string());
            println!(
                "  frame {}: id {} conf {} {}",
                frame_number, track.id, confidence, track.bbox
            );
        }
    }

    Ok(())
}
