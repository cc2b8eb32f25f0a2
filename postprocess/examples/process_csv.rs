/// Example: repair a raw tracking CSV and write the result next to it
///
/// Usage:
///   cargo run --example process_csv <raw_csv> <width> <height> [output_csv]
use flytrack_postprocess as postprocess;
use flytrack_postprocess::PostprocessConfig;
use std::env;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("usage: process_csv <raw_csv> <width> <height> [output_csv]");
        std::process::exit(1);
    }
    let input = &args[1];
    let width: f32 = args[2].parse()?;
    let height: f32 = args[3].parse()?;
    let output = args
        .get(4)
        .cloned()
        .unwrap_or_else(|| format!("{}_result.csv", input.trim_end_matches(".csv")));

    let frames = postprocess::read_tracks_from_file(input)?;
    let detections: usize = frames.iter().map(Vec::len).sum();
    println!(
        "loaded {} frames ({} detections) from {}",
        frames.len(),
        detections,
        input
    );

    let config = PostprocessConfig::default();
    let result = postprocess::run(&frames, &config, width, height)?;
    println!("collapsed {} identity links", result.links.len());
    for (swapped, target) in &result.links {
        println!("  {:<5} -> {:>5}", swapped, target);
    }

    let export = postprocess::select_for_export(&result, &config.export_ids);
    postprocess::write_tracks_to_file(&export, &output)?;
    println!("wrote {}", output);

    Ok(())
}
