//! CSV persistence for frame-indexed track data
//!
//! Schema: `FRAME_NUMBER, ID, CONFIDENCE, X1, Y1, X2, Y2`. A frame with
//! no detections is written as a row holding only the frame number, so
//! the full frame range survives a round-trip. An empty CONFIDENCE
//! field marks a coasting or interpolated detection.

use crate::error::{PostprocessError, Result};
use std::fs::File;
use std::io;
use std::path::Path;
use trackstitch::{Bbox, Detection, FrameTable};

const HEADER: [&str; 7] = ["FRAME_NUMBER", "ID", "CONFIDENCE", "X1", "Y1", "X2", "Y2"];

/// Write a detection table to a CSV writer, frames in order
pub fn write_tracks<W: io::Write>(table: &FrameTable, writer: W) -> Result<()> {
    let mut out = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    out.write_record(HEADER)?;
    for (frame_number, tracks) in table.iter().enumerate() {
        if tracks.is_empty() {
            out.write_record([frame_number.to_string()])?;
            continue;
        }
        for track in tracks {
            out.write_record([
                frame_number.to_string(),
                track.id.to_string(),
                track.confidence.map(|c| c.to_string()).unwrap_or_default(),
                track.bbox.xmin.to_string(),
                track.bbox.ymin.to_string(),
                track.bbox.xmax.to_string(),
                track.bbox.ymax.to_string(),
            ])?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Write a detection table to a CSV file
pub fn write_tracks_to_file<P: AsRef<Path>>(table: &FrameTable, path: P) -> Result<()> {
    write_tracks(table, File::create(path)?)
}

/// Read a detection table from a CSV reader.
///
/// Frame numbers absent from the file become empty frames so the table
/// stays contiguous; sparse tracker output is tolerated rather than
/// rejected.
pub fn read_tracks<R: io::Read>(reader: R) -> Result<FrameTable> {
    let mut input = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let mut table = FrameTable::new();
    for record in input.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let frame_number: usize = parse_field(&record, 0, line)?;
        while table.len() <= frame_number {
            table.push(Vec::new());
        }

        if record.len() == 1 {
            continue; // explicitly empty frame
        }
        if record.len() != HEADER.len() {
            return Err(PostprocessError::malformed(
                line,
                format!("expected {} fields, got {}", HEADER.len(), record.len()),
            ));
        }

        let id: u32 = parse_field(&record, 1, line)?;
        let confidence = match record.get(2).map(str::trim) {
            None | Some("") => None,
            Some(_) => Some(parse_field(&record, 2, line)?),
        };
        let x1: f32 = parse_field(&record, 3, line)?;
        let y1: f32 = parse_field(&record, 4, line)?;
        let x2: f32 = parse_field(&record, 5, line)?;
        let y2: f32 = parse_field(&record, 6, line)?;

        table[frame_number].push(Detection::new(id, confidence, Bbox::new(x1, y1, x2, y2)));
    }
    Ok(table)
}

/// Read a detection table from a CSV file
pub fn read_tracks_from_file<P: AsRef<Path>>(path: P) -> Result<FrameTable> {
    read_tracks(File::open(path)?)
}

fn parse_field<T>(record: &csv::StringRecord, index: usize, line: u64) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = record.get(index).ok_or_else(|| {
        PostprocessError::malformed(line, format!("missing {} field", HEADER[index]))
    })?;
    raw.trim().parse().map_err(|err| {
        PostprocessError::malformed(line, format!("bad {} value {:?}: {}", HEADER[index], raw, err))
    })
}
