//! `streethenge streets`: street segments that point along an azimuth.
//!
//! No solar work happens here; this is the quick way to see which streets a
//! given sunrise or sunset bearing would line up with.

use anyhow::{Context, Result};

use crate::alignment::street_directions;
use crate::args::RunOptions;
use crate::output::{StreetRecord, write_json, write_streets_text};
use crate::streets::{
    OverpassProvider, StreetGraphProvider, StreetSegment, filter_segments_by_azimuth,
};

/// Handle the streets command.
pub fn handle_streets_command(
    options: &RunOptions,
    bbox: [f64; 4],
    azimuth: f64,
    single_direction: bool,
) -> Result<()> {
    log_version!();
    let config = super::load_config(options)?;
    let request = super::resolve_bbox(bbox, &config)?;

    let provider = OverpassProvider::new(config.overpass_config())
        .context("Failed to set up the street data client")?;

    log_block_start!("Fetching street segments for {}", request.bbox);
    let records = provider
        .fetch_segments(&request.bbox)
        .with_context(|| format!("Fetching streets for {} failed", request.bbox))?;

    let mut segments = Vec::with_capacity(records.len());
    for record in &records {
        match StreetSegment::from_record(record) {
            Ok(segment) => segments.push(segment),
            Err(error) => log_warning!("Skipping segment {}: {}", record.id, error),
        }
    }

    let targets = if single_direction {
        vec![azimuth]
    } else {
        street_directions(azimuth).to_vec()
    };
    let matched = filter_segments_by_azimuth(&segments, &targets, request.tolerance);
    log_decorated!(
        "{} of {} segments within ±{}° of {}",
        matched.len(),
        segments.len(),
        request.tolerance,
        azimuth
    );
    log_end!();

    let output: Vec<StreetRecord> = matched.iter().map(StreetRecord::from).collect();

    let mut stdout = std::io::stdout().lock();
    if options.json {
        write_json(&mut stdout, &output)
    } else {
        write_streets_text(&mut stdout, &output)
    }
}
