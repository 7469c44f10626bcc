//! `streethenge scan`: alignment dates for every street in a bounding box.

use anyhow::{Context, Result};

use crate::args::RunOptions;
use crate::output::{AlignmentRecord, write_json, write_scan_text};
use crate::scan::{AlignmentScanner, ScanOptions};
use crate::solar::SunriseOracle;
use crate::streets::OverpassProvider;

/// Handle the scan command.
pub fn handle_scan_command(options: &RunOptions, bbox: [f64; 4]) -> Result<()> {
    log_version!();
    let config = super::load_config(options)?;
    let request = super::resolve_bbox(bbox, &config)?;

    let provider = OverpassProvider::new(config.overpass_config())
        .context("Failed to set up the street data client")?;
    let scanner = AlignmentScanner::new(ScanOptions {
        workers: config.workers(),
    });

    let (results, summary) = scanner
        .scan_with_summary(
            &provider,
            &SunriseOracle::new(),
            &request.bbox,
            request.year,
            request.tolerance,
        )
        .with_context(|| format!("Scan of {} failed", request.bbox))?;
    log_end!();

    let records: Vec<AlignmentRecord> = results.iter().map(AlignmentRecord::from).collect();

    let mut stdout = std::io::stdout().lock();
    if options.json {
        write_json(&mut stdout, &records)
    } else {
        write_scan_text(&mut stdout, &records, &summary)
    }
}
