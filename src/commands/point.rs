//! `streethenge point`: alignment dates for a single street direction.

use anyhow::Result;

use crate::alignment::{find_alignments_with_stats, street_directions};
use crate::args::RunOptions;
use crate::geo::Location;
use crate::output::{PointReport, write_json, write_point_text};
use crate::solar::SunriseOracle;

/// Handle the point command.
pub fn handle_point_command(
    options: &RunOptions,
    latitude: f64,
    longitude: f64,
    azimuth: f64,
    single_direction: bool,
) -> Result<()> {
    log_version!();
    let config = super::load_config(options)?;

    let location = Location::new(latitude, longitude)?;
    let (year, tolerance) = (config.year(), config.tolerance());
    let oracle = SunriseOracle::new();

    log_block_start!(
        "Searching {year} at {location} for azimuth {azimuth}°{}",
        if single_direction { "" } else { " and its reverse" }
    );

    let targets = if single_direction {
        vec![azimuth]
    } else {
        street_directions(azimuth).to_vec()
    };
    let (alignment_dates, stats) =
        find_alignments_with_stats(&oracle, location, &targets, year, tolerance)?;
    log_debug!(
        "{} days searched, {} events absent, {} computations failed",
        stats.days,
        stats.missing_events,
        stats.failed_events
    );
    log_decorated!("{} alignment dates found", alignment_dates.len());
    log_end!();

    let report = PointReport {
        latitude,
        longitude,
        azimuth,
        tolerance,
        year,
        alignment_dates,
    };

    let mut stdout = std::io::stdout().lock();
    if options.json {
        write_json(&mut stdout, &report)
    } else {
        write_point_text(&mut stdout, &report)
    }
}
