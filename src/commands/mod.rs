//! Command-line command handlers for streethenge.
//!
//! Each command lives in its own submodule. They share configuration
//! resolution: the TOML file first, then command-line overrides, then
//! validation of the merged result.

pub mod point;
pub mod scan;
pub mod streets;

use anyhow::{Context, Result};

use crate::args::RunOptions;
use crate::config::{self, Config};
use crate::logger::Log;
use crate::output::{ResolvedScan, ScanRequest};

/// Load the configuration and apply command-line overrides.
pub(crate) fn load_config(options: &RunOptions) -> Result<Config> {
    Log::set_debug(options.debug_enabled);
    if options.debug_enabled {
        log_pipe!();
        log_debug!("Debug mode enabled");
    }

    config::set_config_dir(options.config_dir.clone())?;
    let config_path = config::get_config_path()?;

    let mut config = Config::load()?;
    let from_file = config_path.exists().then_some(&config_path);

    config.year = options.year.or(config.year);
    config.tolerance = options.tolerance.or(config.tolerance);
    config.workers = options.workers.or(config.workers);
    config::validation::validate_config(&config).context("Invalid command-line option")?;

    config.log_config(from_file);
    Ok(config)
}

/// Box from command-line corners, with year and tolerance from `config`.
pub(crate) fn resolve_bbox(bbox: [f64; 4], config: &Config) -> Result<ResolvedScan> {
    let [min_lat, min_lon, max_lat, max_lon] = bbox;
    let request = ScanRequest {
        min_lat,
        min_lon,
        max_lat,
        max_lon,
        year: None,
        tolerance: None,
    };
    Ok(request.resolve(config)?)
}
