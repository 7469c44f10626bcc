//! Configuration system for streethenge.
//!
//! Settings live in an optional TOML file. Every field is optional and falls
//! back to a built-in default, so running without a configuration file is the
//! normal case. Command-line flags override whatever the file says.
//!
//! ## Configuration Source
//!
//! The file is looked up as `streethenge.toml` in:
//! 1. The directory passed with `--config <dir>`, if any
//! 2. `$XDG_CONFIG_HOME/streethenge/` (via `dirs::config_dir()`)
//!
//! ## Configuration Structure
//!
//! ```toml
//! #[Search]
//! year = 2025          # Year to search (defaults to the current year)
//! tolerance = 2.0      # Alignment window in degrees (0-180)
//!
//! #[Scan]
//! workers = 4          # Worker threads for bounding-box scans (1-64)
//!
//! #[Street data]
//! overpass_url = "https://overpass-api.de/api/interpreter"
//! request_timeout = 120  # Seconds (5-600)
//! ```
//!
//! ## Validation
//!
//! Values are range-checked on load; an out-of-range value is an error that
//! names the field and its allowed range.

pub mod loading;
pub mod validation;

use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::*;
use crate::streets::OverpassConfig;

pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};

/// Settings loaded from `streethenge.toml`.
///
/// Unset fields resolve to defaults through the accessor methods; the raw
/// `Option`s are kept so that the log can show which values came from the file.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Calendar year to search. Defaults to the current UTC year.
    pub year: Option<i32>,
    /// Half-width of the alignment window in degrees.
    pub tolerance: Option<f64>,
    /// Maximum number of worker threads for bounding-box scans.
    pub workers: Option<usize>,
    /// Overpass API interpreter endpoint.
    pub overpass_url: Option<String>,
    /// Timeout for street data requests, in seconds.
    pub request_timeout: Option<u64>,
}

impl Config {
    /// Load configuration using the module's load function
    pub fn load() -> anyhow::Result<Self> {
        load()
    }

    /// Load from path using the module's load_from_path function
    pub fn load_from_path(path: &PathBuf) -> anyhow::Result<Self> {
        load_from_path(path)
    }

    pub fn year(&self) -> i32 {
        self.year.unwrap_or_else(|| Utc::now().year())
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }

    pub fn workers(&self) -> usize {
        self.workers.unwrap_or_else(default_workers)
    }

    pub fn overpass_config(&self) -> OverpassConfig {
        let defaults = OverpassConfig::default();
        OverpassConfig {
            url: self.overpass_url.clone().unwrap_or(defaults.url),
            timeout: self
                .request_timeout
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            user_agent: defaults.user_agent,
        }
    }

    /// Log the effective settings, marking defaults.
    pub fn log_config(&self, source: Option<&PathBuf>) {
        match source {
            Some(path) => log_block_start!("Loaded configuration from {}", path.display()),
            None => log_block_start!("Using default configuration"),
        }

        let origin = |set: bool| if set { "" } else { " (default)" };
        log_indented!("Year: {}{}", self.year(), origin(self.year.is_some()));
        log_indented!(
            "Tolerance: ±{}°{}",
            self.tolerance(),
            origin(self.tolerance.is_some())
        );
        log_indented!("Workers: {}{}", self.workers(), origin(self.workers.is_some()));

        let overpass = self.overpass_config();
        log_indented!(
            "Street data: {}{}",
            overpass.url,
            origin(self.overpass_url.is_some())
        );
        log_indented!(
            "Request timeout: {} seconds{}",
            overpass.timeout.as_secs(),
            origin(self.request_timeout.is_some())
        );
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(MINIMUM_WORKERS)
        .clamp(MINIMUM_WORKERS, DEFAULT_WORKER_CAP)
}
