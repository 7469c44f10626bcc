//! Configuration validation functionality.
//!
//! Rejects values that would make a search meaningless or a scan misbehave,
//! with messages naming the field and its allowed range.

use anyhow::Result;

use super::Config;
use crate::constants::*;

/// Validate every field that is set.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(year) = config.year
        && !(MINIMUM_YEAR..=MAXIMUM_YEAR).contains(&year)
    {
        anyhow::bail!(
            "year ({}) must be between {} and {}",
            year,
            MINIMUM_YEAR,
            MAXIMUM_YEAR
        );
    }

    if let Some(tolerance) = config.tolerance {
        validate_tolerance(tolerance)?;
    }

    if let Some(workers) = config.workers
        && !(MINIMUM_WORKERS..=MAXIMUM_WORKERS).contains(&workers)
    {
        anyhow::bail!(
            "workers ({}) must be between {} and {}",
            workers,
            MINIMUM_WORKERS,
            MAXIMUM_WORKERS
        );
    }

    if let Some(timeout) = config.request_timeout
        && !(MINIMUM_REQUEST_TIMEOUT..=MAXIMUM_REQUEST_TIMEOUT).contains(&timeout)
    {
        anyhow::bail!(
            "request_timeout ({} seconds) must be between {} and {} seconds",
            timeout,
            MINIMUM_REQUEST_TIMEOUT,
            MAXIMUM_REQUEST_TIMEOUT
        );
    }

    if let Some(url) = config.overpass_url.as_deref() {
        validate_overpass_url(url)?;
    }

    Ok(())
}

/// Tolerance must be a finite number of degrees between 0 and 180.
///
/// Shared with command-line parsing so that `--tolerance` gets the same checks.
pub fn validate_tolerance(tolerance: f64) -> Result<()> {
    if !tolerance.is_finite() || !(MINIMUM_TOLERANCE..=MAXIMUM_TOLERANCE).contains(&tolerance) {
        anyhow::bail!(
            "tolerance ({}°) must be between {} and {} degrees",
            tolerance,
            MINIMUM_TOLERANCE,
            MAXIMUM_TOLERANCE
        );
    }
    Ok(())
}

fn validate_overpass_url(url: &str) -> Result<()> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => anyhow::bail!(
            "overpass_url ({}) must be an http:// or https:// URL with a host",
            url
        ),
    }
}
