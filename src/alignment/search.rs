//! Day-by-day alignment search over one calendar year.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::angles::{is_aligned, street_directions};
use super::calendar::dates_of_year;
use super::{AlignmentEvent, SunEvent};
use crate::constants::{MAXIMUM_YEAR, MINIMUM_YEAR};
use crate::error::SearchError;
use crate::geo::Location;
use crate::solar::SolarOracle;

const SUN_EVENTS: [SunEvent; 2] = [SunEvent::Sunrise, SunEvent::Sunset];

/// Bookkeeping from one search, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Dates examined.
    pub days: u32,
    /// Sunrises or sunsets that do not happen (polar day or night).
    pub missing_events: u32,
    /// Sunrises or sunsets whose computation failed and was skipped.
    pub failed_events: u32,
}

/// Alignment events for `location` against every target azimuth over `year`.
///
/// Each date's sunrise and sunset azimuths are tested against every target
/// independently. Matches are returned deduplicated and ordered by date, then
/// signed azimuth (sunsets, being negative, sort before sunrises).
///
/// Days without a sunrise or sunset, and days where the oracle fails, simply
/// contribute no event. Only invalid input is an error.
pub fn find_alignments<O: SolarOracle + ?Sized>(
    oracle: &O,
    location: Location,
    targets: &[f64],
    year: i32,
    tolerance: f64,
) -> Result<Vec<AlignmentEvent>, SearchError> {
    find_alignments_with_stats(oracle, location, targets, year, tolerance).map(|(events, _)| events)
}

/// [`find_alignments`] for a street azimuth, matched in both directions.
pub fn find_street_alignments<O: SolarOracle + ?Sized>(
    oracle: &O,
    location: Location,
    street_azimuth: f64,
    year: i32,
    tolerance: f64,
) -> Result<Vec<AlignmentEvent>, SearchError> {
    if !street_azimuth.is_finite() {
        return Err(SearchError::InvalidTarget(street_azimuth));
    }
    find_alignments(
        oracle,
        location,
        &street_directions(street_azimuth),
        year,
        tolerance,
    )
}

/// Like [`find_alignments`], also reporting how many events were unavailable.
pub fn find_alignments_with_stats<O: SolarOracle + ?Sized>(
    oracle: &O,
    location: Location,
    targets: &[f64],
    year: i32,
    tolerance: f64,
) -> Result<(Vec<AlignmentEvent>, SearchStats), SearchError> {
    validate_search(targets, tolerance)?;
    check_year(year)?;
    let dates = dates_of_year(year).ok_or(SearchError::YearOutOfRange(year))?;

    let mut events = BTreeSet::new();
    let mut stats = SearchStats::default();

    for date in dates {
        stats.days += 1;
        for kind in SUN_EVENTS {
            let azimuth = match event_azimuth(oracle, location, date, kind) {
                EventAzimuth::Found(azimuth) => azimuth,
                EventAzimuth::Missing => {
                    stats.missing_events += 1;
                    continue;
                }
                EventAzimuth::Failed => {
                    stats.failed_events += 1;
                    continue;
                }
            };

            for &target in targets {
                if is_aligned(azimuth, target, tolerance) {
                    events.insert(AlignmentEvent::new(date, kind, azimuth));
                }
            }
        }
    }

    Ok((events.into_iter().collect(), stats))
}

fn validate_search(targets: &[f64], tolerance: f64) -> Result<(), SearchError> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(SearchError::InvalidTolerance(tolerance));
    }
    if targets.is_empty() {
        return Err(SearchError::NoTargets);
    }
    if let Some(&bad) = targets.iter().find(|t| !t.is_finite()) {
        return Err(SearchError::InvalidTarget(bad));
    }
    Ok(())
}

enum EventAzimuth {
    Found(f64),
    Missing,
    Failed,
}

fn event_azimuth<O: SolarOracle + ?Sized>(
    oracle: &O,
    location: Location,
    date: NaiveDate,
    kind: SunEvent,
) -> EventAzimuth {
    let instant = match oracle.event_instant(location, date, kind) {
        Ok(Some(instant)) => instant,
        Ok(None) => return EventAzimuth::Missing,
        Err(_) => return EventAzimuth::Failed,
    };
    match oracle.sun_azimuth(location, instant) {
        Ok(azimuth) => EventAzimuth::Found(azimuth),
        Err(_) => EventAzimuth::Failed,
    }
}

/// Validate search parameters without running a search.
///
/// Used by the scanner to fail fast before fetching any street data.
pub(crate) fn check_parameters(year: i32, tolerance: f64) -> Result<(), SearchError> {
    validate_search(&[0.0], tolerance)?;
    check_year(year)
}

fn check_year(year: i32) -> Result<(), SearchError> {
    if !(MINIMUM_YEAR..=MAXIMUM_YEAR).contains(&year) {
        return Err(SearchError::YearOutOfRange(year));
    }
    Ok(())
}
