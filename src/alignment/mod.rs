//! Sun/street alignment search.
//!
//! This module answers "on which days of the year does the sun rise or set
//! along this azimuth?" for a single location.
//!
//! ## Module Structure
//!
//! - [`angles`]: circular difference and alignment tests on azimuths
//! - [`calendar`]: calendar-correct enumeration of a year's dates
//! - [`search`]: the day-by-day search against a [`crate::solar::SolarOracle`]
//!
//! ## Sign convention
//!
//! Results are [`AlignmentEvent`]s carrying a *signed* azimuth: a positive
//! value is a sunrise alignment and its magnitude is the sunrise azimuth, a
//! negative value is a sunset alignment and its magnitude is the sunset
//! azimuth. Both can occur on the same date.

pub mod angles;
pub mod calendar;
pub mod search;

pub use angles::{circular_difference, is_aligned, normalize_azimuth, reciprocal, street_directions};
pub use search::{SearchStats, find_alignments, find_alignments_with_stats, find_street_alignments};

#[cfg(test)]
mod tests;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Which horizon crossing of the sun an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SunEvent {
    Sunrise,
    Sunset,
}

impl SunEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SunEvent::Sunrise => "sunrise",
            SunEvent::Sunset => "sunset",
        }
    }
}

/// One sunrise or sunset that lines up with a target azimuth.
///
/// Events are totally ordered by date, then by signed azimuth, which makes
/// them usable as keys of an ordered set for deduplication.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentEvent {
    date: NaiveDate,
    signed_azimuth: f64,
}

impl AlignmentEvent {
    /// Build an event for `kind` with the sun's azimuth at that moment.
    ///
    /// The sign is derived from `kind`; the sign of `azimuth` is ignored.
    pub fn new(date: NaiveDate, kind: SunEvent, azimuth: f64) -> Self {
        let magnitude = azimuth.abs();
        let signed_azimuth = match kind {
            SunEvent::Sunrise => magnitude,
            SunEvent::Sunset => -magnitude,
        };
        Self {
            date,
            signed_azimuth,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Positive for sunrise, negative for sunset.
    pub fn signed_azimuth(&self) -> f64 {
        self.signed_azimuth
    }

    /// The sun's azimuth at the event, without the sign tag.
    pub fn azimuth(&self) -> f64 {
        self.signed_azimuth.abs()
    }

    pub fn kind(&self) -> SunEvent {
        if self.signed_azimuth.is_sign_negative() {
            SunEvent::Sunset
        } else {
            SunEvent::Sunrise
        }
    }
}

impl PartialEq for AlignmentEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AlignmentEvent {}

impl PartialOrd for AlignmentEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AlignmentEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.signed_azimuth.total_cmp(&other.signed_azimuth))
    }
}

/// Serialized as `["YYYY-MM-DD", signed_azimuth]`.
impl Serialize for AlignmentEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.date, self.signed_azimuth).serialize(serializer)
    }
}

impl fmt::Display for AlignmentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} azimuth {:.1}°",
            self.date,
            self.kind().as_str(),
            self.azimuth()
        )
    }
}
