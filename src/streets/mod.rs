//! Street segments and the source they come from.
//!
//! A street network arrives as [`SegmentRecord`]s from a
//! [`StreetGraphProvider`]. Records are raw: a provider may hand out a segment
//! whose node coordinates it could not resolve. [`StreetSegment::from_record`]
//! turns a record into a usable segment with a computed orientation, or
//! explains why it cannot.

pub mod overpass;

pub use overpass::{OverpassConfig, OverpassProvider};

use serde::Serialize;
use std::fmt;

use crate::alignment::is_aligned;
use crate::error::{GeometryError, ProviderError};
use crate::geo::{BoundingBox, Location, bearing};

/// Stable identifier of a street segment: the OSM way it belongs to and the
/// two nodes it connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SegmentId {
    pub way: u64,
    pub from: u64,
    pub to: u64,
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}->{}", self.way, self.from, self.to)
    }
}

/// A segment as delivered by a provider, coordinates as `(latitude, longitude)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRecord {
    pub id: SegmentId,
    pub start: Option<(f64, f64)>,
    pub end: Option<(f64, f64)>,
}

/// A street segment with validated endpoints and its compass orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetSegment {
    id: SegmentId,
    start: Location,
    end: Location,
    azimuth: f64,
}

impl StreetSegment {
    /// Validate a provider record and compute the bearing from start to end.
    ///
    /// Fails for missing or out-of-range coordinates and for zero-length
    /// segments, whose bearing is undefined.
    pub fn from_record(record: &SegmentRecord) -> Result<Self, GeometryError> {
        let (start_lat, start_lon) = record
            .start
            .ok_or(GeometryError::MissingCoordinate("start"))?;
        let (end_lat, end_lon) = record.end.ok_or(GeometryError::MissingCoordinate("end"))?;
        let start = Location::new(start_lat, start_lon)?;
        let end = Location::new(end_lat, end_lon)?;

        if start == end {
            return Err(GeometryError::DegenerateSegment);
        }

        Ok(Self {
            id: record.id,
            start,
            end,
            azimuth: bearing(start, end),
        })
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn start(&self) -> Location {
        self.start
    }

    pub fn end(&self) -> Location {
        self.end
    }

    /// Bearing from start to end, in [0, 360).
    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }
}

/// Source of street segments for a bounding box.
///
/// Errors end the scan that asked for the segments; a provider should not
/// return a partial network.
#[cfg_attr(test, mockall::automock)]
pub trait StreetGraphProvider {
    fn fetch_segments(&self, bbox: &BoundingBox) -> Result<Vec<SegmentRecord>, ProviderError>;
}

/// Keep the segments whose orientation is within `tolerance` of any of
/// `targets`, in input order.
///
/// Only the segment's own direction is compared; pass the reciprocal as well
/// to match streets regardless of the direction they were digitized in.
pub fn filter_segments_by_azimuth(
    segments: &[StreetSegment],
    targets: &[f64],
    tolerance: f64,
) -> Vec<StreetSegment> {
    segments
        .iter()
        .filter(|segment| {
            targets
                .iter()
                .any(|&target| is_aligned(segment.azimuth(), target, tolerance))
        })
        .cloned()
        .collect()
}
