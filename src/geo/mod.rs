//! Geographic primitives and street geometry.
//!
//! This module holds the coordinate types shared by every other part of the
//! crate and the spherical geometry used to derive a street's orientation:
//!
//! - [`Location`]: a validated latitude/longitude pair
//! - [`BoundingBox`]: the area a scan covers
//! - [`bearing`]: initial great-circle bearing from one point to another
//! - [`midpoint`]: the point a segment's solar events are computed for
//!
//! All angles are in degrees. Bearings follow the compass convention:
//! 0° = north, increasing clockwise, normalized to [0, 360).

use serde::Serialize;
use std::fmt;

use crate::error::GeometryError;


/// An observer position on the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Create a location, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeometryError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeometryError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeometryError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// `(latitude, longitude)`, the order used in JSON output.
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}°, {:.5}°", self.latitude, self.longitude)
    }
}

/// Axis-aligned latitude/longitude box, `min` corner south-west.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    min_lat: f64,
    min_lon: f64,
    max_lat: f64,
    max_lon: f64,
}

impl BoundingBox {
    /// Create a bounding box from its south-west and north-east corners.
    ///
    /// Boxes crossing the antimeridian are not supported: `min_lon` must not
    /// exceed `max_lon`.
    pub fn new(
        min_lat: f64,
        min_lon: f64,
        max_lat: f64,
        max_lon: f64,
    ) -> Result<Self, GeometryError> {
        Location::new(min_lat, min_lon)?;
        Location::new(max_lat, max_lon)?;
        if min_lat > max_lat {
            return Err(GeometryError::InvalidBoundingBox(format!(
                "min_lat ({min_lat}) is north of max_lat ({max_lat})"
            )));
        }
        if min_lon > max_lon {
            return Err(GeometryError::InvalidBoundingBox(format!(
                "min_lon ({min_lon}) is east of max_lon ({max_lon})"
            )));
        }
        Ok(Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        })
    }

    /// A square box of `half_size` degrees around a center point, clamped to
    /// valid coordinates.
    pub fn around(center: Location, half_size: f64) -> Result<Self, GeometryError> {
        let half = half_size.abs();
        Self::new(
            (center.latitude() - half).max(-90.0),
            (center.longitude() - half).max(-180.0),
            (center.latitude() + half).min(90.0),
            (center.longitude() + half).min(180.0),
        )
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    pub fn contains(&self, location: Location) -> bool {
        (self.min_lat..=self.max_lat).contains(&location.latitude())
            && (self.min_lon..=self.max_lon).contains(&location.longitude())
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.5}, {:.5}) to ({:.5}, {:.5})",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

/// Initial bearing travelling from `from` to `to` along the great circle.
///
/// The result is normalized to [0, 360). For coincident points the bearing is
/// undefined and this returns 0; callers that need a real orientation reject
/// such segments first (see [`crate::streets::StreetSegment::from_record`]).
pub fn bearing(from: Location, to: Location) -> f64 {
    let lat1 = from.latitude().to_radians();
    let lat2 = to.latitude().to_radians();
    let delta_lon = (to.longitude() - from.longitude()).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Midpoint of two locations as the arithmetic mean of their coordinates.
///
/// Good enough at street-segment scale, where the great-circle midpoint
/// differs by far less than the precision of the source data.
pub fn midpoint(a: Location, b: Location) -> Location {
    Location {
        latitude: (a.latitude() + b.latitude()) / 2.0,
        longitude: (a.longitude() + b.longitude()) / 2.0,
    }
}
