//! Error types for the alignment library.
//!
//! Each collaborator gets its own error enum so that callers can tell the
//! recoverable cases (a bad segment, a failed solar computation for one date)
//! from the ones that end a scan (the street provider failing).

use thiserror::Error;

/// A coordinate, bounding box or street segment that cannot be used for geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("latitude must be between -90 and 90 degrees (got {0})")]
    InvalidLatitude(f64),

    #[error("longitude must be between -180 and 180 degrees (got {0})")]
    InvalidLongitude(f64),

    #[error("segment is missing its {0} coordinate")]
    MissingCoordinate(&'static str),

    #[error("segment endpoints coincide, bearing is undefined")]
    DegenerateSegment,

    #[error("invalid bounding box: {0}")]
    InvalidBoundingBox(String),
}

/// Failure inside the solar oracle for one location and date or instant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolarError {
    #[error("coordinates ({latitude}, {longitude}) rejected by solar calculation")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("solar computation failed: {0}")]
    Computation(String),
}

/// Failure fetching street segments for a bounding box.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("street data request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("street data service answered with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode street data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("street data unavailable: {0}")]
    Unavailable(String),
}

/// Invalid input to an alignment search, reported before any work is done.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("tolerance must be a non-negative number of degrees (got {0})")]
    InvalidTolerance(f64),

    #[error("at least one target azimuth is required")]
    NoTargets,

    #[error("target azimuth must be a finite number (got {0})")]
    InvalidTarget(f64),

    #[error(
        "year {0} is outside the supported range {min}..={max}",
        min = crate::constants::MINIMUM_YEAR,
        max = crate::constants::MAXIMUM_YEAR
    )]
    YearOutOfRange(i32),
}

/// Errors that end a bounding-box scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("a scan worker panicked")]
    WorkerPanicked,
}
