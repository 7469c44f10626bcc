//! Circular arithmetic on compass azimuths.
//!
//! Azimuths wrap at 360°, and callers pass values outside [0, 360) on purpose
//! (street azimuths written as negative "sunset-side" bearings, for example),
//! so every comparison goes through a Euclidean remainder rather than a plain
//! subtraction.

/// Map any finite angle into [0, 360).
pub fn normalize_azimuth(azimuth: f64) -> f64 {
    let normalized = azimuth.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Smallest absolute angle between two azimuths, in [0, 180].
///
/// Computed as `|((a - b + 180) mod 360) - 180|` with a Euclidean modulo, so
/// the result is symmetric and independent of how many turns either input
/// carries.
pub fn circular_difference(a: f64, b: f64) -> f64 {
    ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
}

/// True when `candidate` lies within `tolerance` degrees of `target`.
///
/// A tolerance of 0 demands exact equality after normalization; a negative
/// tolerance never matches.
pub fn is_aligned(candidate: f64, target: f64, tolerance: f64) -> bool {
    circular_difference(candidate, target) <= tolerance
}

/// The opposite direction, `azimuth + 180` normalized.
pub fn reciprocal(azimuth: f64) -> f64 {
    normalize_azimuth(azimuth + 180.0)
}

/// Both directions a street can be looked along: the azimuth itself
/// (normalized) and its reciprocal.
pub fn street_directions(azimuth: f64) -> [f64; 2] {
    [normalize_azimuth(azimuth), reciprocal(azimuth)]
}
