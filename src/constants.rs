//! Application-wide constants: defaults, validation limits and exit codes.

// # Alignment search

/// Default half-width of the alignment window in degrees.
pub const DEFAULT_TOLERANCE: f64 = 2.0;
pub const MINIMUM_TOLERANCE: f64 = 0.0;
/// Any tolerance of 180° or more matches every azimuth.
pub const MAXIMUM_TOLERANCE: f64 = 180.0;

/// Years the solar model is trusted for. Outside this range the
/// ΔT estimate is meaningless and the sunrise equation overflows.
pub const MINIMUM_YEAR: i32 = -2000;
pub const MAXIMUM_YEAR: i32 = 6000;

// # Scan

pub const MINIMUM_WORKERS: usize = 1;
pub const MAXIMUM_WORKERS: usize = 64;
/// Upper bound for the default worker count derived from available parallelism.
pub const DEFAULT_WORKER_CAP: usize = 8;

// # Street provider (Overpass API)

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
/// Seconds. Also passed to Overpass as the server-side query timeout.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 120;
pub const MINIMUM_REQUEST_TIMEOUT: u64 = 5;
pub const MAXIMUM_REQUEST_TIMEOUT: u64 = 600;

/// OSM `highway` classes that make up a drivable street network.
pub const DRIVABLE_HIGHWAY_TYPES: &[&str] = &[
    "motorway",
    "motorway_link",
    "trunk",
    "trunk_link",
    "primary",
    "primary_link",
    "secondary",
    "secondary_link",
    "tertiary",
    "tertiary_link",
    "unclassified",
    "residential",
    "living_street",
];

// # Configuration

pub const CONFIG_DIR_NAME: &str = "streethenge";
pub const CONFIG_FILE_NAME: &str = "streethenge.toml";

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
