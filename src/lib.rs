//! # Streethenge Library
//!
//! Finds the days of a year when the sun rises or sets in line with a
//! street, for a single location or for every street in a bounding box.
//!
//! This library exists to enable testing of the internals and provide clean
//! separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! - **Alignment**: `alignment` holds the angular math, calendar enumeration
//!   and the year-long date search
//! - **Solar**: `solar` defines the `SolarOracle` seam and its production
//!   adapter built on the `sunrise` and `solar-positioning` crates
//! - **Geographic**: `geo` for validated locations, bounding boxes and bearings
//! - **Streets**: `streets` for segments, the `StreetGraphProvider` seam and
//!   the Overpass API adapter
//! - **Scan**: `scan` runs the search over every segment of a bounding box
//! - **Output**: `output` renders results as JSON or text
//! - **Infrastructure**: configuration, CLI parsing, commands and logging

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod alignment;
pub mod args;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod geo;
pub mod output;
pub mod scan;
pub mod solar;
pub mod streets;

pub use alignment::{AlignmentEvent, SunEvent};
pub use error::{GeometryError, ProviderError, ScanError, SearchError, SolarError};
pub use scan::{AlignmentScanner, ScanOptions, SegmentAlignmentResult};
