//! Result records and their JSON and text renderings.
//!
//! Everything here writes to a caller-supplied [`Write`], normally a locked
//! stdout. Logging goes to stderr, so `--json` output can be piped as is.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::alignment::AlignmentEvent;
use crate::config::Config;
use crate::error::GeometryError;
use crate::geo::{BoundingBox, Location};
use crate::scan::{ScanSummary, SegmentAlignmentResult};
use crate::streets::{SegmentId, StreetSegment};

/// Bounding-box scan parameters as they arrive from outside, for example
/// as a JSON document. Missing `year` and `tolerance` come from [`Config`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScanRequest {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub tolerance: Option<f64>,
}

/// A [`ScanRequest`] with a validated box and every default filled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedScan {
    pub bbox: BoundingBox,
    pub year: i32,
    pub tolerance: f64,
}

impl ScanRequest {
    pub fn resolve(&self, config: &Config) -> Result<ResolvedScan, GeometryError> {
        let bbox = BoundingBox::new(self.min_lat, self.min_lon, self.max_lat, self.max_lon)?;
        Ok(ResolvedScan {
            bbox,
            year: self.year.unwrap_or_else(|| config.year()),
            tolerance: self.tolerance.unwrap_or_else(|| config.tolerance()),
        })
    }
}

/// One aligned street segment in output form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentRecord {
    pub segment: SegmentId,
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub azimuth: f64,
    pub alignment_dates: Vec<AlignmentEvent>,
}

impl From<&SegmentAlignmentResult> for AlignmentRecord {
    fn from(result: &SegmentAlignmentResult) -> Self {
        let segment = &result.segment;
        Self {
            segment: segment.id(),
            start: point(segment.start()),
            end: point(segment.end()),
            azimuth: segment.azimuth(),
            alignment_dates: result.alignments.clone(),
        }
    }
}

/// A street segment without solar data, for the `streets` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreetRecord {
    pub segment: SegmentId,
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub azimuth: f64,
}

impl From<&StreetSegment> for StreetRecord {
    fn from(segment: &StreetSegment) -> Self {
        Self {
            segment: segment.id(),
            start: point(segment.start()),
            end: point(segment.end()),
            azimuth: segment.azimuth(),
        }
    }
}

/// Alignment dates for a single location and street azimuth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointReport {
    pub latitude: f64,
    pub longitude: f64,
    pub azimuth: f64,
    pub tolerance: f64,
    pub year: i32,
    pub alignment_dates: Vec<AlignmentEvent>,
}

fn point(location: Location) -> [f64; 2] {
    let (lat, lon) = location.as_tuple();
    [lat, lon]
}

/// Pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_point_text<W: Write>(writer: &mut W, report: &PointReport) -> Result<()> {
    writeln!(
        writer,
        "Street azimuth {:.1}° at {:.5}, {:.5} in {} (±{}°)",
        report.azimuth, report.latitude, report.longitude, report.year, report.tolerance
    )?;
    if report.alignment_dates.is_empty() {
        writeln!(writer, "  No alignment dates")?;
    }
    for event in &report.alignment_dates {
        writeln!(writer, "  {event}")?;
    }
    Ok(())
}

pub fn write_scan_text<W: Write>(
    writer: &mut W,
    records: &[AlignmentRecord],
    summary: &ScanSummary,
) -> Result<()> {
    for record in records {
        writeln!(
            writer,
            "{} ({:.5}, {:.5}) -> ({:.5}, {:.5}) azimuth {:.1}°",
            record.segment,
            record.start[0],
            record.start[1],
            record.end[0],
            record.end[1],
            record.azimuth
        )?;
        for event in &record.alignment_dates {
            writeln!(writer, "  {event}")?;
        }
    }
    writeln!(
        writer,
        "{} of {} segments aligned, {} skipped",
        summary.segments_aligned, summary.segments_fetched, summary.segments_skipped
    )?;
    Ok(())
}

pub fn write_streets_text<W: Write>(writer: &mut W, records: &[StreetRecord]) -> Result<()> {
    for record in records {
        writeln!(writer, "{} azimuth {:.1}°", record.segment, record.azimuth)?;
    }
    writeln!(writer, "{} matching segments", records.len())?;
    Ok(())
}
