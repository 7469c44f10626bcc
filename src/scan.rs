//! Bounding-box alignment scan.
//!
//! Fetches every street segment inside a bounding box, derives each
//! segment's orientation, and runs the year-long alignment search at the
//! segment's midpoint against both directions of the street. Segments that
//! never line up with the sun are dropped.
//!
//! Segments are independent of each other, so the search is spread over a
//! small pool of scoped threads. Each worker takes a contiguous run of
//! segments and results are stitched back together in run order, so the
//! output keeps the order the provider returned the segments in.

use serde::Serialize;
use std::thread;

use crate::alignment::search::check_parameters;
use crate::alignment::{AlignmentEvent, find_street_alignments};
use crate::constants::MINIMUM_WORKERS;
use crate::error::{GeometryError, ScanError};
use crate::geo::{BoundingBox, midpoint};
use crate::solar::SolarOracle;
use crate::streets::{SegmentId, SegmentRecord, StreetGraphProvider, StreetSegment};

/// A street segment together with the dates the sun lines up with it.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentAlignmentResult {
    pub segment: StreetSegment,
    /// Never empty, ordered by date then signed azimuth.
    pub alignments: Vec<AlignmentEvent>,
}

/// Counters describing one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub segments_fetched: usize,
    pub segments_skipped: usize,
    pub segments_aligned: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Upper bound on worker threads; 1 runs the scan on the calling thread.
    pub workers: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            workers: MINIMUM_WORKERS,
        }
    }
}

/// Runs alignment scans over bounding boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignmentScanner {
    options: ScanOptions,
}

/// Outcome for one segment inside a worker.
enum SegmentOutcome {
    Aligned(SegmentAlignmentResult),
    Unaligned,
    Skipped(SegmentId, GeometryError),
}

impl AlignmentScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Segments in `bbox` that align with sunrise or sunset on at least one
    /// date of `year`, within `tolerance` degrees, in provider order.
    ///
    /// Only a provider failure or invalid parameters end the scan; segments
    /// with unusable geometry are skipped.
    pub fn scan<P, O>(
        &self,
        provider: &P,
        oracle: &O,
        bbox: &BoundingBox,
        year: i32,
        tolerance: f64,
    ) -> Result<Vec<SegmentAlignmentResult>, ScanError>
    where
        P: StreetGraphProvider + ?Sized,
        O: SolarOracle + ?Sized,
    {
        self.scan_with_summary(provider, oracle, bbox, year, tolerance)
            .map(|(results, _)| results)
    }

    /// [`AlignmentScanner::scan`], also returning scan counters.
    pub fn scan_with_summary<P, O>(
        &self,
        provider: &P,
        oracle: &O,
        bbox: &BoundingBox,
        year: i32,
        tolerance: f64,
    ) -> Result<(Vec<SegmentAlignmentResult>, ScanSummary), ScanError>
    where
        P: StreetGraphProvider + ?Sized,
        O: SolarOracle + ?Sized,
    {
        check_parameters(year, tolerance)?;

        log_block_start!("Fetching street segments for {bbox}");
        let records = provider.fetch_segments(bbox)?;
        log_indented!("{} segments received", records.len());

        let mut summary = ScanSummary {
            segments_fetched: records.len(),
            ..ScanSummary::default()
        };
        if records.is_empty() {
            return Ok((Vec::new(), summary));
        }

        let workers = self.options.workers.clamp(MINIMUM_WORKERS, records.len());
        log_block_start!(
            "Searching {year} for alignments within ±{tolerance}° ({workers} worker{})",
            if workers == 1 { "" } else { "s" }
        );

        let outcomes = if workers == 1 {
            scan_records(oracle, &records, year, tolerance)
        } else {
            let chunk_size = records.len().div_ceil(workers);
            thread::scope(|scope| {
                let handles: Vec<_> = records
                    .chunks(chunk_size)
                    .map(|chunk| scope.spawn(move || scan_records(oracle, chunk, year, tolerance)))
                    .collect();

                // Join every worker before looking at results, in spawn order,
                // which restores provider order
                let joined: Vec<_> = handles.into_iter().map(|handle| handle.join()).collect();
                let mut outcomes = Vec::with_capacity(records.len());
                for chunk in joined {
                    outcomes.extend(chunk.map_err(|_| ScanError::WorkerPanicked)?);
                }
                Ok::<_, ScanError>(outcomes)
            })?
        };

        let mut results = Vec::new();
        for outcome in outcomes {
            match outcome {
                SegmentOutcome::Aligned(result) => results.push(result),
                SegmentOutcome::Unaligned => {}
                SegmentOutcome::Skipped(id, error) => {
                    summary.segments_skipped += 1;
                    log_warning!("Skipping segment {id}: {error}");
                }
            }
        }
        summary.segments_aligned = results.len();

        log_decorated!(
            "{} of {} segments align with the sun",
            summary.segments_aligned,
            summary.segments_fetched
        );
        if summary.segments_skipped > 0 {
            log_indented!("{} segments skipped", summary.segments_skipped);
        }

        Ok((results, summary))
    }
}

fn scan_records<O: SolarOracle + ?Sized>(
    oracle: &O,
    records: &[SegmentRecord],
    year: i32,
    tolerance: f64,
) -> Vec<SegmentOutcome> {
    records
        .iter()
        .map(|record| scan_record(oracle, record, year, tolerance))
        .collect()
}

fn scan_record<O: SolarOracle + ?Sized>(
    oracle: &O,
    record: &SegmentRecord,
    year: i32,
    tolerance: f64,
) -> SegmentOutcome {
    let segment = match StreetSegment::from_record(record) {
        Ok(segment) => segment,
        Err(error) => return SegmentOutcome::Skipped(record.id, error),
    };

    let center = midpoint(segment.start(), segment.end());
    // Parameters were checked before the fetch, so this cannot fail
    let alignments = find_street_alignments(oracle, center, segment.azimuth(), year, tolerance)
        .unwrap_or_default();

    log_debug!(
        "{} azimuth {:.2}°: {} alignment dates",
        segment.id(),
        segment.azimuth(),
        alignments.len()
    );

    if alignments.is_empty() {
        SegmentOutcome::Unaligned
    } else {
        SegmentOutcome::Aligned(SegmentAlignmentResult {
            segment,
            alignments,
        })
    }
}
