//! End-to-end cleaning pipeline: read → validate schema → clean rows →
//! deduplicate → derive metrics → write outputs → report.
//!
//! The run is a single synchronous pass. Per-row problems are skipped and
//! counted; only schema-level and I/O failures abort, and in that case no
//! partial output is left behind to be mistaken for a finished dataset.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info, instrument};

use hotelscrub_clean::clean_row;
use hotelscrub_ingest::read_listings;
use hotelscrub_shared::{
    CleanReport, HotelListing, HotelScrubError, Result, RunId, SkipReason,
};

use crate::metrics::{self, aggregate_by_city};
use crate::report::{self, ReportInputs};
use crate::writer;

/// Configuration for one cleaning run.
#[derive(Debug, Clone)]
pub struct CleanConfig {
    /// Raw extract to read.
    pub input: PathBuf,
    /// Cleaned dataset to write.
    pub output: PathBuf,
    /// Per-city aggregates file; `None` disables the view.
    pub aggregates_out: Option<PathBuf>,
    /// JSON run report file; `None` disables the file (totals are still
    /// returned to the caller).
    pub report_out: Option<PathBuf>,
    /// Input field delimiter.
    pub delimiter: u8,
}

/// Result of a cleaning run.
#[derive(Debug)]
pub struct CleanOutcome {
    /// Totals and skip accounting.
    pub report: CleanReport,
    /// Where the aggregates were written, if enabled.
    pub aggregates_path: Option<PathBuf>,
    /// Where the report was written, if enabled.
    pub report_path: Option<PathBuf>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each row is processed.
    fn row_cleaned(&self, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, outcome: &CleanOutcome);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn row_cleaned(&self, _current: usize, _total: usize) {}
    fn done(&self, _outcome: &CleanOutcome) {}
}

/// Run the full cleaning pipeline.
#[instrument(skip_all, fields(input = %config.input.display()))]
pub fn run_clean(config: &CleanConfig, progress: &dyn ProgressReporter) -> Result<CleanOutcome> {
    let start = Instant::now();
    let run_id = RunId::new();
    let started_at = Utc::now();

    info!(%run_id, output = %config.output.display(), "starting clean run");

    // --- Phase 1: Read ---
    progress.phase("Reading input");
    let batch = read_listings(&config.input, config.delimiter)?;
    let rows_read = batch.rows_read();

    let mut skips: BTreeMap<SkipReason, u64> = BTreeMap::new();
    if batch.malformed > 0 {
        skips.insert(SkipReason::MalformedRow, batch.malformed);
    }

    // --- Phase 2: Clean + dedup ---
    progress.phase("Cleaning rows");
    let total = batch.rows.len();
    let mut kept: Vec<HotelListing> = Vec::with_capacity(total);
    let mut seen: HashSet<(String, String, String)> = HashSet::new();

    for (i, raw) in batch.rows.iter().enumerate() {
        match clean_row(raw) {
            Ok(mut listing) => {
                let key = (
                    listing.name.clone(),
                    listing.city.clone(),
                    listing.source_url.clone(),
                );
                if seen.insert(key) {
                    listing.popularity = metrics::popularity_of(&listing);
                    kept.push(listing);
                } else {
                    debug!(row = i + 2, "duplicate listing dropped");
                    *skips.entry(SkipReason::Duplicate).or_insert(0) += 1;
                }
            }
            Err(reason) => {
                debug!(row = i + 2, reason = %reason, "row skipped");
                *skips.entry(reason).or_insert(0) += 1;
            }
        }
        progress.row_cleaned(i + 1, total);
    }

    // --- Phase 3: Write cleaned output ---
    progress.phase("Writing cleaned output");
    let cleaned_bytes = writer::render_cleaned(&kept)?;
    write_output(&config.output, &cleaned_bytes)?;
    let output_sha256 = report::sha256_hex(&cleaned_bytes);

    // --- Phase 4: Aggregates ---
    let aggregates_path = match &config.aggregates_out {
        Some(path) => {
            progress.phase("Writing aggregates");
            let aggregates = aggregate_by_city(&kept);
            write_output(path, &writer::render_aggregates(&aggregates)?)?;
            Some(path.clone())
        }
        None => None,
    };

    // --- Phase 5: Report ---
    let report = report::build_report(ReportInputs {
        run_id,
        started_at,
        input: &config.input,
        output: &config.output,
        rows_read,
        rows_kept: kept.len() as u64,
        skips: &skips,
        output_sha256,
    });

    let report_path = match &config.report_out {
        Some(path) => {
            progress.phase("Writing report");
            report::write_report(path, &report)?;
            Some(path.clone())
        }
        None => None,
    };

    let outcome = CleanOutcome {
        report,
        aggregates_path,
        report_path,
        elapsed: start.elapsed(),
    };
    progress.done(&outcome);

    info!(
        rows_read = outcome.report.rows_read,
        rows_kept = outcome.report.rows_kept,
        rows_skipped = outcome.report.rows_skipped,
        elapsed_ms = outcome.elapsed.as_millis(),
        "clean run complete"
    );

    Ok(outcome)
}

/// Write an output file, creating parent directories as needed.
fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| HotelScrubError::io(parent, e))?;
        }
    }
    std::fs::write(path, bytes).map_err(|e| HotelScrubError::io(path, e))
}
