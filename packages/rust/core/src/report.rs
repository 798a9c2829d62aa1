//! Run report assembly and output.
//!
//! Every run ends with a [`CleanReport`]: totals, per-reason skip counts,
//! and a hash of the cleaned bytes. The cleaned output is never handed
//! downstream without this accounting.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use hotelscrub_shared::{
    CURRENT_REPORT_VERSION, CleanReport, HotelScrubError, Result, RunId, SkipCount, SkipReason,
};

/// Hex SHA-256 of a byte buffer.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Inputs needed to assemble a [`CleanReport`].
pub struct ReportInputs<'a> {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub input: &'a Path,
    pub output: &'a Path,
    pub rows_read: u64,
    pub rows_kept: u64,
    pub skips: &'a BTreeMap<SkipReason, u64>,
    pub output_sha256: String,
}

/// Assemble the report. Skip counters come out in [`SkipReason::ALL`]
/// order, zero entries omitted.
pub fn build_report(inputs: ReportInputs<'_>) -> CleanReport {
    let skips: Vec<SkipCount> = SkipReason::ALL
        .iter()
        .filter_map(|reason| {
            let count = inputs.skips.get(reason).copied().unwrap_or(0);
            (count > 0).then(|| SkipCount {
                reason: reason.as_str().to_string(),
                class: reason.class().as_str().to_string(),
                count,
            })
        })
        .collect();

    let rows_skipped: u64 = skips.iter().map(|s| s.count).sum();

    CleanReport {
        report_version: CURRENT_REPORT_VERSION,
        run_id: inputs.run_id,
        started_at: inputs.started_at,
        input: inputs.input.display().to_string(),
        output: inputs.output.display().to_string(),
        rows_read: inputs.rows_read,
        rows_kept: inputs.rows_kept,
        rows_skipped,
        skips,
        output_sha256: inputs.output_sha256,
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Write the report as pretty JSON.
pub fn write_report(path: &Path, report: &CleanReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| HotelScrubError::validation(format!("report serialization: {e}")))?;
    std::fs::write(path, json).map_err(|e| HotelScrubError::io(path, e))
}
