//! Core domain types for HotelScrub cleaning runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current schema version for the run report format.
pub const CURRENT_REPORT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for cleaning-run identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// RawListing
// ---------------------------------------------------------------------------

/// One row as read from the raw extract, every field untyped text.
///
/// Fields that are absent from the input (optional column not present, or a
/// short row) are empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub name: String,
    pub location: String,
    pub price: String,
    pub score: String,
    pub review_count: String,
    pub review_category: String,
    pub free_cancellation: String,
    pub rooms_left: String,
    pub description: String,
    pub source_url: String,
}

// ---------------------------------------------------------------------------
// ReviewCategory
// ---------------------------------------------------------------------------

/// Guest-review label attached to a listing.
///
/// The known variants are the labels the booking site derives from the
/// review score. Anything else non-empty is preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewCategory {
    Exceptional,
    Wonderful,
    Excellent,
    VeryGood,
    Good,
    Pleasant,
    Fair,
    Poor,
    Other(String),
}

impl ReviewCategory {
    /// Parse a raw label. Returns `None` for empty/whitespace input.
    /// Known labels match case-insensitively; unknown labels are kept as-is.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed.to_lowercase().as_str() {
            "exceptional" => Self::Exceptional,
            "wonderful" => Self::Wonderful,
            "excellent" => Self::Excellent,
            "very good" | "verygood" => Self::VeryGood,
            "good" => Self::Good,
            "pleasant" => Self::Pleasant,
            "fair" => Self::Fair,
            "poor" => Self::Poor,
            _ => Self::Other(trimmed.to_string()),
        })
    }

    /// Canonical label as written to the cleaned output.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Exceptional => "Exceptional",
            Self::Wonderful => "Wonderful",
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Pleasant => "Pleasant",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Other(label) => label,
        }
    }
}

impl std::fmt::Display for ReviewCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HotelListing
// ---------------------------------------------------------------------------

/// One cleaned hotel/night row.
///
/// Constructed once by the cleaning pass and never mutated afterwards.
/// `name` and `city` are always non-empty; every numeric field is `None`
/// when the source had nothing to say.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelListing {
    /// Hotel name, whitespace-collapsed, locality suffix removed.
    pub name: String,
    /// City derived from the location string.
    pub city: String,
    /// Nightly price. Non-negative when present.
    pub price: Option<f64>,
    /// Guest review score in [0.0, 10.0] when present.
    pub score: Option<f64>,
    /// Number of reviews behind the score.
    pub review_count: Option<u32>,
    /// Canonicalized review label.
    pub review_category: Option<ReviewCategory>,
    /// Tri-state: `None` means the source did not say.
    pub free_cancellation: Option<bool>,
    /// Rooms left at this price; `None` covers "unknown".
    pub rooms_left: Option<u32>,
    /// Free-text description, trimmed.
    pub description: Option<String>,
    /// Listing URL on the source site.
    pub source_url: String,
    /// Derived popularity index; present only when both score and
    /// review_count are.
    pub popularity: Option<f64>,
}

impl HotelListing {
    /// Deduplication key: the identifying fields of a listing.
    pub fn identity(&self) -> (&str, &str, &str) {
        (&self.name, &self.city, &self.source_url)
    }
}

// ---------------------------------------------------------------------------
// SkipReason
// ---------------------------------------------------------------------------

/// Why a raw row was dropped instead of cleaned.
///
/// Exactly one reason is recorded per dropped row — the first check that
/// fails wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    /// The CSV layer could not produce a record (bad quoting, invalid
    /// UTF-8).
    MalformedRow,
    /// Name empty after normalization.
    MissingName,
    /// No city could be derived from the location string.
    MissingCity,
    /// Price present but no number could be extracted.
    UnparsablePrice,
    /// Price parsed to a negative amount.
    NegativePrice,
    /// Score present but no number could be extracted.
    UnparsableScore,
    /// Score parsed outside [0, 10].
    ScoreOutOfRange,
    /// Review count present but no number could be extracted.
    UnparsableReviewCount,
    /// Identity fields equal to an earlier kept row.
    Duplicate,
}

/// Coarse audit class a skip reason belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipClass {
    Parse,
    MissingField,
    Duplicate,
}

impl SkipReason {
    /// All reasons, in report order.
    pub const ALL: [SkipReason; 9] = [
        SkipReason::MalformedRow,
        SkipReason::MissingName,
        SkipReason::MissingCity,
        SkipReason::UnparsablePrice,
        SkipReason::NegativePrice,
        SkipReason::UnparsableScore,
        SkipReason::ScoreOutOfRange,
        SkipReason::UnparsableReviewCount,
        SkipReason::Duplicate,
    ];

    /// Stable snake_case name used in reports and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedRow => "malformed_row",
            Self::MissingName => "missing_name",
            Self::MissingCity => "missing_city",
            Self::UnparsablePrice => "unparsable_price",
            Self::NegativePrice => "negative_price",
            Self::UnparsableScore => "unparsable_score",
            Self::ScoreOutOfRange => "score_out_of_range",
            Self::UnparsableReviewCount => "unparsable_review_count",
            Self::Duplicate => "duplicate",
        }
    }

    /// The coarse class this reason is reported under.
    pub fn class(&self) -> SkipClass {
        match self {
            Self::MalformedRow
            | Self::UnparsablePrice
            | Self::NegativePrice
            | Self::UnparsableScore
            | Self::ScoreOutOfRange
            | Self::UnparsableReviewCount => SkipClass::Parse,
            Self::MissingName | Self::MissingCity => SkipClass::MissingField,
            Self::Duplicate => SkipClass::Duplicate,
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SkipClass {
    /// Stable name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::MissingField => "missing_field",
            Self::Duplicate => "duplicate",
        }
    }
}

impl std::fmt::Display for SkipClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CleanReport
// ---------------------------------------------------------------------------

/// Per-reason skip count, as serialized into the run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipCount {
    /// Snake_case reason name (see [`SkipReason::as_str`]).
    pub reason: String,
    /// Coarse class: "parse", "missing_field", or "duplicate".
    pub class: String,
    /// Number of rows dropped for this reason.
    pub count: u64,
}

/// The `*.report.json` structure written next to each cleaned output.
///
/// Invariant: `rows_kept + rows_skipped == rows_read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanReport {
    /// Report format version for forward compatibility.
    pub report_version: u32,
    /// Unique identifier for this run.
    pub run_id: RunId,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Input file path as given.
    pub input: String,
    /// Cleaned output file path.
    pub output: String,
    /// Data rows in the raw input (header excluded).
    pub rows_read: u64,
    /// Rows written to the cleaned output.
    pub rows_kept: u64,
    /// Rows dropped, summed over all reasons.
    pub rows_skipped: u64,
    /// Non-zero skip counters, in [`SkipReason::ALL`] order.
    pub skips: Vec<SkipCount>,
    /// SHA-256 of the cleaned output bytes (idempotence check).
    pub output_sha256: String,
    /// Tool version that produced this report.
    pub tool_version: String,
}
