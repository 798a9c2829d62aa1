//! Field-level normalization passes.
//!
//! Each pass takes the raw text of one field and either produces the typed
//! value, `None` for an empty field, or the [`SkipReason`] that drops the
//! row. Passes never look at other fields.

use std::sync::LazyLock;

use regex::Regex;

use hotelscrub_shared::SkipReason;

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("valid regex"));

/// Parse a formatted price string.
///
/// Currency symbols and ISO codes are stripped, commas and spaces are
/// treated as thousands separators. Empty input is an unset price; input
/// with no extractable number drops the row.
pub fn parse_price(raw: &str) -> Result<Option<f64>, SkipReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let stripped: String = trimmed
        .to_lowercase()
        .replace("eur", "")
        .replace("usd", "")
        .replace("gbp", "")
        .chars()
        .filter(|c| !matches!(c, '€' | '£' | '$' | ',' | ' ' | '\u{a0}'))
        .collect();

    let m = DECIMAL_RE
        .find(&stripped)
        .ok_or(SkipReason::UnparsablePrice)?;
    let value: f64 = m
        .as_str()
        .parse()
        .map_err(|_| SkipReason::UnparsablePrice)?;

    if value < 0.0 {
        return Err(SkipReason::NegativePrice);
    }
    Ok(Some(value))
}

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:[.,]\d+)?").expect("valid regex"));

/// Upper bound of the review-score scale.
const SCORE_MAX: f64 = 10.0;

/// Parse a review score.
///
/// Accepts a decimal comma ("8,5"). Scores outside [0, 10] drop the row —
/// clamping would fabricate a value the source never stated.
pub fn parse_score(raw: &str) -> Result<Option<f64>, SkipReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let m = SCORE_RE.find(trimmed).ok_or(SkipReason::UnparsableScore)?;
    let value: f64 = m
        .as_str()
        .replace(',', ".")
        .parse()
        .map_err(|_| SkipReason::UnparsableScore)?;

    if !(0.0..=SCORE_MAX).contains(&value) {
        return Err(SkipReason::ScoreOutOfRange);
    }
    Ok(Some(value))
}

// ---------------------------------------------------------------------------
// Review count
// ---------------------------------------------------------------------------

static INT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Parse a review count ("1,208 reviews" → 1208).
pub fn parse_review_count(raw: &str) -> Result<Option<u32>, SkipReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let stripped: String = trimmed
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '\u{a0}'))
        .collect();

    let m = INT_RE
        .find(&stripped)
        .ok_or(SkipReason::UnparsableReviewCount)?;
    let value: u32 = m
        .as_str()
        .parse()
        .map_err(|_| SkipReason::UnparsableReviewCount)?;
    Ok(Some(value))
}

// ---------------------------------------------------------------------------
// Free cancellation
// ---------------------------------------------------------------------------

const TRUE_VARIANTS: [&str; 4] = ["free cancellation", "yes", "true", "1"];
const FALSE_VARIANTS: [&str; 6] = [
    "no",
    "false",
    "0",
    "non-refundable",
    "non refundable",
    "no free cancellation",
];

/// Map recognized cancellation text to a tri-state boolean.
///
/// Matching is exact on the normalized string; unrecognized text is
/// `None` (unknown) rather than a row drop.
pub fn parse_tristate(raw: &str) -> Option<bool> {
    let normalized = raw.trim().to_lowercase();
    if TRUE_VARIANTS.contains(&normalized.as_str()) {
        return Some(true);
    }
    if FALSE_VARIANTS.contains(&normalized.as_str()) {
        return Some(false);
    }
    None
}

// ---------------------------------------------------------------------------
// Rooms left
// ---------------------------------------------------------------------------

/// Extract the room count from availability text
/// ("Only 3 rooms left at this price" → 3).
///
/// "unknown", empty, and digit-free text all mean no information.
pub fn parse_rooms_left(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown") {
        return None;
    }
    INT_RE
        .find(trimmed)
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_strips_currency_and_separators() {
        assert_eq!(parse_price("€150").unwrap(), Some(150.0));
        assert_eq!(parse_price("€1,500.50").unwrap(), Some(1500.5));
        assert_eq!(parse_price("EUR 99").unwrap(), Some(99.0));
        assert_eq!(parse_price("£1 250").unwrap(), Some(1250.0));
        assert_eq!(parse_price("$80.25 total").unwrap(), Some(80.25));
    }

    #[test]
    fn price_empty_is_unset() {
        assert_eq!(parse_price("").unwrap(), None);
        assert_eq!(parse_price("   ").unwrap(), None);
    }

    #[test]
    fn price_unparsable_drops_row() {
        assert_eq!(parse_price("N/A"), Err(SkipReason::UnparsablePrice));
        assert_eq!(parse_price("call us"), Err(SkipReason::UnparsablePrice));
    }

    #[test]
    fn price_negative_drops_row() {
        assert_eq!(parse_price("-€150"), Err(SkipReason::NegativePrice));
    }

    #[test]
    fn score_parses_plain_and_decorated() {
        assert_eq!(parse_score("8.5").unwrap(), Some(8.5));
        assert_eq!(parse_score("Scored 9.1").unwrap(), Some(9.1));
        assert_eq!(parse_score("8,5").unwrap(), Some(8.5));
        assert_eq!(parse_score("10").unwrap(), Some(10.0));
        assert_eq!(parse_score("0").unwrap(), Some(0.0));
    }

    #[test]
    fn score_empty_is_unset() {
        assert_eq!(parse_score("").unwrap(), None);
    }

    #[test]
    fn score_out_of_range_drops_row() {
        assert_eq!(parse_score("10.1"), Err(SkipReason::ScoreOutOfRange));
        assert_eq!(parse_score("-1"), Err(SkipReason::ScoreOutOfRange));
        assert_eq!(parse_score("85"), Err(SkipReason::ScoreOutOfRange));
    }

    #[test]
    fn score_unparsable_drops_row() {
        assert_eq!(parse_score("great"), Err(SkipReason::UnparsableScore));
    }

    #[test]
    fn review_count_handles_grouping_and_suffix() {
        assert_eq!(parse_review_count("120").unwrap(), Some(120));
        assert_eq!(parse_review_count("1,208 reviews").unwrap(), Some(1208));
        assert_eq!(parse_review_count("").unwrap(), None);
        assert_eq!(
            parse_review_count("many"),
            Err(SkipReason::UnparsableReviewCount)
        );
    }

    #[test]
    fn tristate_recognizes_variants() {
        assert_eq!(parse_tristate("Free cancellation"), Some(true));
        assert_eq!(parse_tristate("YES"), Some(true));
        assert_eq!(parse_tristate("no"), Some(false));
        assert_eq!(parse_tristate("Non-refundable"), Some(false));
        assert_eq!(parse_tristate("No free cancellation"), Some(false));
        assert_eq!(parse_tristate(""), None);
        assert_eq!(parse_tristate("breakfast included"), None);
    }

    #[test]
    fn rooms_left_extracts_first_integer() {
        assert_eq!(parse_rooms_left("3 rooms left"), Some(3));
        assert_eq!(parse_rooms_left("Only 1 room left at this price!"), Some(1));
        assert_eq!(parse_rooms_left("unknown"), None);
        assert_eq!(parse_rooms_left(""), None);
        assert_eq!(parse_rooms_left("sold out"), None);
    }
}
