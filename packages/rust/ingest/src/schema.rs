//! Header resolution for the raw extract.
//!
//! Scraper exports name their columns inconsistently (`hotel_name` vs
//! `name`, `rating` vs `score`), so each logical column carries a fixed
//! alias table. Matching is case-insensitive after trimming; spaces and
//! dashes normalize to underscores. A missing required column is fatal.

use csv::StringRecord;
use hotelscrub_shared::{HotelScrubError, Result};

/// Logical columns of the raw extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Location,
    Price,
    Score,
    ReviewCount,
    ReviewCategory,
    FreeCancellation,
    RoomsLeft,
    Description,
    SourceUrl,
}

impl Column {
    /// Canonical name, used in error messages and documentation.
    pub fn canonical(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Location => "location",
            Self::Price => "price",
            Self::Score => "score",
            Self::ReviewCount => "review_count",
            Self::ReviewCategory => "review_category",
            Self::FreeCancellation => "free_cancellation",
            Self::RoomsLeft => "rooms_left",
            Self::Description => "description",
            Self::SourceUrl => "source_url",
        }
    }

    /// Header spellings accepted for this column (normalized form).
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Name => &["name", "hotel_name", "hotel", "title"],
            Self::Location => &["location", "address", "area"],
            Self::Price => &["price", "nightly_price", "price_per_night"],
            Self::Score => &["score", "rating", "review_score"],
            Self::ReviewCount => &["review_count", "reviews", "num_reviews"],
            Self::ReviewCategory => &["review_category", "rating_label", "score_label"],
            Self::FreeCancellation => &["free_cancellation", "cancellation", "cancellation_policy"],
            Self::RoomsLeft => &["rooms_left", "availability", "rooms"],
            Self::Description => &["description", "summary"],
            Self::SourceUrl => &["source_url", "url", "link"],
        }
    }

    fn required() -> &'static [Column] {
        &[
            Self::Name,
            Self::Location,
            Self::Price,
            Self::Score,
            Self::ReviewCount,
            Self::SourceUrl,
        ]
    }

    fn optional() -> &'static [Column] {
        &[
            Self::ReviewCategory,
            Self::FreeCancellation,
            Self::RoomsLeft,
            Self::Description,
        ]
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical())
    }
}

/// Resolved mapping from logical columns to header indices.
///
/// Required columns always have an index; optional ones may be absent, in
/// which case the field reads as empty for every row.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    pub name: usize,
    pub location: usize,
    pub price: usize,
    pub score: usize,
    pub review_count: usize,
    pub source_url: usize,
    pub review_category: Option<usize>,
    pub free_cancellation: Option<usize>,
    pub rooms_left: Option<usize>,
    pub description: Option<usize>,
}

/// Normalize a header cell for alias matching.
fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
}

/// Resolve the header row into a [`ColumnMap`].
///
/// Fails with a schema error when the header is empty, a required column is
/// missing, or two headers resolve to the same logical column.
pub fn resolve_columns(headers: &StringRecord) -> Result<ColumnMap> {
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(HotelScrubError::schema("input file has no header row"));
    }

    let all: Vec<Column> = Column::required()
        .iter()
        .chain(Column::optional())
        .copied()
        .collect();

    let mut found: Vec<Option<usize>> = vec![None; all.len()];

    for (idx, raw) in headers.iter().enumerate() {
        let normalized = normalize_header(raw);
        for (slot, column) in all.iter().enumerate() {
            if column.aliases().contains(&normalized.as_str()) {
                if let Some(prev) = found[slot] {
                    return Err(HotelScrubError::schema(format!(
                        "columns {} and {} both map to '{column}'",
                        prev + 1,
                        idx + 1,
                    )));
                }
                found[slot] = Some(idx);
            }
        }
    }

    let index_of = |column: Column| -> Option<usize> {
        all.iter()
            .position(|c| *c == column)
            .and_then(|slot| found[slot])
    };

    let require = |column: Column| -> Result<usize> {
        index_of(column).ok_or_else(|| {
            HotelScrubError::schema(format!("required column '{column}' not found in header"))
        })
    };

    Ok(ColumnMap {
        name: require(Column::Name)?,
        location: require(Column::Location)?,
        price: require(Column::Price)?,
        score: require(Column::Score)?,
        review_count: require(Column::ReviewCount)?,
        source_url: require(Column::SourceUrl)?,
        review_category: index_of(Column::ReviewCategory),
        free_cancellation: index_of(Column::FreeCancellation),
        rooms_left: index_of(Column::RoomsLeft),
        description: index_of(Column::Description),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cells: &[&str]) -> StringRecord {
        StringRecord::from(cells.to_vec())
    }

    #[test]
    fn resolves_canonical_headers() {
        let map = resolve_columns(&headers(&[
            "name",
            "location",
            "price",
            "score",
            "review_count",
            "source_url",
        ]))
        .expect("resolve");
        assert_eq!(map.name, 0);
        assert_eq!(map.source_url, 5);
        assert!(map.description.is_none());
    }

    #[test]
    fn resolves_scraper_aliases() {
        let map = resolve_columns(&headers(&[
            "hotel_name",
            "Location",
            "Price",
            "rating",
            "reviews",
            "url",
            "Rooms Left",
        ]))
        .expect("resolve");
        assert_eq!(map.name, 0);
        assert_eq!(map.score, 3);
        assert_eq!(map.review_count, 4);
        assert_eq!(map.rooms_left, Some(6));
    }

    #[test]
    fn header_normalization_handles_bom_and_case() {
        let map = resolve_columns(&headers(&[
            "\u{feff}Hotel Name",
            "LOCATION",
            "price",
            "Review-Score",
            "review_count",
            "link",
        ]))
        .expect("resolve");
        assert_eq!(map.name, 0);
        assert_eq!(map.score, 3);
    }

    #[test]
    fn missing_required_column_is_schema_error() {
        let err = resolve_columns(&headers(&[
            "name",
            "location",
            "score",
            "review_count",
            "source_url",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("'price'"));
    }

    #[test]
    fn ambiguous_column_is_schema_error() {
        let err = resolve_columns(&headers(&[
            "name",
            "hotel_name",
            "location",
            "price",
            "score",
            "review_count",
            "source_url",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn empty_header_is_schema_error() {
        let err = resolve_columns(&headers(&["", " "])).unwrap_err();
        assert!(err.to_string().contains("no header"));
    }
}
