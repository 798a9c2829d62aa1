//! Cleaned-output and aggregate-view rendering.
//!
//! Both views are rendered to bytes first so the pipeline can hash exactly
//! what it writes. Formatting rules are fixed: parsed values (price, score)
//! keep their shortest round-trip representation, computed means get a
//! fixed number of decimals. Two runs over the same input therefore
//! produce byte-identical files.

use std::path::Path;

use hotelscrub_shared::{HotelListing, HotelScrubError, Result, ReviewCategory};

use crate::metrics::CityAggregate;

/// Column order of the cleaned output file.
pub const CLEANED_HEADER: [&str; 11] = [
    "name",
    "city",
    "price",
    "score",
    "review_count",
    "review_category",
    "free_cancellation",
    "rooms_left",
    "description",
    "source_url",
    "popularity",
];

/// Column order of the per-city aggregates file.
pub const AGGREGATES_HEADER: [&str; 9] = [
    "city",
    "listings",
    "priced",
    "avg_price",
    "min_price",
    "max_price",
    "avg_score",
    "avg_popularity",
    "free_cancellation_rate",
];

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Shortest round-trip representation; empty cell for unset.
fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Fixed-precision representation; empty cell for unset.
fn fmt_fixed(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{v:.decimals$}"))
        .unwrap_or_default()
}

fn fmt_opt_u32(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn fmt_opt_bool(value: Option<bool>) -> String {
    match value {
        Some(true) => "true".into(),
        Some(false) => "false".into(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the cleaned dataset as CSV bytes, rows in the given order.
pub fn render_cleaned(listings: &[HotelListing]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CLEANED_HEADER)?;

    for listing in listings {
        let price = fmt_opt(listing.price);
        let score = fmt_opt(listing.score);
        let review_count = fmt_opt_u32(listing.review_count);
        let free_cancellation = fmt_opt_bool(listing.free_cancellation);
        let rooms_left = fmt_opt_u32(listing.rooms_left);
        let popularity = fmt_fixed(listing.popularity, 4);

        wtr.write_record([
            listing.name.as_str(),
            listing.city.as_str(),
            price.as_str(),
            score.as_str(),
            review_count.as_str(),
            listing
                .review_category
                .as_ref()
                .map(ReviewCategory::as_str)
                .unwrap_or_default(),
            free_cancellation.as_str(),
            rooms_left.as_str(),
            listing.description.as_deref().unwrap_or_default(),
            listing.source_url.as_str(),
            popularity.as_str(),
        ])?;
    }

    wtr.into_inner()
        .map_err(|e| HotelScrubError::Csv(e.to_string()))
}

/// Render the per-city aggregate view as CSV bytes.
pub fn render_aggregates(aggregates: &[CityAggregate]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(AGGREGATES_HEADER)?;

    for agg in aggregates {
        let listings = agg.listings.to_string();
        let priced = agg.priced.to_string();
        let avg_price = fmt_fixed(agg.avg_price, 2);
        let min_price = fmt_opt(agg.min_price);
        let max_price = fmt_opt(agg.max_price);
        let avg_score = fmt_fixed(agg.avg_score, 2);
        let avg_popularity = fmt_fixed(agg.avg_popularity, 4);
        let rate = fmt_fixed(agg.free_cancellation_rate, 3);

        wtr.write_record([
            agg.city.as_str(),
            listings.as_str(),
            priced.as_str(),
            avg_price.as_str(),
            min_price.as_str(),
            max_price.as_str(),
            avg_score.as_str(),
            avg_popularity.as_str(),
            rate.as_str(),
        ])?;
    }

    wtr.into_inner()
        .map_err(|e| HotelScrubError::Csv(e.to_string()))
}

// ---------------------------------------------------------------------------
// Reading back
// ---------------------------------------------------------------------------

/// Read a cleaned file back into memory (used by the `stats` command).
///
/// The file must carry the exact cleaned header; anything else is a
/// validation error, not a skip — this parser is strict because the input
/// is our own output.
pub fn read_cleaned(path: &Path) -> Result<Vec<HotelListing>> {
    let file = std::fs::File::open(path).map_err(|e| HotelScrubError::io(path, e))?;
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = rdr.headers()?;
    if headers.iter().ne(CLEANED_HEADER) {
        return Err(HotelScrubError::validation(format!(
            "{} is not a cleaned dataset (unexpected header)",
            path.display()
        )));
    }

    let mut listings = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        listings.push(parse_cleaned_row(&record).map_err(|msg| {
            HotelScrubError::validation(format!("row {}: {msg}", idx + 2))
        })?);
    }
    Ok(listings)
}

fn parse_cleaned_row(record: &csv::StringRecord) -> std::result::Result<HotelListing, String> {
    let cell = |idx: usize| record.get(idx).unwrap_or_default();

    let opt_f64 = |idx: usize| -> std::result::Result<Option<f64>, String> {
        let raw = cell(idx);
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse()
            .map(Some)
            .map_err(|_| format!("bad number {raw:?} in '{}'", CLEANED_HEADER[idx]))
    };
    let opt_u32 = |idx: usize| -> std::result::Result<Option<u32>, String> {
        let raw = cell(idx);
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse()
            .map(Some)
            .map_err(|_| format!("bad integer {raw:?} in '{}'", CLEANED_HEADER[idx]))
    };
    let opt_bool = |idx: usize| -> std::result::Result<Option<bool>, String> {
        match cell(idx) {
            "" => Ok(None),
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(format!("bad boolean {other:?} in '{}'", CLEANED_HEADER[idx])),
        }
    };

    Ok(HotelListing {
        name: cell(0).to_string(),
        city: cell(1).to_string(),
        price: opt_f64(2)?,
        score: opt_f64(3)?,
        review_count: opt_u32(4)?,
        review_category: ReviewCategory::parse(cell(5)),
        free_cancellation: opt_bool(6)?,
        rooms_left: opt_u32(7)?,
        description: {
            let d = cell(8);
            (!d.is_empty()).then(|| d.to_string())
        },
        source_url: cell(9).to_string(),
        popularity: opt_f64(10)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HotelListing {
        HotelListing {
            name: "Sample Inn".into(),
            city: "Dublin".into(),
            price: Some(150.0),
            score: Some(8.5),
            review_count: Some(120),
            review_category: Some(ReviewCategory::VeryGood),
            free_cancellation: Some(true),
            rooms_left: Some(3),
            description: Some("City-centre rooms".into()),
            source_url: "https://example.com/sample".into(),
            popularity: Some(17.979),
        }
    }

    #[test]
    fn cleaned_render_is_stable() {
        let bytes = render_cleaned(&[sample()]).expect("render");
        let text = String::from_utf8(bytes).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), CLEANED_HEADER.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "Sample Inn,Dublin,150,8.5,120,Very Good,true,3,City-centre rooms,\
             https://example.com/sample,17.9790"
        );
    }

    #[test]
    fn unset_fields_render_empty() {
        let listing = HotelListing {
            price: None,
            score: None,
            review_count: None,
            review_category: None,
            free_cancellation: None,
            rooms_left: None,
            description: None,
            popularity: None,
            ..sample()
        };
        let bytes = render_cleaned(&[listing]).expect("render");
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.lines().nth(1).unwrap().contains(",,,,,,,"));
    }

    #[test]
    fn cleaned_roundtrip_through_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("clean.csv");
        let original = vec![sample()];

        std::fs::write(&path, render_cleaned(&original).expect("render")).expect("write");
        let read_back = read_cleaned(&path).expect("read");
        assert_eq!(read_back, original);
    }

    #[test]
    fn read_cleaned_rejects_foreign_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("other.csv");
        std::fs::write(&path, "a,b,c\n1,2,3\n").expect("write");

        let err = read_cleaned(&path).unwrap_err();
        assert!(err.to_string().contains("not a cleaned dataset"));
    }

    #[test]
    fn aggregates_render_fixed_precision() {
        let agg = CityAggregate {
            city: "Dublin".into(),
            listings: 3,
            priced: 2,
            avg_price: Some(150.0),
            min_price: Some(100.0),
            max_price: Some(200.0),
            avg_score: Some(7.333333),
            avg_popularity: Some(16.1234),
            free_cancellation_rate: Some(0.5),
        };
        let bytes = render_aggregates(&[agg]).expect("render");
        let text = String::from_utf8(bytes).expect("utf8");
        assert_eq!(
            text.lines().nth(1).unwrap(),
            "Dublin,3,2,150.00,100,200,7.33,16.1234,0.500"
        );
    }
}
