//! Row cleaning for HotelScrub.
//!
//! [`clean_row`] turns one [`RawListing`] into a typed [`HotelListing`], or
//! the [`SkipReason`] that drops it. Field passes live in [`fields`] and
//! [`city`]; each is a pure function over the raw text, applied in a fixed
//! order so every dropped row reports the first failing check.

pub mod city;
pub mod fields;

use hotelscrub_shared::{HotelListing, RawListing, ReviewCategory, SkipReason};

/// Clean one raw row.
///
/// Check order: name, city, price, score, review count — the first failure
/// is the row's skip reason. The remaining fields (category, cancellation,
/// rooms left, description) never drop a row. The derived popularity index
/// is left unset here; the pipeline fills it in.
pub fn clean_row(raw: &RawListing) -> Result<HotelListing, SkipReason> {
    let name = city::normalize_name(&raw.name).ok_or(SkipReason::MissingName)?;
    let city = city::derive_city(&raw.location, &raw.name).ok_or(SkipReason::MissingCity)?;

    let price = fields::parse_price(&raw.price)?;
    let score = fields::parse_score(&raw.score)?;
    let review_count = fields::parse_review_count(&raw.review_count)?;

    let description = {
        let trimmed = raw.description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    Ok(HotelListing {
        name,
        city,
        price,
        score,
        review_count,
        review_category: ReviewCategory::parse(&raw.review_category),
        free_cancellation: fields::parse_tristate(&raw.free_cancellation),
        rooms_left: fields::parse_rooms_left(&raw.rooms_left),
        description,
        source_url: raw.source_url.trim().to_string(),
        popularity: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, location: &str, price: &str, score: &str) -> RawListing {
        RawListing {
            name: name.into(),
            location: location.into(),
            price: price.into(),
            score: score.into(),
            review_count: "120".into(),
            source_url: "https://example.com/sample".into(),
            ..RawListing::default()
        }
    }

    #[test]
    fn cleans_locality_embedded_name() {
        let listing = clean_row(&RawListing {
            name: "Sample Inn, Dublin 2".into(),
            price: "€150".into(),
            score: "8.5".into(),
            review_count: "120".into(),
            free_cancellation: "Free cancellation".into(),
            rooms_left: "3 rooms left".into(),
            source_url: "https://example.com/sample".into(),
            ..RawListing::default()
        })
        .expect("clean");

        assert_eq!(listing.name, "Sample Inn");
        assert_eq!(listing.city, "Dublin");
        assert_eq!(listing.price, Some(150.0));
        assert_eq!(listing.score, Some(8.5));
        assert_eq!(listing.review_count, Some(120));
        assert_eq!(listing.free_cancellation, Some(true));
        assert_eq!(listing.rooms_left, Some(3));
        assert!(listing.popularity.is_none());
    }

    #[test]
    fn missing_name_drops_row() {
        let err = clean_row(&raw("", "Dublin", "€150", "8.5")).unwrap_err();
        assert_eq!(err, SkipReason::MissingName);
    }

    #[test]
    fn underivable_city_drops_row() {
        let err = clean_row(&raw("Sample Inn", "", "€150", "8.5")).unwrap_err();
        assert_eq!(err, SkipReason::MissingCity);
    }

    #[test]
    fn unparsable_price_drops_row() {
        let err = clean_row(&raw("Sample Inn", "Dublin", "N/A", "8.5")).unwrap_err();
        assert_eq!(err, SkipReason::UnparsablePrice);
    }

    #[test]
    fn out_of_range_score_drops_row() {
        let err = clean_row(&raw("Sample Inn", "Dublin", "€150", "11.2")).unwrap_err();
        assert_eq!(err, SkipReason::ScoreOutOfRange);
    }

    #[test]
    fn first_failing_check_wins() {
        // Both the name and the price are bad; the name check runs first.
        let err = clean_row(&raw("", "Dublin", "N/A", "8.5")).unwrap_err();
        assert_eq!(err, SkipReason::MissingName);
    }

    #[test]
    fn empty_numeric_fields_stay_unset() {
        let listing = clean_row(&raw("Sample Inn", "Dublin", "", "")).expect("clean");
        assert_eq!(listing.price, None);
        assert_eq!(listing.score, None);
        assert_eq!(listing.free_cancellation, None);
        assert_eq!(listing.rooms_left, None);
        assert_eq!(listing.description, None);
    }

    #[test]
    fn category_is_canonicalized() {
        let mut r = raw("Sample Inn", "Dublin", "€150", "8.5");
        r.review_category = "very good".into();
        let listing = clean_row(&r).expect("clean");
        assert_eq!(listing.review_category, Some(ReviewCategory::VeryGood));
    }
}
