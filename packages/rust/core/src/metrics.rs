//! Derived metrics: popularity index and per-city aggregates.

use std::collections::BTreeMap;

use hotelscrub_shared::HotelListing;

// ---------------------------------------------------------------------------
// Popularity index
// ---------------------------------------------------------------------------

/// Popularity index: `score * log10(review_count + 10)`.
///
/// The +10 shift keeps the log positive for listings with few reviews, so
/// the index stays monotone in both arguments.
pub fn popularity(score: f64, review_count: u32) -> f64 {
    score * (f64::from(review_count) + 10.0).log10()
}

/// Popularity for a listing — defined only when both score and review
/// count are present.
pub fn popularity_of(listing: &HotelListing) -> Option<f64> {
    match (listing.score, listing.review_count) {
        (Some(score), Some(count)) => Some(popularity(score, count)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Per-city aggregates
// ---------------------------------------------------------------------------

/// One row of the per-city summary view.
#[derive(Debug, Clone, PartialEq)]
pub struct CityAggregate {
    pub city: String,
    /// Listings in this city.
    pub listings: u64,
    /// Listings with a price present.
    pub priced: u64,
    pub avg_price: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub avg_score: Option<f64>,
    pub avg_popularity: Option<f64>,
    /// Share of listings with free cancellation, among those where the
    /// field is known.
    pub free_cancellation_rate: Option<f64>,
}

#[derive(Default)]
struct CityAcc {
    listings: u64,
    price_sum: f64,
    priced: u64,
    min_price: Option<f64>,
    max_price: Option<f64>,
    score_sum: f64,
    scored: u64,
    popularity_sum: f64,
    popular: u64,
    cancellation_known: u64,
    cancellation_free: u64,
}

impl CityAcc {
    fn push(&mut self, listing: &HotelListing) {
        self.listings += 1;
        if let Some(price) = listing.price {
            self.priced += 1;
            self.price_sum += price;
            self.min_price = Some(self.min_price.map_or(price, |m| m.min(price)));
            self.max_price = Some(self.max_price.map_or(price, |m| m.max(price)));
        }
        if let Some(score) = listing.score {
            self.scored += 1;
            self.score_sum += score;
        }
        if let Some(popularity) = listing.popularity {
            self.popular += 1;
            self.popularity_sum += popularity;
        }
        if let Some(free) = listing.free_cancellation {
            self.cancellation_known += 1;
            if free {
                self.cancellation_free += 1;
            }
        }
    }

    fn finish(self, city: String) -> CityAggregate {
        let mean = |sum: f64, n: u64| (n > 0).then(|| sum / n as f64);
        CityAggregate {
            city,
            listings: self.listings,
            priced: self.priced,
            avg_price: mean(self.price_sum, self.priced),
            min_price: self.min_price,
            max_price: self.max_price,
            avg_score: mean(self.score_sum, self.scored),
            avg_popularity: mean(self.popularity_sum, self.popular),
            free_cancellation_rate: mean(
                self.cancellation_free as f64,
                self.cancellation_known,
            ),
        }
    }
}

/// Compute the per-city summary, one row per city, sorted by city name.
pub fn aggregate_by_city(listings: &[HotelListing]) -> Vec<CityAggregate> {
    let mut cities: BTreeMap<String, CityAcc> = BTreeMap::new();
    for listing in listings {
        cities.entry(listing.city.clone()).or_default().push(listing);
    }
    cities
        .into_iter()
        .map(|(city, acc)| acc.finish(city))
        .collect()
}
