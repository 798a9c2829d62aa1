//! Name normalization and city derivation.
//!
//! Scraped titles often carry the locality inline ("Sample Inn, Dublin 2"),
//! and the location column mixes district, city, and postal numbers. The
//! rules here are deterministic: the cleaned name is the text before the
//! first comma of the raw name; the city is the last comma-delimited token
//! of the location string (falling back to the raw name's remainder), with
//! one trailing postal-district number stripped.

/// Collapse internal whitespace runs and trim.
fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize the hotel name: text before the first comma,
/// whitespace-collapsed. `None` when nothing remains.
pub fn normalize_name(raw: &str) -> Option<String> {
    let before_comma = raw.split(',').next().unwrap_or("");
    let name = collapse_ws(before_comma);
    (!name.is_empty()).then_some(name)
}

/// The locality embedded in a raw name, if any: everything after the first
/// comma ("Sample Inn, Dublin 2" → "Dublin 2").
fn name_locality(raw_name: &str) -> Option<&str> {
    raw_name
        .split_once(',')
        .map(|(_, rest)| rest)
        .filter(|rest| !rest.trim().is_empty())
}

/// Strip one trailing all-digit token ("Dublin 2" → "Dublin").
fn strip_district(token: &str) -> String {
    let mut words: Vec<&str> = token.split_whitespace().collect();
    if words.len() > 1 && words.last().is_some_and(|w| w.chars().all(|c| c.is_ascii_digit())) {
        words.pop();
    }
    words.join(" ")
}

/// Derive the city for a listing.
///
/// The location column is the primary source; when it is empty the locality
/// embedded in the raw name is used instead. The city is the last
/// comma-delimited token of that string, district number stripped.
/// `None` when no city can be derived.
pub fn derive_city(location: &str, raw_name: &str) -> Option<String> {
    let source = if location.trim().is_empty() {
        name_locality(raw_name)?
    } else {
        location
    };

    let last_token = source.rsplit(',').next().unwrap_or("");
    let city = strip_district(last_token);
    (!city.is_empty()).then_some(city)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_takes_text_before_first_comma() {
        assert_eq!(normalize_name("Sample Inn, Dublin 2").as_deref(), Some("Sample Inn"));
        assert_eq!(normalize_name("Quay  House").as_deref(), Some("Quay House"));
        assert_eq!(normalize_name("  The Harbour Hotel  ").as_deref(), Some("The Harbour Hotel"));
    }

    #[test]
    fn name_empty_after_normalization_is_none() {
        assert_eq!(normalize_name(""), None);
        assert_eq!(normalize_name("   "), None);
        assert_eq!(normalize_name(", Dublin"), None);
    }

    #[test]
    fn city_from_location_column() {
        assert_eq!(derive_city("Temple Bar, Dublin", "X").as_deref(), Some("Dublin"));
        assert_eq!(derive_city("Galway", "X").as_deref(), Some("Galway"));
        assert_eq!(derive_city("Dublin 2", "X").as_deref(), Some("Dublin"));
    }

    #[test]
    fn city_falls_back_to_name_locality() {
        assert_eq!(
            derive_city("", "Sample Inn, Dublin 2").as_deref(),
            Some("Dublin")
        );
        assert_eq!(
            derive_city("  ", "B&B, Salthill, Galway").as_deref(),
            Some("Galway")
        );
    }

    #[test]
    fn city_underivable_is_none() {
        assert_eq!(derive_city("", "Sample Inn"), None);
        assert_eq!(derive_city("", ""), None);
        assert_eq!(derive_city(",", "X"), None);
    }

    #[test]
    fn district_stripping_requires_preceding_word() {
        assert_eq!(derive_city("Cork 4", "X").as_deref(), Some("Cork"));
        // A lone number is kept as-is rather than stripped to nothing.
        assert_eq!(derive_city("42", "X").as_deref(), Some("42"));
    }
}
