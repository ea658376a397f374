//! City mentions in free text

use crate::store::SUPPORTED_CITIES;

/// Placeholder entity emitted when a query names no known city. The handlers
/// treat it like any unknown city and answer with the default-city fallback.
pub const UNRESOLVED_CITY: &str = "unknown";

/// Supported cities mentioned in `text`, deduplicated, in order of first mention
pub fn extract_cities(text: &str) -> Vec<String> {
    let mut cities: Vec<String> = Vec::new();
    for word in text.split(|c: char| !c.is_alphabetic()) {
        let word = word.to_lowercase();
        if SUPPORTED_CITIES.contains(&word.as_str()) && !cities.contains(&word) {
            cities.push(word);
        }
    }
    cities
}

/// Extracted cities, or the placeholder when there are none
pub(crate) fn cities_or_placeholder(text: &str) -> Vec<String> {
    let cities = extract_cities(text);
    if cities.is_empty() {
        tracing::debug!("no supported city mentioned, using placeholder");
        vec![UNRESOLVED_CITY.to_string()]
    } else {
        cities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_mention_order_and_dedup() {
        assert_eq!(
            extract_cities(" in London, paris and LONDON?"),
            vec!["london", "paris"]
        );
    }

    #[test]
    fn test_partial_words_do_not_match() {
        assert!(extract_cities("parisian londoners").is_empty());
    }

    #[test]
    fn test_placeholder_when_nothing_matches() {
        assert_eq!(cities_or_placeholder(" in atlantis"), vec![UNRESOLVED_CITY]);
    }
}
