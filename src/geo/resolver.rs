//! Location resolution
//!
//! Consumes geo-lookup results and turns them into normalized, deduplicated
//! (city, state) candidates, and validates whether a (city, state, ZIP)
//! triple is mutually consistent against the reference dataset. Every
//! failure degrades to a negative result; callers never see an error here.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::lookup::ZipGeoLookup;

/// A normalized (city, state) pair produced by radius resolution
///
/// Value type with structural equality and hashing; produced fresh per
/// query and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationCandidate {
    /// City name, title-cased per word
    pub city: String,
    /// Uppercase 2-letter state code
    pub state: String,
}

/// Title-case a city name word by word
///
/// Splits on spaces, uppercases the first character of each non-empty word
/// and lowercases the rest, and rejoins with single spaces. Empty input
/// yields empty output.
#[must_use]
pub fn normalize_city(raw: &str) -> String {
    raw.split(' ')
        .filter(|word| !word.is_empty())
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase a state code
///
/// Length and alphabetic checks belong to form validation, not here.
#[must_use]
pub fn normalize_state(raw: &str) -> String {
    raw.to_uppercase()
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Service resolving ZIP radius queries into location candidates
#[derive(Debug, Clone)]
pub struct LocationResolver {
    lookup: ZipGeoLookup,
}

impl LocationResolver {
    /// Create a resolver over the given geo-lookup adapter
    #[must_use]
    pub fn new(lookup: ZipGeoLookup) -> Self {
        Self { lookup }
    }

    /// The geo-lookup adapter this resolver queries
    #[must_use]
    pub fn lookup(&self) -> &ZipGeoLookup {
        &self.lookup
    }

    /// Unique normalized (city, state) pairs within radius of a ZIP
    ///
    /// Expands the ZIP through the reference dataset, resolves each match
    /// to its city and state, normalizes, and deduplicates. Any lookup
    /// failure (malformed or unknown ZIP) yields an empty set; callers
    /// treat an empty set as "no matching locations known."
    #[must_use]
    pub fn resolve_locations_in_radius(
        &self,
        zip: &str,
        radius_miles: u32,
    ) -> HashSet<LocationCandidate> {
        let zips = match self.lookup.zips_within_radius(zip, radius_miles) {
            Ok(zips) => zips,
            Err(err) => {
                debug!("Radius resolution for {zip:?} failed: {err}");
                return HashSet::new();
            }
        };

        zips.iter()
            .filter_map(|zip| self.lookup.lookup(zip))
            .map(|record| LocationCandidate {
                city: normalize_city(&record.city),
                state: normalize_state(&record.state),
            })
            .collect()
    }

    /// Whether a (city, state, ZIP) triple is mutually consistent
    ///
    /// False when any field is empty, when the ZIP is malformed or absent
    /// from the reference dataset, or when the reference record's city and
    /// state do not both case-insensitively equal the supplied values.
    /// Exact comparison only; full state names do not match the stored
    /// 2-letter code.
    #[must_use]
    pub fn valid_city_state_zip(&self, city: &str, state: &str, zip: &str) -> bool {
        if city.is_empty() || state.is_empty() || zip.is_empty() {
            return false;
        }

        let Some(record) = self.lookup.lookup(zip) else {
            return false;
        };

        city.eq_ignore_ascii_case(&record.city) && state.eq_ignore_ascii_case(&record.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::dataset::ZipDatabase;
    use rstest::rstest;
    use std::sync::Arc;

    fn resolver() -> LocationResolver {
        LocationResolver::new(ZipGeoLookup::new(Arc::new(ZipDatabase::bundled().unwrap())))
    }

    fn candidate(city: &str, state: &str) -> LocationCandidate {
        LocationCandidate {
            city: city.to_string(),
            state: state.to_string(),
        }
    }

    #[rstest]
    #[case("new york", "New York")]
    #[case("NEW YORK", "New York")]
    #[case("auburn", "Auburn")]
    #[case("salt lake city", "Salt Lake City")]
    #[case("  auburn  university ", "Auburn University")]
    #[case("", "")]
    #[case("   ", "")]
    fn test_normalize_city(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_city(raw), expected);
    }

    #[rstest]
    #[case("al", "AL")]
    #[case("Al", "AL")]
    #[case("AL", "AL")]
    #[case("", "")]
    fn test_normalize_state(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_state(raw), expected);
    }

    #[test]
    fn test_resolve_five_miles_around_auburn() {
        let locations = resolver().resolve_locations_in_radius("36830", 5);

        assert!(locations.contains(&candidate("Auburn", "AL")));
        assert!(locations.contains(&candidate("Auburn University", "AL")));
        assert!(!locations.contains(&candidate("Opelika", "AL")));
    }

    #[test]
    fn test_resolve_deduplicates_same_city() {
        // 36830 and 36832 both map to Auburn, AL; one candidate comes out
        let locations = resolver().resolve_locations_in_radius("36830", 5);

        let auburn_count = locations
            .iter()
            .filter(|loc| loc.city == "Auburn" && loc.state == "AL")
            .count();
        assert_eq!(auburn_count, 1);
    }

    #[test]
    fn test_resolve_ten_miles_reaches_opelika() {
        let locations = resolver().resolve_locations_in_radius("36830", 10);

        assert!(locations.contains(&candidate("Auburn", "AL")));
        assert!(locations.contains(&candidate("Auburn University", "AL")));
        assert!(locations.contains(&candidate("Opelika", "AL")));
    }

    #[test]
    fn test_resolve_unknown_zip_is_empty() {
        assert!(resolver().resolve_locations_in_radius("00000", 10).is_empty());
    }

    #[test]
    fn test_resolve_malformed_zip_is_empty() {
        let resolver = resolver();
        assert!(resolver.resolve_locations_in_radius("abcde", 10).is_empty());
        assert!(resolver.resolve_locations_in_radius("", 10).is_empty());
    }

    // City/state/ZIP cross-validation, all agreement combinations
    #[rstest]
    #[case("Auburn", "AL", "36830", true)]
    #[case("auburn", "al", "36830", true)] // comparison is case-insensitive
    #[case("AUBURN", "AL", "36830", true)]
    #[case("Auburn", "AL", "35004", false)] // wrong ZIP
    #[case("Auburn", "CO", "36830", false)] // wrong state
    #[case("Auburn", "CO", "35004", false)]
    #[case("Birmingham", "AL", "36830", false)] // wrong city
    #[case("Birmingham", "AL", "32845", false)]
    #[case("Birmingham", "CO", "36830", false)]
    fn test_valid_city_state_zip_matrix(
        #[case] city: &str,
        #[case] state: &str,
        #[case] zip: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(resolver().valid_city_state_zip(city, state, zip), expected);
    }

    #[rstest]
    #[case("", "", "")]
    #[case("", "AL", "36830")]
    #[case("Auburn", "", "36830")]
    #[case("Auburn", "AL", "")]
    #[case("Auburn", "Alabama", "36830")] // full state name never matches the code
    #[case("Auburn", "AL", "alksdfj,xcmnvopweihrlskdjfn12345678654")]
    #[case("alksdfj,xcmnvopweihrlskdjfn12345678654", "AL", "36830")]
    #[case("Auburn", "AL", "00000")]
    fn test_valid_city_state_zip_fails_closed(
        #[case] city: &str,
        #[case] state: &str,
        #[case] zip: &str,
    ) {
        assert!(!resolver().valid_city_state_zip(city, state, zip));
    }
}
