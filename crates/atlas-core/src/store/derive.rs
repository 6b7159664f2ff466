// ── Derived views ──
//
// Pure functions over the collection. Recomputed on every read; the store
// never caches them.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::model::Country;

/// Distinct non-empty regions, ascending.
pub fn region_set(countries: &[Arc<Country>]) -> Vec<String> {
    countries
        .iter()
        .map(|c| c.region.as_str())
        .filter(|r| !r.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Countries whose common name contains `search` (case-insensitive) and,
/// when a region is given, whose region equals it exactly. Source order.
pub fn filter_countries(
    countries: &[Arc<Country>],
    search: &str,
    region: Option<&str>,
) -> Vec<Arc<Country>> {
    let needle = search.to_lowercase();
    countries
        .iter()
        .filter(|c| region.is_none_or(|r| c.region == r))
        .filter(|c| c.name_contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::fixtures::country;

    fn sample() -> Vec<Arc<Country>> {
        vec![
            Arc::new(country("France", "FRA", "Europe")),
            Arc::new(country("Germany", "DEU", "Europe")),
            Arc::new(country("Japan", "JPN", "Asia")),
        ]
    }

    fn names(countries: &[Arc<Country>]) -> Vec<&str> {
        countries.iter().map(|c| c.name.common.as_str()).collect()
    }

    #[test]
    fn regions_are_sorted_and_distinct() {
        assert_eq!(region_set(&sample()), vec!["Asia", "Europe"]);
    }

    #[test]
    fn empty_region_is_skipped() {
        let mut countries = sample();
        countries.push(Arc::new(country("Nowhere", "NWH", "")));
        assert_eq!(region_set(&countries), vec!["Asia", "Europe"]);
    }

    #[test]
    fn search_and_region_combine() {
        let countries = sample();
        assert_eq!(
            names(&filter_countries(&countries, "an", Some("Europe"))),
            vec!["France"]
        );
        assert!(filter_countries(&countries, "an", Some("Africa")).is_empty());
        assert_eq!(names(&filter_countries(&countries, "a", None)), vec!["France", "Japan"]);
        assert_eq!(names(&filter_countries(&countries, "GER", None)), vec!["Germany"]);
        assert_eq!(
            names(&filter_countries(&countries, "", Some("Europe"))),
            vec!["France", "Germany"]
        );
    }

    #[test]
    fn region_match_is_exact() {
        assert!(filter_countries(&sample(), "", Some("europe")).is_empty());
    }

    // ── Properties ───────────────────────────────────────────────────

    fn arb_countries() -> impl Strategy<Value = Vec<Arc<Country>>> {
        let regions = prop::sample::select(vec!["", "Africa", "Americas", "Asia", "Europe"]);
        prop::collection::vec(("[a-zA-Z ]{1,12}", regions), 0..24).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, region))| {
                    Arc::new(country(&name, &format!("C{i:02}"), region))
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn region_set_is_strictly_ascending(countries in arb_countries()) {
            let regions = region_set(&countries);
            prop_assert!(regions.windows(2).all(|w| w[0] < w[1]));
            for region in &regions {
                prop_assert!(countries.iter().any(|c| &c.region == region));
            }
        }

        #[test]
        fn unfiltered_view_is_the_whole_collection(countries in arb_countries()) {
            let all = filter_countries(&countries, "", None);
            prop_assert_eq!(all.len(), countries.len());
            prop_assert!(all.iter().zip(&countries).all(|(a, b)| Arc::ptr_eq(a, b)));
        }

        #[test]
        fn filtered_view_is_an_ordered_subsequence(
            countries in arb_countries(),
            search in "[a-zA-Z]{0,3}",
            region in prop::option::of(prop::sample::select(vec!["Asia", "Europe"])),
        ) {
            let filtered = filter_countries(&countries, &search, region);
            let needle = search.to_lowercase();

            let mut rest = countries.iter();
            for kept in &filtered {
                prop_assert!(rest.any(|c| Arc::ptr_eq(c, kept)));
                prop_assert!(kept.name.common.to_lowercase().contains(&needle));
                if let Some(r) = region {
                    prop_assert_eq!(kept.region.as_str(), r);
                }
            }

            let expected = countries
                .iter()
                .filter(|c| {
                    c.name.common.to_lowercase().contains(&needle)
                        && region.is_none_or(|r| c.region == r)
                })
                .count();
            prop_assert_eq!(filtered.len(), expected);
        }
    }
}
