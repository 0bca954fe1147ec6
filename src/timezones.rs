use std::str::FromStr;

use chrono_tz::{TZ_VARIANTS, Tz};

/// The GMT-offset pseudo-region; its entries are not places and are left out
/// of the continent menu.
const EXCLUDED_REGION: &str = "Etc";

/// Sorted region names ("continents") of every `Region/Locality` zone id in
/// the canonical table.
pub fn continents() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for tz in TZ_VARIANTS {
        if let Some((region, _)) = tz.name().split_once('/') {
            if region != EXCLUDED_REGION && !out.contains(&region) {
                out.push(region);
            }
        }
    }
    out.sort_unstable();
    out
}

/// Sorted localities under one region. The remainder after the first `/` is
/// kept whole so nested ids ("Argentina/Buenos_Aires") re-join correctly.
pub fn cities(continent: &str) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for tz in TZ_VARIANTS {
        if let Some((region, rest)) = tz.name().split_once('/') {
            if region == continent {
                out.push(rest);
            }
        }
    }
    out.sort_unstable();
    out
}

/// True iff `id` names a zone in the canonical table.
pub fn zone_exists(id: &str) -> bool {
    Tz::from_str(id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continents_cover_inhabited_regions() {
        let continents = continents();
        for expected in ["Africa", "America", "Asia", "Australia", "Europe", "Pacific"] {
            assert!(continents.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn offset_pseudo_region_is_not_offered() {
        assert!(!continents().contains(&"Etc"));
    }

    #[test]
    fn continents_are_sorted_and_unique() {
        let continents = continents();
        let mut sorted = continents.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(continents, sorted);
    }

    #[test]
    fn every_continent_has_cities() {
        for continent in continents() {
            assert!(!cities(continent).is_empty(), "{continent} has no cities");
        }
    }

    #[test]
    fn cities_are_sorted() {
        let cities = cities("Europe");
        let mut sorted = cities.clone();
        sorted.sort_unstable();
        assert_eq!(cities, sorted);
    }

    #[test]
    fn cities_re_join_into_valid_zone_ids() {
        for city in cities("Europe") {
            assert!(zone_exists(&format!("Europe/{city}")));
        }
    }

    #[test]
    fn real_zone_ids_resolve() {
        assert!(zone_exists("Europe/Paris"));
        assert!(zone_exists("America/Argentina/Buenos_Aires"));
    }

    #[test]
    fn unknown_zone_ids_are_rejected() {
        assert!(!zone_exists("Europe/Atlantis"));
        assert!(!zone_exists("Mars/Olympus_Mons"));
        assert!(!zone_exists(""));
    }
}
