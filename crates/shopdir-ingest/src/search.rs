//! Search index and listing filters over parsed shops.

use std::collections::BTreeMap;

use shopdir_core::{BusinessType, NormalizedShop};

use crate::geo::{distance_miles, GeoPoint};

pub const DEFAULT_RADIUS_MILES: f64 = 50.0;

/// Map each lower-cased name, city, state, and zip to the ids of the shops
/// carrying it. Ids appear once per term, in shop order.
#[must_use]
pub fn build_search_index(shops: &[NormalizedShop]) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for shop in shops {
        let terms = [&shop.name, &shop.city, &shop.state, &shop.zip_code];
        for term in terms.into_iter().filter(|t| !t.is_empty()) {
            let ids = index.entry(term.to_lowercase()).or_default();
            if !ids.contains(&shop.id) {
                ids.push(shop.id.clone());
            }
        }
    }

    index
}

/// Listing filters. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct ShopFilter {
    /// Case-insensitive match on name, city, or state; substring on zip.
    pub search_term: Option<String>,
    /// Exact state code.
    pub state: Option<String>,
    pub zip_code: Option<String>,
    /// Radius for `zip_code`; [`DEFAULT_RADIUS_MILES`] when unset.
    pub radius_miles: Option<f64>,
    /// Any-of; empty means all types.
    pub business_types: Vec<BusinessType>,
    pub has_cbd: Option<bool>,
    pub has_kratom: Option<bool>,
}

/// Apply `filter` to `shops`, preserving order.
///
/// The zip filter is proximity-based: the first remaining shop with exactly
/// that zip becomes the center and shops within the radius are kept. When no
/// shop has that zip, shops whose zip starts with it are kept instead.
#[must_use]
pub fn filter_shops<'a>(shops: &'a [NormalizedShop], filter: &ShopFilter) -> Vec<&'a NormalizedShop> {
    let mut kept: Vec<&NormalizedShop> = shops.iter().collect();

    if let Some(term) = filter.search_term.as_deref().filter(|t| !t.is_empty()) {
        let term = term.to_lowercase();
        kept.retain(|shop| {
            shop.name.to_lowercase().contains(&term)
                || shop.city.to_lowercase().contains(&term)
                || shop.state.to_lowercase().contains(&term)
                || shop.zip_code.contains(&term)
        });
    }

    if let Some(state) = filter.state.as_deref().filter(|s| !s.is_empty()) {
        kept.retain(|shop| shop.state == state);
    }

    if let Some(zip) = filter.zip_code.as_deref().filter(|z| !z.is_empty()) {
        let radius = filter.radius_miles.unwrap_or(DEFAULT_RADIUS_MILES);
        kept = within_radius_of_zip(kept, zip, radius);
    }

    if !filter.business_types.is_empty() {
        kept.retain(|shop| filter.business_types.contains(&shop.business_type));
    }

    if let Some(has_cbd) = filter.has_cbd {
        kept.retain(|shop| shop.has_cbd == has_cbd);
    }

    if let Some(has_kratom) = filter.has_kratom {
        kept.retain(|shop| shop.has_kratom == has_kratom);
    }

    kept
}

fn within_radius_of_zip<'a>(
    shops: Vec<&'a NormalizedShop>,
    zip: &str,
    radius_miles: f64,
) -> Vec<&'a NormalizedShop> {
    let Some(center) = shops.iter().find(|shop| shop.zip_code == zip).map(|shop| GeoPoint {
        lat: shop.latitude,
        lng: shop.longitude,
    }) else {
        tracing::debug!(zip, "no shop at zip; falling back to prefix match");
        return shops
            .into_iter()
            .filter(|shop| shop.zip_code.starts_with(zip))
            .collect();
    };

    shops
        .into_iter()
        .filter(|shop| {
            let point = GeoPoint {
                lat: shop.latitude,
                lng: shop.longitude,
            };
            distance_miles(center, point) <= radius_miles
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::parse::parse_shops_at;

    fn sample_shops() -> Vec<NormalizedShop> {
        let text = [
            "Green Leaf CBD,1 A St,,Denver,CO,80202,1,g.com,g@g.com",
            "Mile High Vape,2 B St,,Denver,CO,80205,2,m.com,m@m.com",
            "Kratom Hut,3 C St,,Boulder,CO,80302,3,k.com,k@k.com",
            "Lone Star Tobacco,4 D St,,Austin,TX,78701,4,l.com,l@l.com",
            "Denver Smoke,5 E St,,Pueblo,CO,81003,5,d.com,d@d.com",
        ]
        .join("\n");
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        parse_shops_at(&text, now).shops
    }

    fn ids(shops: &[&NormalizedShop]) -> Vec<String> {
        shops.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn index_maps_terms_to_ids() {
        let shops = sample_shops();
        let index = build_search_index(&shops);
        assert_eq!(index["denver"], vec!["1", "2"]);
        assert_eq!(index["co"], vec!["1", "2", "3", "5"]);
        assert_eq!(index["78701"], vec!["4"]);
        assert_eq!(index["green leaf cbd"], vec!["1"]);
    }

    #[test]
    fn index_skips_empty_terms() {
        let mut shops = sample_shops();
        shops[0].zip_code.clear();
        let index = build_search_index(&shops);
        assert!(!index.contains_key(""));
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let shops = sample_shops();
        assert_eq!(filter_shops(&shops, &ShopFilter::default()).len(), shops.len());
    }

    #[test]
    fn search_term_matches_name_city_state_and_zip() {
        let shops = sample_shops();
        let by_city = ShopFilter {
            search_term: Some("DENVER".to_string()),
            ..ShopFilter::default()
        };
        // "Denver Smoke" matches by name even though it is in Pueblo.
        assert_eq!(ids(&filter_shops(&shops, &by_city)), vec!["1", "2", "5"]);

        let by_zip = ShopFilter {
            search_term: Some("787".to_string()),
            ..ShopFilter::default()
        };
        assert_eq!(ids(&filter_shops(&shops, &by_zip)), vec!["4"]);
    }

    #[test]
    fn state_filter_is_exact() {
        let shops = sample_shops();
        let filter = ShopFilter {
            state: Some("TX".to_string()),
            ..ShopFilter::default()
        };
        assert_eq!(ids(&filter_shops(&shops, &filter)), vec!["4"]);
    }

    #[test]
    fn zip_filter_uses_radius_around_matching_shop() {
        let shops = sample_shops();
        let filter = ShopFilter {
            zip_code: Some("80202".to_string()),
            radius_miles: Some(5.0),
            ..ShopFilter::default()
        };
        // Synthesized points for 80202 and 80205 sit within a fraction of a
        // degree; 80302 (tail 2) lands on the same point as 80202.
        let kept = ids(&filter_shops(&shops, &filter));
        assert!(kept.contains(&"1".to_string()));
        assert!(!kept.contains(&"4".to_string()));
    }

    #[test]
    fn zip_filter_falls_back_to_prefix() {
        let shops = sample_shops();
        let filter = ShopFilter {
            zip_code: Some("81".to_string()),
            ..ShopFilter::default()
        };
        assert_eq!(ids(&filter_shops(&shops, &filter)), vec!["5"]);
    }

    #[test]
    fn business_type_and_flag_filters() {
        let shops = sample_shops();
        let vape_or_tobacco = ShopFilter {
            business_types: vec![BusinessType::Vape, BusinessType::Tobacco],
            ..ShopFilter::default()
        };
        assert_eq!(ids(&filter_shops(&shops, &vape_or_tobacco)), vec!["2", "4"]);

        let cbd = ShopFilter {
            has_cbd: Some(true),
            ..ShopFilter::default()
        };
        assert_eq!(ids(&filter_shops(&shops, &cbd)), vec!["1"]);

        let no_kratom = ShopFilter {
            has_kratom: Some(false),
            ..ShopFilter::default()
        };
        assert_eq!(ids(&filter_shops(&shops, &no_kratom)), vec!["1", "2", "4", "5"]);
    }
}
