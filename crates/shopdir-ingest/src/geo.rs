//! Approximate coordinates for shops without geocodes.
//!
//! Each shop is placed near a fixed anchor for its state, nudged by the
//! trailing digits of its zip code so shops in one state spread out on the
//! map. This is clustering-grade positioning, not geocoding: the same
//! `(zip, state)` pair always lands on the same point.

const EARTH_RADIUS_MILES: f64 = 3958.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Geographic center of the contiguous US, used for unknown states.
pub const COUNTRY_CENTER: GeoPoint = GeoPoint {
    lat: 39.8283,
    lng: -98.5795,
};

/// Rough center of each state plus DC.
pub const STATE_ANCHORS: &[(&str, GeoPoint)] = &[
    ("AL", GeoPoint { lat: 32.7794, lng: -86.8287 }),
    ("AK", GeoPoint { lat: 64.0685, lng: -152.2782 }),
    ("AZ", GeoPoint { lat: 34.2744, lng: -111.6602 }),
    ("AR", GeoPoint { lat: 34.8938, lng: -92.4426 }),
    ("CA", GeoPoint { lat: 37.1841, lng: -119.4696 }),
    ("CO", GeoPoint { lat: 38.9972, lng: -105.5478 }),
    ("CT", GeoPoint { lat: 41.6219, lng: -72.7273 }),
    ("DE", GeoPoint { lat: 38.9896, lng: -75.5050 }),
    ("FL", GeoPoint { lat: 28.6305, lng: -82.4497 }),
    ("GA", GeoPoint { lat: 32.6415, lng: -83.4426 }),
    ("HI", GeoPoint { lat: 20.2927, lng: -156.3737 }),
    ("ID", GeoPoint { lat: 44.3509, lng: -114.6130 }),
    ("IL", GeoPoint { lat: 40.0417, lng: -89.1965 }),
    ("IN", GeoPoint { lat: 39.8942, lng: -86.2816 }),
    ("IA", GeoPoint { lat: 42.0751, lng: -93.4960 }),
    ("KS", GeoPoint { lat: 38.4937, lng: -98.3804 }),
    ("KY", GeoPoint { lat: 37.5347, lng: -85.3021 }),
    ("LA", GeoPoint { lat: 31.0689, lng: -91.9968 }),
    ("ME", GeoPoint { lat: 45.3695, lng: -69.2428 }),
    ("MD", GeoPoint { lat: 39.0550, lng: -76.7909 }),
    ("MA", GeoPoint { lat: 42.2596, lng: -71.8083 }),
    ("MI", GeoPoint { lat: 44.3467, lng: -85.4102 }),
    ("MN", GeoPoint { lat: 46.2807, lng: -94.3053 }),
    ("MS", GeoPoint { lat: 32.7364, lng: -89.6678 }),
    ("MO", GeoPoint { lat: 38.3566, lng: -92.4580 }),
    ("MT", GeoPoint { lat: 47.0527, lng: -109.6333 }),
    ("NE", GeoPoint { lat: 41.5378, lng: -99.7951 }),
    ("NV", GeoPoint { lat: 39.3289, lng: -116.6312 }),
    ("NH", GeoPoint { lat: 43.6805, lng: -71.5811 }),
    ("NJ", GeoPoint { lat: 40.1907, lng: -74.6728 }),
    ("NM", GeoPoint { lat: 34.4071, lng: -106.1126 }),
    ("NY", GeoPoint { lat: 42.9538, lng: -75.5268 }),
    ("NC", GeoPoint { lat: 35.5557, lng: -79.3877 }),
    ("ND", GeoPoint { lat: 47.4501, lng: -100.4659 }),
    ("OH", GeoPoint { lat: 40.2862, lng: -82.7937 }),
    ("OK", GeoPoint { lat: 35.5889, lng: -97.4943 }),
    ("OR", GeoPoint { lat: 43.9336, lng: -120.5583 }),
    ("PA", GeoPoint { lat: 40.8781, lng: -77.7996 }),
    ("RI", GeoPoint { lat: 41.6762, lng: -71.5562 }),
    ("SC", GeoPoint { lat: 33.9169, lng: -80.8964 }),
    ("SD", GeoPoint { lat: 44.4443, lng: -100.2263 }),
    ("TN", GeoPoint { lat: 35.8580, lng: -86.3505 }),
    ("TX", GeoPoint { lat: 31.4757, lng: -99.3312 }),
    ("UT", GeoPoint { lat: 39.3055, lng: -111.6703 }),
    ("VT", GeoPoint { lat: 44.0687, lng: -72.6658 }),
    ("VA", GeoPoint { lat: 37.5215, lng: -78.8537 }),
    ("WA", GeoPoint { lat: 47.3826, lng: -120.4472 }),
    ("WV", GeoPoint { lat: 38.6409, lng: -80.6227 }),
    ("WI", GeoPoint { lat: 44.6243, lng: -89.9941 }),
    ("WY", GeoPoint { lat: 42.9957, lng: -107.5512 }),
    ("DC", GeoPoint { lat: 38.9101, lng: -77.0147 }),
];

/// Look up the anchor for a two-letter state code.
///
/// Matching ignores surrounding whitespace and ASCII case, so `"ca"` and
/// `"CA"` resolve to the same anchor.
#[must_use]
pub fn state_anchor(state: &str) -> Option<GeoPoint> {
    let code = state.trim();
    STATE_ANCHORS
        .iter()
        .find(|(abbr, _)| abbr.eq_ignore_ascii_case(code))
        .map(|&(_, point)| point)
}

/// Integer value of the last (up to) three characters of a zip code.
///
/// Parses like a lenient integer reader: leading whitespace and an optional
/// sign are accepted, then digits up to the first non-digit. No digits
/// yields 0.
#[must_use]
pub fn zip_tail_value(zip: &str) -> i32 {
    let char_count = zip.chars().count();
    let tail: String = zip.chars().skip(char_count.saturating_sub(3)).collect();
    let tail = tail.trim_start();

    let (negative, digits) = match tail.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, tail.strip_prefix('+').unwrap_or(tail)),
    };

    let value = digits
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0i32, |acc, d| acc * 10 + i32::try_from(d).unwrap_or(0));

    if negative {
        -value
    } else {
        value
    }
}

/// Synthesize a deterministic coordinate for a shop.
///
/// `lat = anchor.lat + (tail % 100) * 0.004 - 0.2` and
/// `lng = anchor.lng + (tail % 100) * 0.006 - 0.3`, where `tail` is
/// [`zip_tail_value`]. Unknown states use [`COUNTRY_CENTER`].
#[must_use]
pub fn synthesize_coordinates(zip: &str, state: &str) -> GeoPoint {
    let anchor = state_anchor(state).unwrap_or(COUNTRY_CENTER);
    let spread = f64::from(zip_tail_value(zip) % 100);

    GeoPoint {
        lat: anchor.lat + (spread * 0.004 - 0.2),
        lng: anchor.lng + (spread * 0.006 - 0.3),
    }
}

/// Great-circle distance in miles (haversine).
#[must_use]
pub fn distance_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn anchor_table_covers_states_and_dc() {
        assert_eq!(STATE_ANCHORS.len(), 51);
        let mut codes: Vec<&str> = STATE_ANCHORS.iter().map(|(c, _)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 51, "state codes must be unique");
        assert!(state_anchor("DC").is_some());
    }

    #[test]
    fn synthesize_is_deterministic() {
        let a = synthesize_coordinates("90210", "CA");
        let b = synthesize_coordinates("90210", "CA");
        assert_eq!(a.lat.to_bits(), b.lat.to_bits());
        assert_eq!(a.lng.to_bits(), b.lng.to_bits());
    }

    #[test]
    fn state_lookup_ignores_case() {
        let upper = synthesize_coordinates("90210", "CA");
        let lower = synthesize_coordinates("90210", "ca");
        assert_eq!(upper, lower);
    }

    #[test]
    fn unknown_state_uses_country_center() {
        let p = synthesize_coordinates("00000", "ZZ");
        assert!(approx(p.lat, COUNTRY_CENTER.lat - 0.2));
        assert!(approx(p.lng, COUNTRY_CENTER.lng - 0.3));
    }

    #[test]
    fn colorado_zip_offsets_from_anchor() {
        // 80202 -> tail 202 -> 2 after mod 100
        let p = synthesize_coordinates("80202", "CO");
        assert!(approx(p.lat, 38.9972 + (2.0 * 0.004 - 0.2)));
        assert!(approx(p.lng, -105.5478 + (2.0 * 0.006 - 0.3)));
    }

    #[test]
    fn offsets_stay_within_spread() {
        for zip in ["00000", "12399", "55550", "99999"] {
            let p = synthesize_coordinates(zip, "TX");
            assert!(p.lat >= 31.4757 - 0.2 - 1e-9 && p.lat <= 31.4757 + 0.2);
            assert!(p.lng >= -99.3312 - 0.3 - 1e-9 && p.lng <= -99.3312 + 0.3);
        }
    }

    #[test]
    fn zip_tail_handles_short_and_junk_input() {
        assert_eq!(zip_tail_value("80202"), 202);
        assert_eq!(zip_tail_value("42"), 42);
        assert_eq!(zip_tail_value(""), 0);
        assert_eq!(zip_tail_value("abc"), 0);
        assert_eq!(zip_tail_value("802a4"), 2);
        assert_eq!(zip_tail_value("8021a"), 21);
        assert_eq!(zip_tail_value("80202-1234"), 234);
    }

    #[test]
    fn invalid_zip_lands_at_offset_zero() {
        let p = synthesize_coordinates("n/a", "CO");
        assert!(approx(p.lat, 38.9972 - 0.2));
        assert!(approx(p.lng, -105.5478 - 0.3));
    }

    #[test]
    fn distance_between_same_point_is_zero() {
        let p = GeoPoint { lat: 39.7, lng: -104.9 };
        assert!(distance_miles(p, p).abs() < 1e-9);
    }

    #[test]
    fn distance_denver_to_boulder_is_about_25_miles() {
        let denver = GeoPoint { lat: 39.7392, lng: -104.9903 };
        let boulder = GeoPoint { lat: 40.0150, lng: -105.2705 };
        let d = distance_miles(denver, boulder);
        assert!((20.0..30.0).contains(&d), "got {d}");
    }
}
