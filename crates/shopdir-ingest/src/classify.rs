//! Name-based business-type tagging.
//!
//! The export carries no taxonomy column, so type and product flags are
//! inferred from keywords in the shop name. Rule order matters: the first
//! keyword found wins.

use shopdir_core::BusinessType;

const TYPE_RULES: &[(&str, BusinessType)] = &[
    ("vape", BusinessType::Vape),
    ("tobacco", BusinessType::Tobacco),
    ("hookah", BusinessType::Hookah),
    ("cbd", BusinessType::Cbd),
    ("lounge", BusinessType::Lounge),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub business_type: BusinessType,
    pub has_cbd: bool,
    pub has_kratom: bool,
    /// Never inferred from the name; reserved for curated data.
    pub has_marijuana: bool,
}

/// Classify a shop by its (already cleaned) name, case-insensitively.
#[must_use]
pub fn classify_name(name: &str) -> Classification {
    let lower = name.to_lowercase();

    let business_type = TYPE_RULES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map_or(BusinessType::Smoke, |&(_, bt)| bt);

    // Both checks are kept: a "CBD Vape" shop is typed Vape but still has CBD.
    let has_cbd = lower.contains("cbd") || business_type == BusinessType::Cbd;

    Classification {
        business_type,
        has_cbd,
        has_kratom: lower.contains("kratom"),
        has_marijuana: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vape_wins_over_tobacco() {
        let c = classify_name("Vape & Tobacco Outlet");
        assert_eq!(c.business_type, BusinessType::Vape);
        assert!(!c.has_cbd);
    }

    #[test]
    fn cbd_shop_sets_type_and_flag() {
        let c = classify_name("Quality CBD Shop");
        assert_eq!(c.business_type, BusinessType::Cbd);
        assert!(c.has_cbd);
    }

    #[test]
    fn cbd_flag_survives_higher_priority_type() {
        let c = classify_name("CBD Vape Depot");
        assert_eq!(c.business_type, BusinessType::Vape);
        assert!(c.has_cbd);
    }

    #[test]
    fn each_keyword_maps_to_its_type() {
        assert_eq!(classify_name("Uptown TOBACCO").business_type, BusinessType::Tobacco);
        assert_eq!(classify_name("Sultan Hookah Bar").business_type, BusinessType::Hookah);
        assert_eq!(classify_name("Cigar Lounge").business_type, BusinessType::Lounge);
    }

    #[test]
    fn hookah_lounge_is_hookah() {
        assert_eq!(
            classify_name("Cloud Nine Hookah Lounge").business_type,
            BusinessType::Hookah
        );
    }

    #[test]
    fn unmatched_name_defaults_to_smoke() {
        let c = classify_name("Main Street Market");
        assert_eq!(c.business_type, BusinessType::Smoke);
        assert!(!c.has_cbd);
        assert!(!c.has_kratom);
        assert!(!c.has_marijuana);
    }

    #[test]
    fn kratom_detected_case_insensitively() {
        let c = classify_name("Kratom King Smoke Shop");
        assert!(c.has_kratom);
        assert_eq!(c.business_type, BusinessType::Smoke);
    }

    #[test]
    fn empty_name_is_smoke() {
        assert_eq!(classify_name("").business_type, BusinessType::Smoke);
    }
}
