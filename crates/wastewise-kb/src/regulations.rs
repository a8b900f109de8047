//! Region-keyed regulation rulesets.

use wastewise_core::RegionalRuleset;

/// Region every unknown key resolves to.
pub const DEFAULT_REGION: &str = "general";

pub static RULESETS: &[RegionalRuleset] = &[
    RegionalRuleset {
        region: DEFAULT_REGION,
        recyclable: "Should be cleaned and dry before recycling. Separate by material type if possible.",
        organic: "Home composting reduces methane emissions. Use in garden or compost bin.",
        hazardous: "Must be taken to special collection centers. Never mix with regular waste.",
        fines: Some("Illegal dumping can result in fines and penalties."),
        standards: None,
    },
    RegionalRuleset {
        region: "USA",
        recyclable: "Follow local curbside guidelines. Check municipality for accepted materials.",
        organic: "Many states mandate organics composting. Find local programs via state database.",
        hazardous: "EPA regulates hazardous waste. Use Household Hazardous Waste facilities.",
        fines: None,
        standards: Some("Follow EPA guidelines (40 CFR Part 261)"),
    },
    RegionalRuleset {
        region: "EU",
        recyclable: "EU Waste Directive requires 55% recycling by 2025. Extended Producer Responsibility applies.",
        organic: "Bio-waste must be separately collected by 2023 per EU directive.",
        hazardous: "Basel Convention: hazardous waste cannot be exported to non-OECD countries.",
        fines: None,
        standards: Some("Follow EN standards and CE marking requirements"),
    },
    RegionalRuleset {
        region: "India",
        recyclable: "Swachh Bharat Mission promotes segregation at source.",
        organic: "Wet waste (biodegradable) must be segregated from dry waste.",
        hazardous: "Biomedical Waste Management Rules 2016 specify handling procedures.",
        fines: None,
        standards: Some("Follow Solid Waste Management Rules 2016"),
    },
    RegionalRuleset {
        region: "China",
        recyclable: "New Solid Waste Law (2020) emphasizes waste reduction and recycling.",
        organic: "Organic waste classified as \"wet waste\" must be separately collected.",
        hazardous: "Hazardous waste subject to strict tracking and handling requirements.",
        fines: None,
        standards: Some("Follow GB 18599 standards for hazardous waste"),
    },
];

/// Resolve a region key, falling back to [`DEFAULT_REGION`].
///
/// Keys are matched exactly, as stored (`USA`, `EU`, ...).
pub fn resolve(region: &str) -> &'static RegionalRuleset {
    RULESETS
        .iter()
        .find(|r| r.region == region)
        .unwrap_or(&RULESETS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_is_first() {
        assert_eq!(RULESETS[0].region, DEFAULT_REGION);
    }

    #[test]
    fn known_regions_resolve_to_themselves() {
        for ruleset in RULESETS {
            assert_eq!(resolve(ruleset.region).region, ruleset.region);
        }
    }

    #[test]
    fn unknown_region_falls_back_to_general() {
        assert_eq!(resolve("Atlantis").region, DEFAULT_REGION);
        assert_eq!(resolve("").region, DEFAULT_REGION);
        // Keys are case-sensitive.
        assert_eq!(resolve("usa").region, DEFAULT_REGION);
    }
}
