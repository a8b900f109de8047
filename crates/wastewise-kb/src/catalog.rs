//! Material catalog and category listing.
//!
//! Entry order is significant: keyword search returns matches in this order.

use wastewise_core::{Category, CategoryInfo, WasteMaterial};

pub static MATERIALS: &[WasteMaterial] = &[
    WasteMaterial {
        id: "plastic",
        category: Category::Recyclable,
        subtypes: &["HDPE", "LDPE", "PET", "PVC", "PP"],
        disposal: "Place in recycling bin. Rinse before recycling.",
        environmental_impact: "Takes 400+ years to decompose in nature",
        recycling_process: "Sorted, shredded, melted, and reformed into new products",
    },
    WasteMaterial {
        id: "paper",
        category: Category::Recyclable,
        subtypes: &["newspaper", "cardboard", "magazines", "office_paper"],
        disposal: "Keep dry and place in paper recycling bin. Avoid contamination with food.",
        environmental_impact: "Biodegradable but recycling saves trees",
        recycling_process: "Pulped, cleaned, and formed into new paper products",
    },
    WasteMaterial {
        id: "glass",
        category: Category::Recyclable,
        subtypes: &["clear", "brown", "green"],
        disposal: "Separate by color if required locally. Check for contamination.",
        environmental_impact: "Can be recycled infinitely without quality loss",
        recycling_process: "Melted and reformed into new glass containers",
    },
    WasteMaterial {
        id: "metal",
        category: Category::Recyclable,
        subtypes: &["aluminum", "steel", "tin"],
        disposal: "Rinse cans. Place in recycling bin.",
        environmental_impact: "Aluminum recycling saves 95% energy vs. production",
        recycling_process: "Sorted, melted, and cast into new products",
    },
    WasteMaterial {
        id: "food_waste",
        category: Category::Organic,
        subtypes: &["fruit", "vegetables", "meat", "dairy"],
        disposal: "Compost if available. Otherwise, place in organic waste bin.",
        environmental_impact: "Produces methane in landfills; composting reduces emissions",
        recycling_process: "Composted to create nutrient-rich soil amendment",
    },
    WasteMaterial {
        id: "garden_waste",
        category: Category::Organic,
        subtypes: &["leaves", "grass", "branches", "flowers"],
        disposal: "Compost or green bin. Shred larger items.",
        environmental_impact: "Returns nutrients to soil when composted",
        recycling_process: "Shredded and composted into mulch",
    },
    WasteMaterial {
        id: "batteries",
        category: Category::Hazardous,
        subtypes: &["alkaline", "lithium", "rechargeable"],
        disposal: "Take to battery collection center. Never throw in trash.",
        environmental_impact: "Heavy metals contaminate soil and water",
        recycling_process: "Separated by chemistry, smelted to recover metals",
    },
    WasteMaterial {
        id: "electronics",
        category: Category::Hazardous,
        subtypes: &["phones", "computers", "TVs", "cables"],
        disposal: "Take to e-waste recycling facility. Do not discard as trash.",
        environmental_impact: "Contains toxic materials and valuable metals",
        recycling_process: "Disassembled and sorted for material recovery",
    },
    WasteMaterial {
        id: "textiles",
        category: Category::Mixed,
        subtypes: &["clothing", "shoes", "bags"],
        disposal: "Donate if usable. Otherwise, textile recycling programs.",
        environmental_impact: "Fast fashion contributes to 92 million tons waste/year",
        recycling_process: "Shredded into fibers or used in insulation",
    },
    WasteMaterial {
        id: "ceramics",
        category: Category::Mixed,
        subtypes: &["plates", "pots", "tiles"],
        disposal: "Most ceramics go to landfill. Check local pottery/clay programs.",
        environmental_impact: "Non-biodegradable but stable in landfills",
        recycling_process: "Can be crushed for aggregate or pottery clay",
    },
];

pub static CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo {
        category: Category::Recyclable,
        types: &["plastic", "paper", "glass", "metal"],
        description: "Can be processed and made into new products",
    },
    CategoryInfo {
        category: Category::Organic,
        types: &["food", "garden", "paper"],
        description: "Biodegradable waste that can be composted",
    },
    CategoryInfo {
        category: Category::Hazardous,
        types: &["batteries", "chemicals", "electronics"],
        description: "Requires special handling and disposal",
    },
    CategoryInfo {
        category: Category::Mixed,
        types: &["multi-material", "contaminated"],
        description: "Mixed waste requiring special treatment",
    },
];

/// Exact identifier lookup.
pub fn find(id: &str) -> Option<&'static WasteMaterial> {
    MATERIALS.iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identifiers_are_unique() {
        let ids: HashSet<&str> = MATERIALS.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), MATERIALS.len());
    }

    #[test]
    fn every_entry_is_complete() {
        for m in MATERIALS {
            assert!(!m.subtypes.is_empty(), "{} has no subtypes", m.id);
            assert!(!m.disposal_steps().is_empty(), "{} has no steps", m.id);
            assert!(!m.environmental_impact.is_empty(), "{} lacks impact", m.id);
            assert!(!m.recycling_process.is_empty(), "{} lacks process", m.id);
        }
    }

    #[test]
    fn categories_listed_in_fixed_order() {
        let order: Vec<Category> = CATEGORIES.iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            [
                Category::Recyclable,
                Category::Organic,
                Category::Hazardous,
                Category::Mixed
            ]
        );
    }

    #[test]
    fn find_is_exact() {
        assert_eq!(find("plastic").map(|m| m.id), Some("plastic"));
        assert!(find("Plastic").is_none());
        assert!(find("organic").is_none());
    }
}
