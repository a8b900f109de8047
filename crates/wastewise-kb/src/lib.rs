//! Waste knowledge base: material facts, regional regulations, segregation tips.
//!
//! All tables are compiled-in `static` data. Lookups never fail: unknown waste
//! types degrade to generic guidance and unknown regions to the `general`
//! ruleset. Matching is exact or substring; there is no similarity search.

pub mod catalog;
pub mod regulations;
pub mod tips;

use std::borrow::Cow;

use tracing::debug;
use wastewise_core::{
    CatalogMatch, Category, CategoryInfo, DisposalGuide, Regulations, SegregationTip,
};

pub use regulations::DEFAULT_REGION;

/// Read-only view over the compiled-in tables.
///
/// Zero-sized and `Copy`; construct one wherever it is needed or share it
/// freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnowledgeBase {
    _private: (),
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// The category listing: recyclable, organic, hazardous, mixed.
    pub fn categories(&self) -> &'static [CategoryInfo] {
        catalog::CATEGORIES
    }

    /// Disposal guidance for `waste_type`, tagged with the caller's `category`.
    ///
    /// Unknown waste types get [`DisposalGuide::fallback`].
    pub fn disposal_guide(&self, waste_type: &str, category: Category) -> DisposalGuide {
        let Some(material) = catalog::find(waste_type) else {
            debug!(waste_type, "waste type not in catalog, using fallback guide");
            return DisposalGuide::fallback();
        };

        DisposalGuide::Known {
            waste_type: waste_type.to_string(),
            category,
            disposal_steps: material.disposal_steps(),
            environmental_impact: material.environmental_impact,
            recycling_info: material.recycling_process,
            subtypes: material.subtypes,
        }
    }

    /// Regulations for `region`, optionally narrowed to one waste type.
    ///
    /// Unknown regions resolve to the `general` ruleset. A waste type missing
    /// from the catalog has category `unknown` and an empty specific rule; an
    /// empty waste type counts as none.
    pub fn regulations(&self, waste_type: Option<&str>, region: &str) -> Regulations {
        let ruleset = regulations::resolve(region);
        if ruleset.region != region {
            debug!(region, resolved = ruleset.region, "unknown region, using default ruleset");
        }

        match waste_type {
            Some(waste_type) if !waste_type.is_empty() => {
                let category = catalog::find(waste_type).map(|m| m.category);
                Regulations::ForWaste {
                    region: region.to_string(),
                    resolved_region: ruleset.region,
                    waste_type: waste_type.to_string(),
                    category,
                    specific_regulations: ruleset.rule_for(category),
                    general_regulations: ruleset,
                    compliance: format!("Follow {region} regulations for {waste_type} disposal"),
                }
            }
            _ => Regulations::Region {
                region: region.to_string(),
                resolved_region: ruleset.region,
                regulations: ruleset,
            },
        }
    }

    /// The six general tips, preceded by a type-specific tip when
    /// `waste_type` is in the catalog.
    pub fn segregation_tips(&self, waste_type: Option<&str>) -> Vec<SegregationTip> {
        let specific = waste_type.and_then(catalog::find).map(|m| SegregationTip {
            title: Cow::Owned(format!("How to Dispose {}", tips::title_case(m.id))),
            description: m.disposal,
            impact: m.environmental_impact,
        });

        specific
            .into_iter()
            .chain(tips::GENERAL_TIPS.iter().cloned())
            .collect()
    }

    /// Entries whose identifier or any subtype contains `query`,
    /// case-insensitively, in catalog order.
    pub fn search_by_keyword(&self, query: &str) -> Vec<CatalogMatch> {
        let needle = query.to_lowercase();
        catalog::MATERIALS
            .iter()
            .filter(|m| m.matches(&needle))
            .map(CatalogMatch::from)
            .collect()
    }
}
