//! Knowledge-base records and the views derived from them.
//!
//! Catalog records ([`WasteMaterial`], [`RegionalRuleset`], [`CategoryInfo`])
//! are `'static` compiled-in data. Views borrow from them rather than copying,
//! so a lookup allocates only for the few strings it synthesizes.

use std::borrow::Cow;

use serde::{Serialize, Serializer};

use crate::waste::Category;

/// Fallback text used when a waste type is missing from the catalog.
pub const FALLBACK_DISPOSAL: &str = "Check with local waste management authority";
pub const UNKNOWN: &str = "Unknown";

// ── Catalog records ──

/// A fixed material catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WasteMaterial {
    pub id: &'static str,
    pub category: Category,
    pub subtypes: &'static [&'static str],
    pub disposal: &'static str,
    pub environmental_impact: &'static str,
    pub recycling_process: &'static str,
}

impl WasteMaterial {
    /// Disposal text split into discrete steps on sentence-terminating
    /// punctuation, trimmed, with empty fragments dropped.
    pub fn disposal_steps(&self) -> Vec<&'static str> {
        let disposal: &'static str = self.disposal;
        disposal
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Case-insensitive substring match against the identifier and subtypes.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle)
            || self
                .subtypes
                .iter()
                .any(|s| s.to_lowercase().contains(needle))
    }
}

/// Regulation text for one region, keyed by category.
///
/// Serializes as the flat `{recyclable, organic, hazardous, ...}` map the
/// API has always returned; `region` is carried separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionalRuleset {
    #[serde(skip)]
    pub region: &'static str,
    pub recyclable: &'static str,
    pub organic: &'static str,
    pub hazardous: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fines: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standards: Option<&'static str>,
}

impl RegionalRuleset {
    /// Rule text for a category; empty when the region has no rule for it.
    pub fn rule_for(&self, category: Option<Category>) -> &'static str {
        match category {
            Some(Category::Recyclable) => self.recyclable,
            Some(Category::Organic) => self.organic,
            Some(Category::Hazardous) => self.hazardous,
            Some(Category::Mixed) | None => "",
        }
    }
}

/// One entry of the category listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub category: Category,
    pub types: &'static [&'static str],
    pub description: &'static str,
}

// ── Views ──

/// Disposal guidance for a waste type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DisposalGuide {
    /// The waste type is in the catalog.
    Known {
        waste_type: String,
        /// Category supplied by the caller, not the catalog's.
        category: Category,
        disposal_steps: Vec<&'static str>,
        environmental_impact: &'static str,
        recycling_info: &'static str,
        subtypes: &'static [&'static str],
    },
    /// Generic advice for anything the catalog does not know.
    Fallback {
        disposal: &'static str,
        environmental_impact: &'static str,
        recycling_process: &'static str,
    },
}

impl DisposalGuide {
    pub fn fallback() -> Self {
        Self::Fallback {
            disposal: FALLBACK_DISPOSAL,
            environmental_impact: UNKNOWN,
            recycling_process: UNKNOWN,
        }
    }
}

/// Regional regulations, optionally narrowed to one waste type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Regulations {
    ForWaste {
        /// Region as requested by the caller.
        region: String,
        /// Region whose ruleset was actually applied.
        resolved_region: &'static str,
        waste_type: String,
        #[serde(serialize_with = "category_or_unknown")]
        category: Option<Category>,
        specific_regulations: &'static str,
        general_regulations: &'static RegionalRuleset,
        compliance: String,
    },
    Region {
        region: String,
        resolved_region: &'static str,
        regulations: &'static RegionalRuleset,
    },
}

impl Regulations {
    /// The full ruleset that was applied.
    pub fn ruleset(&self) -> &'static RegionalRuleset {
        match self {
            Self::ForWaste {
                general_regulations,
                ..
            } => general_regulations,
            Self::Region { regulations, .. } => regulations,
        }
    }
}

fn category_or_unknown<S: Serializer>(
    category: &Option<Category>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(category.map_or("unknown", |c| c.as_str()))
}

/// A segregation best-practice tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegregationTip {
    pub title: Cow<'static, str>,
    pub description: &'static str,
    pub impact: &'static str,
}

/// A catalog entry returned by keyword search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogMatch {
    pub waste_type: &'static str,
    pub category: Category,
    pub subtypes: &'static [&'static str],
    pub disposal: &'static str,
}

impl From<&'static WasteMaterial> for CatalogMatch {
    fn from(m: &'static WasteMaterial) -> Self {
        Self {
            waste_type: m.id,
            category: m.category,
            subtypes: m.subtypes,
            disposal: m.disposal,
        }
    }
}
