//! The merged answer returned for a classified image.

use serde::{Serialize, Serializer};

use crate::classification::ClassificationResult;
use crate::guidance::{DisposalGuide, Regulations};

/// A UN Sustainable Development Goal the guidance contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SdgGoal {
    pub goal: &'static str,
    pub name: &'static str,
}

pub const SDG_IMPACT: &[SdgGoal] = &[
    SdgGoal {
        goal: "SDG_11",
        name: "Sustainable Cities and Communities",
    },
    SdgGoal {
        goal: "SDG_12",
        name: "Responsible Consumption and Production",
    },
];

/// Classification plus knowledge-base enrichment.
///
/// The classification fields are flattened into the top level untouched;
/// knowledge fields live under their own keys and never shadow them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeResponse {
    #[serde(flatten)]
    pub classification: ClassificationResult,
    pub disposal_guide: DisposalGuide,
    pub regulations: Regulations,
    /// Serialized as a `goal → name` map.
    #[serde(serialize_with = "goal_map")]
    pub sdg_impact: &'static [SdgGoal],
}

fn goal_map<S: Serializer>(
    goals: &&'static [SdgGoal],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(goals.iter().map(|g| (g.goal, g.name)))
}

impl CompositeResponse {
    pub fn compose(
        classification: ClassificationResult,
        disposal_guide: DisposalGuide,
        regulations: Regulations,
    ) -> Self {
        Self {
            classification,
            disposal_guide,
            regulations,
            sdg_impact: SDG_IMPACT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidance::RegionalRuleset;

    static RULES: RegionalRuleset = RegionalRuleset {
        region: "general",
        recyclable: "clean and dry",
        organic: "compost",
        hazardous: "special collection",
        fines: None,
        standards: None,
    };

    #[test]
    fn classification_fields_carried_through_unmodified() {
        let probs = [0.1, 0.1, 0.1, 0.1, 0.1, 0.5];
        let classification = ClassificationResult::from_probabilities(&probs, 3).unwrap();
        let regs = Regulations::Region {
            region: "general".into(),
            resolved_region: "general",
            regulations: &RULES,
        };
        let response =
            CompositeResponse::compose(classification.clone(), DisposalGuide::fallback(), regs);

        assert_eq!(response.classification, classification);

        let merged = serde_json::to_value(&response).unwrap();
        let alone = serde_json::to_value(&classification).unwrap();
        for (key, value) in alone.as_object().unwrap() {
            assert_eq!(&merged[key], value, "field {key} changed in merge");
        }
        assert!(merged.get("disposal_guide").is_some());
        assert_eq!(merged["regulations"]["regulations"]["organic"], "compost");
        assert_eq!(
            merged["sdg_impact"],
            serde_json::json!({
                "SDG_11": "Sustainable Cities and Communities",
                "SDG_12": "Responsible Consumption and Production",
            })
        );
    }
}
