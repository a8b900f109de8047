//! Human-readable cards for classification results and knowledge lookups.

use std::fmt::{self, Write};

use wastewise_ai::ModelProvenance;
use wastewise_core::{
    CatalogMatch, CategoryInfo, CompositeResponse, DisposalGuide, RegionalRuleset, Regulations,
    SegregationTip,
};

const LABEL_WIDTH: usize = 22;

// ── Public API ──

pub fn composite_card(title: &str, r: &CompositeResponse) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let c = &r.classification;

    writeln!(out, "=== {title} ===")?;
    writeln!(out)?;
    writeln!(out, "Classification")?;
    row(&mut out, "waste_type", c.waste_type)?;
    row(&mut out, "classification", c.classification)?;
    row(&mut out, "confidence", format!("{:.1}%", c.confidence * 100.0))?;
    let alternatives: Vec<String> = c
        .top_predictions
        .iter()
        .map(|p| format!("{} ({:.1}%)", p.waste_type, p.confidence * 100.0))
        .collect();
    row(&mut out, "top_predictions", alternatives.join(", "))?;
    row(&mut out, "model_version", &c.model_version)?;
    writeln!(out)?;

    write_guide(&mut out, &r.disposal_guide)?;
    write_regulations(&mut out, &r.regulations)?;

    writeln!(out, "SDG Impact")?;
    for goal in r.sdg_impact {
        row(&mut out, goal.goal, goal.name)?;
    }
    Ok(out)
}

pub fn regulations_card(regs: &Regulations) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_regulations(&mut out, regs)?;
    Ok(out)
}

pub fn tips_card(tips: &[SegregationTip]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Segregation Tips")?;
    for (i, tip) in tips.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, tip.title)?;
        writeln!(out, "     {}", tip.description)?;
        if !tip.impact.is_empty() {
            writeln!(out, "     impact: {}", tip.impact)?;
        }
    }
    Ok(out)
}

pub fn search_card(query: &str, matches: &[CatalogMatch]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    if matches.is_empty() {
        writeln!(out, "No catalog entries match {query:?}")?;
        return Ok(out);
    }
    writeln!(out, "{} match(es) for {query:?}", matches.len())?;
    writeln!(out)?;
    for m in matches {
        writeln!(out, "{}", m.waste_type)?;
        row(&mut out, "category", m.category)?;
        row(&mut out, "subtypes", m.subtypes.join(", "))?;
        row(&mut out, "disposal", m.disposal)?;
        writeln!(out)?;
    }
    Ok(out)
}

pub fn categories_card(categories: &[CategoryInfo]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Waste Categories ({})", categories.len())?;
    for info in categories {
        writeln!(out)?;
        writeln!(out, "{}", info.category)?;
        row(&mut out, "types", info.types.join(", "))?;
        row(&mut out, "description", info.description)?;
    }
    Ok(out)
}

pub fn provenance_line(p: &ModelProvenance) -> String {
    format!(
        "model: {} backbone={:?} fine_tuned={}",
        p.architecture, p.backbone, p.fine_tuned
    )
}

// ── Sections ──

fn write_guide(out: &mut String, guide: &DisposalGuide) -> fmt::Result {
    writeln!(out, "Disposal Guide")?;
    match guide {
        DisposalGuide::Known {
            disposal_steps,
            environmental_impact,
            recycling_info,
            subtypes,
            ..
        } => {
            row(out, "subtypes", subtypes.join(", "))?;
            for (i, step) in disposal_steps.iter().enumerate() {
                row(out, &format!("step {}", i + 1), step)?;
            }
            row(out, "environmental_impact", environmental_impact)?;
            row(out, "recycling", recycling_info)?;
        }
        DisposalGuide::Fallback {
            disposal,
            environmental_impact,
            recycling_process,
        } => {
            row(out, "disposal", disposal)?;
            row(out, "environmental_impact", environmental_impact)?;
            row(out, "recycling", recycling_process)?;
        }
    }
    writeln!(out)
}

fn write_regulations(out: &mut String, regs: &Regulations) -> fmt::Result {
    match regs {
        Regulations::ForWaste {
            region,
            resolved_region,
            waste_type,
            category,
            specific_regulations,
            general_regulations,
            compliance,
        } => {
            write_region_header(out, region, resolved_region)?;
            row(out, "waste_type", waste_type)?;
            row(
                out,
                "category",
                category.map_or("unknown", |c| c.as_str()),
            )?;
            if !specific_regulations.is_empty() {
                row(out, "applies", specific_regulations)?;
            }
            row(out, "compliance", compliance)?;
            write_ruleset(out, general_regulations)?;
        }
        Regulations::Region {
            region,
            resolved_region,
            regulations,
        } => {
            write_region_header(out, region, resolved_region)?;
            write_ruleset(out, regulations)?;
        }
    }
    writeln!(out)
}

fn write_region_header(out: &mut String, region: &str, resolved: &str) -> fmt::Result {
    if region == resolved {
        writeln!(out, "Regulations ({region})")
    } else {
        writeln!(out, "Regulations ({region}, using {resolved})")
    }
}

fn write_ruleset(out: &mut String, rules: &RegionalRuleset) -> fmt::Result {
    row(out, "recyclable", rules.recyclable)?;
    row(out, "organic", rules.organic)?;
    row(out, "hazardous", rules.hazardous)?;
    if let Some(fines) = rules.fines {
        row(out, "fines", fines)?;
    }
    if let Some(standards) = rules.standards {
        row(out, "standards", standards)?;
    }
    Ok(())
}

fn row(out: &mut String, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(out, "  {label:<LABEL_WIDTH$} {value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wastewise_core::{Category, ClassificationResult};
    use wastewise_kb::KnowledgeBase;

    fn plastic_response(region: &str) -> CompositeResponse {
        let kb = KnowledgeBase::new();
        let probs = [0.8, 0.1, 0.05, 0.03, 0.01, 0.01];
        let classification = ClassificationResult::from_probabilities(&probs, 3).unwrap();
        CompositeResponse::compose(
            classification,
            kb.disposal_guide("plastic", Category::Recyclable),
            kb.regulations(Some("plastic"), region),
        )
    }

    #[test]
    fn composite_card_has_all_sections() {
        let card = composite_card("bottle.jpg", &plastic_response("EU")).unwrap();
        assert!(card.starts_with("=== bottle.jpg ==="));
        for header in ["Classification", "Disposal Guide", "Regulations (EU)", "SDG Impact"] {
            assert!(card.contains(header), "missing {header}:\n{card}");
        }
        assert!(card.contains("80.0%"));
        assert!(card.contains("plastic (80.0%), paper (10.0%), glass (5.0%)"));
        assert!(card.contains("step 2"));
        assert!(card.contains("PET"));
    }

    #[test]
    fn fallback_region_is_called_out() {
        let card = regulations_card(&KnowledgeBase::new().regulations(None, "Mars")).unwrap();
        assert!(card.contains("Regulations (Mars, using general)"), "{card}");
        assert!(card.contains("fines"));
    }

    #[test]
    fn tips_are_numbered_in_order() {
        let tips = KnowledgeBase::new().segregation_tips(Some("glass"));
        let card = tips_card(&tips).unwrap();
        assert!(card.contains("  1. How to Dispose Glass"));
        assert!(card.contains("  7. Check Local Guidelines"));
    }

    #[test]
    fn empty_search_says_so() {
        let card = search_card("uranium", &[]).unwrap();
        assert!(card.contains("No catalog entries match \"uranium\""));
    }

    #[test]
    fn categories_card_lists_all() {
        let card = categories_card(KnowledgeBase::new().categories()).unwrap();
        assert!(card.starts_with("Waste Categories (4)"));
        assert!(card.contains("mixed"));
        assert!(card.contains("multi-material, contaminated"));
    }
}
