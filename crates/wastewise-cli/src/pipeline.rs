//! Classification → knowledge enrichment.
//!
//! Inference runs on tokio's blocking pool, one task per image, so several
//! images are classified independently without stalling the runtime.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use image::DynamicImage;
use tracing::{info, warn};
use wastewise_ai::{AiError, Classifier};
use wastewise_core::{ClassificationResult, CompositeResponse};
use wastewise_kb::KnowledgeBase;

/// Outcome for one input file.
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: anyhow::Result<CompositeResponse>,
}

#[derive(Clone)]
pub struct Pipeline {
    classifier: Arc<Classifier>,
    kb: KnowledgeBase,
}

impl Pipeline {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
            kb: KnowledgeBase::new(),
        }
    }

    /// Classify one decoded image and enrich the result for `region`.
    pub fn analyze(&self, image: &DynamicImage, region: &str) -> Result<CompositeResponse, AiError> {
        let classification = self.classifier.classify(image)?;
        Ok(self.enrich(classification, region))
    }

    /// Join a classification against the knowledge base.
    pub fn enrich(&self, classification: ClassificationResult, region: &str) -> CompositeResponse {
        let waste_type = classification.waste_type.as_str();
        let guide = self
            .kb
            .disposal_guide(waste_type, classification.classification);
        let regulations = self.kb.regulations(Some(waste_type), region);
        CompositeResponse::compose(classification, guide, regulations)
    }

    /// Read, classify, and enrich each file concurrently. Outcomes are
    /// returned in input order; one failure does not affect the others.
    pub async fn analyze_files(&self, paths: Vec<PathBuf>, region: &str) -> Vec<FileOutcome> {
        let handles: Vec<_> = paths
            .into_iter()
            .map(|path| {
                let pipeline = self.clone();
                let region = region.to_string();
                let task_path = path.clone();
                let handle = tokio::task::spawn_blocking(move || {
                    pipeline.analyze_file(&task_path, &region)
                });
                (path, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (path, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(anyhow::Error::new(e).context("classification task failed")),
            };
            match &result {
                Ok(r) => info!(
                    path = %path.display(),
                    waste_type = %r.classification.waste_type,
                    confidence = r.classification.confidence,
                    "classified"
                ),
                Err(e) => warn!(path = %path.display(), error = %e, "classification failed"),
            }
            outcomes.push(FileOutcome { path, result });
        }
        outcomes
    }

    fn analyze_file(&self, path: &std::path::Path, region: &str) -> anyhow::Result<CompositeResponse> {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let classification = self
            .classifier
            .classify_bytes(&bytes)
            .with_context(|| format!("classifying {}", path.display()))?;
        Ok(self.enrich(classification, region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use image::{ImageFormat, Rgb, RgbImage};
    use wastewise_ai::{Architecture, Checkpoint, ClassifierConfig, HeadWeights};
    use wastewise_core::{Category, DisposalGuide, Regulations, WasteType};

    /// Classifier whose fine-tuned head strongly favours plastic.
    fn plastic_pipeline(dir: &Path) -> Pipeline {
        let config = ClassifierConfig {
            architecture: Architecture::MobileNet,
            num_classes: WasteType::COUNT,
            model_dir: dir.to_path_buf(),
        };
        let mut bias = vec![0.0; WasteType::COUNT];
        bias[WasteType::Plastic.index()] = 8.0;
        Checkpoint {
            architecture: Architecture::MobileNet,
            classes: None,
            head: HeadWeights {
                weight: vec![vec![0.0; Architecture::MobileNet.feature_dim()]; WasteType::COUNT],
                bias,
            },
            backbone: None,
        }
        .save(&config.checkpoint_path())
        .unwrap();
        Pipeline::new(Classifier::new(&config).unwrap())
    }

    fn clear_bottle() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(96, 240, |x, y| {
            if (28..68).contains(&x) && y > 30 {
                Rgb([220, 235, 245])
            } else {
                Rgb([40, 40, 40])
            }
        }))
    }

    #[test]
    fn plastic_bottle_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = plastic_pipeline(dir.path());

        let response = pipeline.analyze(&clear_bottle(), "EU").unwrap();
        assert_eq!(response.classification.waste_type, WasteType::Plastic);
        assert_eq!(response.classification.classification, Category::Recyclable);

        let DisposalGuide::Known { subtypes, category, .. } = &response.disposal_guide else {
            panic!("plastic guide should come from the catalog");
        };
        assert!(subtypes.contains(&"PET"));
        assert_eq!(*category, Category::Recyclable);

        let Regulations::ForWaste {
            specific_regulations,
            ..
        } = &response.regulations
        else {
            panic!("expected waste-specific regulations");
        };
        assert!(specific_regulations.contains("EU Waste Directive requires 55% recycling"));
    }

    #[test]
    fn enrichment_leaves_classification_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = plastic_pipeline(dir.path());
        let classification = pipeline.classifier.classify(&clear_bottle()).unwrap();
        let response = pipeline.enrich(classification.clone(), "Atlantis");
        assert_eq!(response.classification, classification);
        assert_eq!(response.regulations.ruleset().region, "general");
    }

    #[test]
    fn labels_outside_catalog_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = plastic_pipeline(dir.path());
        let probs = [0.05, 0.05, 0.05, 0.05, 0.75, 0.05];
        let organic = ClassificationResult::from_probabilities(&probs, 3).unwrap();
        let response = pipeline.enrich(organic, "India");
        assert_eq!(response.disposal_guide, DisposalGuide::fallback());
        let json = serde_json::to_value(&response.regulations).unwrap();
        assert_eq!(json["category"], "unknown");
    }

    #[tokio::test]
    async fn files_are_classified_independently() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = plastic_pipeline(dir.path());

        let good = dir.path().join("bottle.png");
        clear_bottle().save_with_format(&good, ImageFormat::Png).unwrap();
        let bad = dir.path().join("broken.png");
        std::fs::write(&bad, b"\x89PNG but truncated").unwrap();
        let missing = dir.path().join("missing.jpg");

        let outcomes = pipeline
            .analyze_files(vec![good.clone(), bad.clone(), missing.clone()], "USA")
            .await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].path, good);
        let first = outcomes[0].result.as_ref().unwrap();
        assert_eq!(first.classification.waste_type, WasteType::Plastic);

        assert_eq!(outcomes[1].path, bad);
        let err = outcomes[1].result.as_ref().unwrap_err();
        assert!(format!("{err:#}").contains("classifying"), "{err:#}");

        assert_eq!(outcomes[2].path, missing);
        let err = outcomes[2].result.as_ref().unwrap_err();
        assert!(format!("{err:#}").contains("reading"), "{err:#}");
    }
}
