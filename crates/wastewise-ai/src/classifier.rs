//! Waste image classifier: backbone → linear head → softmax.
//!
//! Construction runs an ordered fallback procedure, logging each degraded
//! step instead of failing:
//!
//! 1. pretrained backbone (`<model_dir>/<arch>/backbone.onnx`), else a
//!    randomly-initialized backbone of the same architecture;
//! 2. a fresh head sized to the six waste classes;
//! 3. the fine-tuned checkpoint (`<model_dir>/<arch>_waste_classifier.json`)
//!    over head and backbone, applied all-or-nothing.
//!
//! After construction the model is read-only; `classify` takes `&self` and is
//! deterministic.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use wastewise_core::{ClassificationResult, WasteType};

use crate::architecture::Architecture;
use crate::backbone::{Backbone, RandomBackbone};
use crate::checkpoint::Checkpoint;
use crate::error::AiError;
use crate::head::{LinearHead, softmax};
use crate::preprocess::preprocess;

/// Number of alternatives returned with each prediction.
pub const TOP_K: usize = 3;

/// How to build a [`Classifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub architecture: Architecture,
    pub num_classes: usize,
    /// Directory holding pretrained backbones and fine-tuned checkpoints.
    pub model_dir: PathBuf,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            architecture: Architecture::default(),
            num_classes: WasteType::COUNT,
            model_dir: PathBuf::from("models"),
        }
    }
}

impl ClassifierConfig {
    pub fn pretrained_path(&self) -> PathBuf {
        self.model_dir
            .join(self.architecture.as_str())
            .join("backbone.onnx")
    }

    pub fn checkpoint_path(&self) -> PathBuf {
        Checkpoint::default_path(&self.model_dir, self.architecture)
    }
}

/// Where the backbone weights came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackboneSource {
    /// Generic pretrained weights.
    Pretrained,
    /// Degraded mode: untrained, seeded weights.
    RandomInit,
    /// Backbone shipped with the fine-tuned checkpoint.
    FineTuned,
    /// Supplied by the caller through [`Classifier::from_parts`].
    Custom,
}

/// What the constructed model is actually running with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelProvenance {
    pub architecture: Architecture,
    pub backbone: BackboneSource,
    /// Whether a fine-tuned head was loaded.
    pub fine_tuned: bool,
}

impl ModelProvenance {
    /// True when predictions come from untrained weights.
    pub fn is_degraded(&self) -> bool {
        self.backbone == BackboneSource::RandomInit || !self.fine_tuned
    }
}

pub struct Classifier {
    backbone: Box<dyn Backbone>,
    head: LinearHead,
    provenance: ModelProvenance,
}

impl Classifier {
    /// Build a ready-to-infer classifier.
    ///
    /// Only a class count other than six is an error; missing or broken
    /// weight files degrade the model and are logged.
    pub fn new(config: &ClassifierConfig) -> Result<Self, AiError> {
        if config.num_classes != WasteType::COUNT {
            return Err(AiError::ClassCount {
                expected: WasteType::COUNT,
                actual: config.num_classes,
            });
        }
        let architecture = config.architecture;

        // 1. Backbone.
        let pretrained_path = config.pretrained_path();
        let (backbone, source) = match load_backbone(&pretrained_path) {
            Ok(backbone) => {
                info!(%architecture, path = %pretrained_path.display(), "loaded pretrained backbone");
                (backbone, BackboneSource::Pretrained)
            }
            Err(e) => {
                warn!(
                    %architecture,
                    error = %e,
                    "pretrained weights unavailable, using randomly-initialized backbone"
                );
                let random: Box<dyn Backbone> = Box::new(RandomBackbone::new(architecture));
                (random, BackboneSource::RandomInit)
            }
        };

        // 2. Head sized to the waste classes.
        let head = LinearHead::random(
            backbone.feature_dim(),
            WasteType::COUNT,
            architecture.seed().wrapping_add(1),
        );

        let mut classifier = Self {
            backbone,
            head,
            provenance: ModelProvenance {
                architecture,
                backbone: source,
                fine_tuned: false,
            },
        };

        // 3. Optional fine-tuned checkpoint.
        let checkpoint_path = config.checkpoint_path();
        if checkpoint_path.exists() {
            match classifier.apply_checkpoint(&checkpoint_path) {
                Ok(()) => info!(path = %checkpoint_path.display(), "loaded fine-tuned weights"),
                Err(e) => warn!(
                    path = %checkpoint_path.display(),
                    error = %e,
                    "could not load fine-tuned weights, keeping base model"
                ),
            }
        } else {
            info!(path = %checkpoint_path.display(), "no fine-tuned weights found");
        }

        if classifier.provenance.is_degraded() {
            warn!(provenance = ?classifier.provenance, "classifier running in degraded mode");
        }
        Ok(classifier)
    }

    /// Assemble a classifier from an existing backbone and head.
    pub fn from_parts(
        architecture: Architecture,
        backbone: Box<dyn Backbone>,
        head: LinearHead,
    ) -> Result<Self, AiError> {
        if head.num_classes() != WasteType::COUNT {
            return Err(AiError::ClassCount {
                expected: WasteType::COUNT,
                actual: head.num_classes(),
            });
        }
        if head.in_features() != backbone.feature_dim() {
            return Err(AiError::Shape(format!(
                "head expects {} features, backbone produces {}",
                head.in_features(),
                backbone.feature_dim()
            )));
        }
        Ok(Self {
            backbone,
            head,
            provenance: ModelProvenance {
                architecture,
                backbone: BackboneSource::Custom,
                fine_tuned: true,
            },
        })
    }

    /// Load a checkpoint over the current model. Nothing is replaced unless
    /// every part loads and fits.
    fn apply_checkpoint(&mut self, path: &Path) -> Result<(), AiError> {
        let checkpoint = Checkpoint::load(path)?;
        let head = checkpoint.head_for(self.provenance.architecture, path)?;

        let backbone = match checkpoint.backbone_path(path) {
            Some(backbone_path) => Some(load_backbone(&backbone_path)?),
            None => None,
        };

        let feature_dim = backbone
            .as_ref()
            .map_or(self.backbone.feature_dim(), |b| b.feature_dim());
        if head.in_features() != feature_dim {
            return Err(AiError::Checkpoint {
                path: path.to_path_buf(),
                reason: format!(
                    "head expects {} features, backbone produces {feature_dim}",
                    head.in_features()
                ),
            });
        }

        if let Some(backbone) = backbone {
            self.backbone = backbone;
            self.provenance.backbone = BackboneSource::FineTuned;
        }
        self.head = head;
        self.provenance.fine_tuned = true;
        Ok(())
    }

    pub fn provenance(&self) -> &ModelProvenance {
        &self.provenance
    }

    pub fn architecture(&self) -> Architecture {
        self.provenance.architecture
    }

    /// Classify a decoded image.
    ///
    /// Always returns a best-guess label; low confidence is not an error.
    pub fn classify(&self, image: &DynamicImage) -> Result<ClassificationResult, AiError> {
        let probs = self.probabilities(image)?;
        let result = ClassificationResult::from_probabilities(&probs, TOP_K).ok_or_else(|| {
            AiError::Shape(format!(
                "expected {} class probabilities, got {}",
                WasteType::COUNT,
                probs.len()
            ))
        })?;

        debug!(
            waste_type = %result.waste_type,
            category = %result.classification,
            confidence = result.confidence,
            "classified image"
        );
        Ok(result)
    }

    /// Decode an encoded image (PNG, JPEG) and classify it.
    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<ClassificationResult, AiError> {
        let image = image::load_from_memory(bytes)?;
        self.classify(&image)
    }

    /// Softmax distribution over [`WasteType::ALL`].
    pub fn probabilities(&self, image: &DynamicImage) -> Result<Vec<f32>, AiError> {
        let input = preprocess(image)?;
        let features = self.backbone.forward(&input)?;
        let logits = self.head.forward(&features)?;
        softmax(&logits)
    }
}

#[cfg(feature = "onnx")]
fn load_backbone(path: &Path) -> Result<Box<dyn Backbone>, AiError> {
    Ok(Box::new(crate::onnx::OnnxBackbone::load(path)?))
}

#[cfg(not(feature = "onnx"))]
fn load_backbone(path: &Path) -> Result<Box<dyn Backbone>, AiError> {
    if !path.exists() {
        return Err(AiError::ModelNotFound(path.to_path_buf()));
    }
    Err(AiError::OnnxDisabled)
}
