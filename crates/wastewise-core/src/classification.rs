//! Output of a single image classification.

use serde::{Deserialize, Serialize};

use crate::waste::{Category, WasteType};

/// Version tag reported with every classification.
pub const MODEL_VERSION: &str = "1.0.0";

/// One (label, probability) pair from the classifier's top-k list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub waste_type: WasteType,
    pub confidence: f32,
}

/// Result of classifying one image.
///
/// `confidence` is the raw softmax probability of `waste_type`; no
/// calibration or thresholding is applied. `top_predictions` is sorted by
/// non-increasing confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Disposal category derived from `waste_type`.
    pub classification: Category,
    pub waste_type: WasteType,
    pub confidence: f32,
    pub top_predictions: Vec<Prediction>,
    pub model_version: String,
}

impl ClassificationResult {
    /// Build a result from a probability distribution over [`WasteType::ALL`].
    ///
    /// Returns `None` if `probs` does not have exactly [`WasteType::COUNT`]
    /// entries or `k` is zero. Ties rank the lower class index first.
    pub fn from_probabilities(probs: &[f32], k: usize) -> Option<Self> {
        if probs.len() != WasteType::COUNT || k == 0 {
            return None;
        }

        let mut ranked: Vec<(WasteType, f32)> = WasteType::ALL
            .iter()
            .copied()
            .zip(probs.iter().copied())
            .collect();
        // Stable sort keeps class-index order among equal probabilities.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let (waste_type, confidence) = ranked[0];
        let top_predictions = ranked
            .into_iter()
            .take(k)
            .map(|(waste_type, confidence)| Prediction {
                waste_type,
                confidence,
            })
            .collect();

        Some(Self {
            classification: waste_type.category(),
            waste_type,
            confidence,
            top_predictions,
            model_version: MODEL_VERSION.to_string(),
        })
    }
}
