//! Fine-tuned waste classifier checkpoints.
//!
//! A checkpoint is a JSON file holding the trained head and, optionally, a
//! path (relative to the checkpoint) to a fine-tuned backbone exported as
//! ONNX. It is looked up at `<model_dir>/<arch>_waste_classifier.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wastewise_core::WasteType;

use crate::architecture::Architecture;
use crate::error::AiError;
use crate::head::LinearHead;

/// Trained head weights, one row per class in [`WasteType::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadWeights {
    pub weight: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub architecture: Architecture,
    /// Class order the head was trained with. Must match [`WasteType::ALL`]
    /// when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<WasteType>>,
    pub head: HeadWeights,
    /// Fine-tuned backbone, relative to the checkpoint file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backbone: Option<PathBuf>,
}

impl Checkpoint {
    /// Path a checkpoint for `architecture` is expected at.
    pub fn default_path(model_dir: &Path, architecture: Architecture) -> PathBuf {
        model_dir.join(format!("{architecture}_waste_classifier.json"))
    }

    pub fn load(path: &Path) -> Result<Self, AiError> {
        let text = fs::read_to_string(path)?;
        let checkpoint = serde_json::from_str(&text)?;
        Ok(checkpoint)
    }

    pub fn save(&self, path: &Path) -> Result<(), AiError> {
        let text = serde_json::to_string(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Check the checkpoint targets `architecture` and the fixed label order,
    /// then build its head.
    ///
    /// The head's input width is validated later against whichever backbone
    /// it ends up attached to.
    pub fn head_for(&self, architecture: Architecture, path: &Path) -> Result<LinearHead, AiError> {
        let reject = |reason: String| AiError::Checkpoint {
            path: path.to_path_buf(),
            reason,
        };

        if self.architecture != architecture {
            return Err(reject(format!(
                "trained for {}, classifier is {architecture}",
                self.architecture
            )));
        }
        if let Some(classes) = &self.classes
            && classes.as_slice() != WasteType::ALL
        {
            return Err(reject(format!("class order {classes:?} does not match")));
        }

        let head = LinearHead::from_rows(&self.head.weight, &self.head.bias)
            .map_err(|e| reject(e.to_string()))?;
        if head.num_classes() != WasteType::COUNT {
            return Err(reject(format!(
                "head has {} classes, expected {}",
                head.num_classes(),
                WasteType::COUNT
            )));
        }
        Ok(head)
    }

    /// Absolute location of the fine-tuned backbone, if any.
    pub fn backbone_path(&self, checkpoint_path: &Path) -> Option<PathBuf> {
        let relative = self.backbone.as_ref()?;
        let base = checkpoint_path.parent().unwrap_or(Path::new("."));
        Some(base.join(relative))
    }
}
