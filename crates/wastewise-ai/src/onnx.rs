//! Pretrained backbones exported to ONNX.
//!
//! The model takes a single `[1, 3, 224, 224]` float input and returns the
//! pooled features (`[1, C]` or `[1, C, 1, 1]`), i.e. the network with its
//! ImageNet classifier removed.

use std::path::Path;

use ndarray::Array4;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Tensor;
use parking_lot::Mutex;
use tracing::info;

use crate::backbone::{Backbone, check_input_shape};
use crate::error::AiError;
use crate::preprocess::INPUT_SIZE;

pub struct OnnxBackbone {
    // `Session::run` needs `&mut`; the lock is held only for the run itself.
    session: Mutex<Session>,
    dim: usize,
}

impl OnnxBackbone {
    pub fn load(model_path: &Path) -> Result<Self, AiError> {
        if !model_path.exists() {
            return Err(AiError::ModelNotFound(model_path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(|e| AiError::Onnx(format!("session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| AiError::Onnx(format!("optimization level: {e}")))?
            .commit_from_file(model_path)
            .map_err(|e| AiError::Onnx(format!("load {}: {e}", model_path.display())))?;

        let dim = session
            .outputs()
            .first()
            .and_then(|o| infer_dim(o.dtype()))
            .ok_or_else(|| {
                AiError::Shape(format!(
                    "cannot infer feature width from {}",
                    model_path.display()
                ))
            })?;

        info!(dim, model = %model_path.display(), "loaded ONNX backbone");
        Ok(Self {
            session: Mutex::new(session),
            dim,
        })
    }
}

impl Backbone for OnnxBackbone {
    fn feature_dim(&self) -> usize {
        self.dim
    }

    fn forward(&self, input: &Array4<f32>) -> Result<Vec<f32>, AiError> {
        check_input_shape(input)?;

        let side = INPUT_SIZE as i64;
        let shape = [1, 3, side, side];
        let data: Vec<f32> = input.iter().copied().collect();
        let tensor = Tensor::from_array((shape, data.into_boxed_slice()))
            .map_err(|e| AiError::Onnx(format!("input tensor: {e}")))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| AiError::Inference(e.to_string()))?;

        let (_, features) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| AiError::Inference(format!("extract features: {e}")))?;

        if features.len() != self.dim {
            return Err(AiError::Shape(format!(
                "backbone produced {} values, expected {}",
                features.len(),
                self.dim
            )));
        }
        Ok(features.to_vec())
    }
}

/// Feature width from the output type: the only non-unit dimension after batch.
fn infer_dim(output_type: &ort::value::ValueType) -> Option<usize> {
    match output_type {
        ort::value::ValueType::Tensor { shape, .. } => shape
            .iter()
            .skip(1)
            .copied()
            .find(|&d| d > 1)
            .map(|d| d as usize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = OnnxBackbone::load(&dir.path().join("backbone.onnx"))
            .err()
            .expect("load should fail");
        assert!(matches!(err, AiError::ModelNotFound(_)));
    }

    #[test]
    fn corrupt_model_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backbone.onnx");
        std::fs::write(&path, b"definitely not protobuf").unwrap();
        assert!(OnnxBackbone::load(&path).is_err());
    }
}
