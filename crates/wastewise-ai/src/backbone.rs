//! Feature extractors that sit in front of the classification head.
//!
//! A backbone maps a `[1, 3, 224, 224]` input tensor to a pooled feature
//! vector of [`Backbone::feature_dim`] values. The pretrained ONNX backbone
//! lives in `onnx.rs`; [`RandomBackbone`] is the degraded-mode stand-in: a
//! shallow random network that matches the architecture's feature width,
//! not its layers.

use ndarray::{Array1, Array2, Array4, s};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::architecture::Architecture;
use crate::error::AiError;
use crate::preprocess::INPUT_SIZE;

/// Image feature extractor. Inference takes `&self`, so a backbone can be
/// shared across threads.
pub trait Backbone: Send + Sync {
    /// Length of the vector returned by [`forward`](Backbone::forward).
    fn feature_dim(&self) -> usize;

    /// Extract features from one preprocessed image.
    fn forward(&self, input: &Array4<f32>) -> Result<Vec<f32>, AiError>;
}

/// Cells per side of the pooling grid.
const GRID: usize = 8;

/// Untrained backbone: grid average pooling followed by a seeded random
/// projection and ReLU.
///
/// This is not a randomly-initialized ResNet or MobileNet. Only the feature
/// width of the selected architecture is reproduced, so a head sized for
/// that architecture still fits. Weights use Kaiming-uniform initialization from a fixed per-architecture
/// seed, so two instances of the same architecture are identical.
pub struct RandomBackbone {
    projection: Array2<f32>,
}

impl RandomBackbone {
    pub fn new(architecture: Architecture) -> Self {
        let descriptor_len = 3 * GRID * GRID;
        let bound = (6.0 / descriptor_len as f32).sqrt();
        let mut rng = StdRng::seed_from_u64(architecture.seed());
        let projection = Array2::from_shape_fn(
            (architecture.feature_dim(), descriptor_len),
            |_| rng.gen_range(-bound..bound),
        );
        Self { projection }
    }

    /// Mean of each channel over each grid cell, channel-major.
    fn pooled_descriptor(input: &Array4<f32>) -> Array1<f32> {
        let cell = INPUT_SIZE as usize / GRID;
        let mut descriptor = Array1::zeros(3 * GRID * GRID);
        let mut i = 0;
        for c in 0..3 {
            for gy in 0..GRID {
                for gx in 0..GRID {
                    let patch = input.slice(s![
                        0,
                        c,
                        gy * cell..(gy + 1) * cell,
                        gx * cell..(gx + 1) * cell
                    ]);
                    descriptor[i] = patch.sum() / patch.len() as f32;
                    i += 1;
                }
            }
        }
        descriptor
    }
}

impl Backbone for RandomBackbone {
    fn feature_dim(&self) -> usize {
        self.projection.nrows()
    }

    fn forward(&self, input: &Array4<f32>) -> Result<Vec<f32>, AiError> {
        check_input_shape(input)?;
        let descriptor = Self::pooled_descriptor(input);
        let features = self.projection.dot(&descriptor).mapv(|v| v.max(0.0));
        Ok(features.to_vec())
    }
}

/// Reject anything that is not a single preprocessed image.
pub(crate) fn check_input_shape(input: &Array4<f32>) -> Result<(), AiError> {
    let side = INPUT_SIZE as usize;
    if input.shape() != [1, 3, side, side] {
        return Err(AiError::Shape(format!(
            "expected input [1, 3, {side}, {side}], got {:?}",
            input.shape()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_input() -> Array4<f32> {
        Array4::from_shape_fn((1, 3, 224, 224), |(_, c, y, x)| {
            (c as f32 - 1.0) + (x as f32 - y as f32) / 224.0
        })
    }

    #[test]
    fn feature_dim_matches_architecture() {
        for arch in [Architecture::ResNet50, Architecture::MobileNet] {
            let backbone = RandomBackbone::new(arch);
            assert_eq!(backbone.feature_dim(), arch.feature_dim());
            let features = backbone.forward(&gradient_input()).unwrap();
            assert_eq!(features.len(), arch.feature_dim());
        }
    }

    #[test]
    fn same_seed_same_weights() {
        let a = RandomBackbone::new(Architecture::MobileNet);
        let b = RandomBackbone::new(Architecture::MobileNet);
        assert_eq!(a.projection, b.projection);
    }

    #[test]
    fn forward_is_deterministic_and_non_negative() {
        let backbone = RandomBackbone::new(Architecture::ResNet50);
        let input = gradient_input();
        let first = backbone.forward(&input).unwrap();
        let second = backbone.forward(&input).unwrap();
        assert_eq!(first, second);
        assert!(first.iter().all(|v| *v >= 0.0 && v.is_finite()));
        assert!(first.iter().any(|v| *v > 0.0), "all features dead");
    }

    #[test]
    fn pooled_descriptor_of_constant_input() {
        let input = Array4::from_elem((1, 3, 224, 224), 0.5f32);
        let d = RandomBackbone::pooled_descriptor(&input);
        assert_eq!(d.len(), 192);
        assert!(d.iter().all(|v| (v - 0.5).abs() < 1e-6));
    }

    #[test]
    fn wrong_input_shape_is_an_error() {
        let backbone = RandomBackbone::new(Architecture::MobileNet);
        let input = Array4::<f32>::zeros((1, 3, 32, 32));
        assert!(matches!(backbone.forward(&input), Err(AiError::Shape(_))));
    }
}
