//! Linear classification head: `logits = W · features + b`.

use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::AiError;

#[derive(Debug, Clone, PartialEq)]
pub struct LinearHead {
    /// `[num_classes, in_features]`
    weight: Array2<f32>,
    bias: Array1<f32>,
}

impl LinearHead {
    /// Fresh head with the usual `U(-1/√in, 1/√in)` initialization.
    pub fn random(in_features: usize, num_classes: usize, seed: u64) -> Self {
        let bound = 1.0 / (in_features.max(1) as f32).sqrt();
        let mut rng = StdRng::seed_from_u64(seed);
        let weight =
            Array2::from_shape_fn((num_classes, in_features), |_| rng.gen_range(-bound..bound));
        let bias = Array1::from_shape_fn(num_classes, |_| rng.gen_range(-bound..bound));
        Self { weight, bias }
    }

    /// Build from row-major weights (one row per class) and a bias vector.
    pub fn from_rows(rows: &[Vec<f32>], bias: &[f32]) -> Result<Self, AiError> {
        let num_classes = rows.len();
        let in_features = rows.first().map(Vec::len).unwrap_or(0);

        if num_classes == 0 || in_features == 0 {
            return Err(AiError::Shape("head weight matrix is empty".into()));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != in_features) {
            return Err(AiError::Shape(format!(
                "head weight row {i} has {} values, expected {in_features}",
                row.len()
            )));
        }
        if bias.len() != num_classes {
            return Err(AiError::Shape(format!(
                "head bias has {} values, expected {num_classes}",
                bias.len()
            )));
        }
        if rows.iter().flatten().chain(bias).any(|v| !v.is_finite()) {
            return Err(AiError::Shape("head contains non-finite values".into()));
        }

        let flat: Vec<f32> = rows.iter().flatten().copied().collect();
        let weight = Array2::from_shape_vec((num_classes, in_features), flat)
            .map_err(|e| AiError::Shape(e.to_string()))?;

        Ok(Self {
            weight,
            bias: Array1::from(bias.to_vec()),
        })
    }

    pub fn in_features(&self) -> usize {
        self.weight.ncols()
    }

    pub fn num_classes(&self) -> usize {
        self.weight.nrows()
    }

    pub fn forward(&self, features: &[f32]) -> Result<Vec<f32>, AiError> {
        if features.len() != self.in_features() {
            return Err(AiError::Shape(format!(
                "head expects {} features, backbone produced {}",
                self.in_features(),
                features.len()
            )));
        }
        let x = ArrayView1::from(features);
        let logits = self.weight.dot(&x) + &self.bias;
        Ok(logits.to_vec())
    }
}

/// Numerically stable softmax. Fails on empty or non-finite logits.
pub fn softmax(logits: &[f32]) -> Result<Vec<f32>, AiError> {
    if logits.is_empty() {
        return Err(AiError::Inference("no logits".into()));
    }
    if logits.iter().any(|v| !v.is_finite()) {
        return Err(AiError::Inference(format!(
            "non-finite logits: {logits:?}"
        )));
    }

    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    Ok(exps.into_iter().map(|e| e / sum).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_head_shape_and_bounds() {
        let head = LinearHead::random(16, 6, 7);
        assert_eq!(head.in_features(), 16);
        assert_eq!(head.num_classes(), 6);
        assert!(head.weight.iter().all(|w| w.abs() <= 0.25));
        assert_eq!(head, LinearHead::random(16, 6, 7));
    }

    #[test]
    fn forward_computes_affine_map() {
        let head = LinearHead::from_rows(&[vec![1.0, 0.0], vec![0.5, 2.0]], &[0.0, -1.0]).unwrap();
        let logits = head.forward(&[2.0, 3.0]).unwrap();
        assert_eq!(logits, vec![2.0, 6.0]);
    }

    #[test]
    fn forward_rejects_wrong_feature_count() {
        let head = LinearHead::random(4, 6, 1);
        assert!(matches!(head.forward(&[0.0; 3]), Err(AiError::Shape(_))));
    }

    #[test]
    fn from_rows_validates_shape() {
        assert!(LinearHead::from_rows(&[], &[]).is_err());
        assert!(LinearHead::from_rows(&[vec![1.0], vec![1.0, 2.0]], &[0.0, 0.0]).is_err());
        assert!(LinearHead::from_rows(&[vec![1.0]], &[0.0, 0.0]).is_err());
        assert!(LinearHead::from_rows(&[vec![f32::NAN]], &[0.0]).is_err());
    }

    #[test]
    fn softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0, -50.0, 0.0, 1000.0]).unwrap();
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
        assert!(probs[5] > 0.99);
    }

    #[test]
    fn softmax_of_equal_logits_is_uniform() {
        let probs = softmax(&[3.0; 6]).unwrap();
        for p in probs {
            assert!((p - 1.0 / 6.0).abs() < 1e-6);
        }
    }

    #[test]
    fn softmax_rejects_non_finite() {
        assert!(softmax(&[1.0, f32::NAN]).is_err());
        assert!(softmax(&[f32::INFINITY]).is_err());
        assert!(softmax(&[]).is_err());
    }
}
