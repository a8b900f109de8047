//! Image inference layer: preprocessing, backbones, and the waste classifier.
//!
//! Pretrained backbones run on ONNX Runtime behind the `onnx` feature; without
//! it (or without weight files) the classifier runs in degraded mode on
//! seeded random weights.

pub mod architecture;
pub mod backbone;
pub mod checkpoint;
pub mod classifier;
mod error;
pub mod head;
#[cfg(feature = "onnx")]
mod onnx;
pub mod preprocess;

pub use architecture::Architecture;
pub use backbone::{Backbone, RandomBackbone};
pub use checkpoint::{Checkpoint, HeadWeights};
pub use classifier::{BackboneSource, Classifier, ClassifierConfig, ModelProvenance, TOP_K};
pub use error::AiError;
pub use head::LinearHead;
#[cfg(feature = "onnx")]
pub use onnx::OnnxBackbone;
