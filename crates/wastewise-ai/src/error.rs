use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("classifier is built for {expected} classes, got {actual}")]
    ClassCount { expected: usize, actual: usize },

    #[error("image has zero width or height")]
    EmptyImage,

    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("tensor shape error: {0}")]
    Shape(String),

    #[error("inference error: {0}")]
    Inference(String),

    #[error("model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error("checkpoint {}: {reason}", .path.display())]
    Checkpoint { path: PathBuf, reason: String },

    #[error("ONNX support not compiled in (enable the `onnx` feature)")]
    OnnxDisabled,

    #[cfg(feature = "onnx")]
    #[error("onnx runtime error: {0}")]
    Onnx(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
