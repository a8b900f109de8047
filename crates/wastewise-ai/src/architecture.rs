//! Supported backbone families.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backbone family the classifier is built on.
///
/// The feature width is what the backbone hands to the classification head:
/// the pooled output of the last convolutional stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    /// Deep residual network (ResNet-50).
    #[default]
    ResNet50,
    /// Lightweight mobile network (MobileNetV2).
    MobileNet,
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResNet50 => "resnet50",
            Self::MobileNet => "mobilenet",
        }
    }

    /// Width of the pooled feature vector feeding the head.
    pub fn feature_dim(&self) -> usize {
        match self {
            Self::ResNet50 => 2048,
            Self::MobileNet => 1280,
        }
    }

    /// Seed for random initialization. Fixed per architecture so an
    /// uninitialized model still produces the same output on every run.
    pub(crate) fn seed(&self) -> u64 {
        match self {
            Self::ResNet50 => 0x5245_534e_4554_3530,
            Self::MobileNet => 0x4d4f_4249_4c45_5632,
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
