//! Waste taxonomy: the classifier's fine-grained labels and the coarse
//! disposal categories they map onto.
//!
//! Both sets are closed. The label order is the classifier's output order
//! (class index 0..6), so [`WasteType::ALL`] doubles as the index → label table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fine-grained material label predicted by the image classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteType {
    Plastic,
    Paper,
    Glass,
    Metal,
    Organic,
    Hazardous,
}

impl WasteType {
    /// Number of classifier output classes.
    pub const COUNT: usize = 6;

    /// All labels in class-index order.
    pub const ALL: [WasteType; Self::COUNT] = [
        Self::Plastic,
        Self::Paper,
        Self::Glass,
        Self::Metal,
        Self::Organic,
        Self::Hazardous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plastic => "plastic",
            Self::Paper => "paper",
            Self::Glass => "glass",
            Self::Metal => "metal",
            Self::Organic => "organic",
            Self::Hazardous => "hazardous",
        }
    }

    /// Position of this label in the classifier's logit vector.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Fixed label → disposal category mapping.
    pub fn category(&self) -> Category {
        match self {
            Self::Plastic | Self::Paper | Self::Glass | Self::Metal => Category::Recyclable,
            Self::Organic => Category::Organic,
            Self::Hazardous => Category::Hazardous,
        }
    }
}

impl fmt::Display for WasteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse disposal class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Recyclable,
    Organic,
    Hazardous,
    Mixed,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recyclable => "recyclable",
            Self::Organic => "organic",
            Self::Hazardous => "hazardous",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
