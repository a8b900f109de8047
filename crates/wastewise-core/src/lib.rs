pub mod classification;
pub mod guidance;
pub mod response;
pub mod waste;

pub use classification::{ClassificationResult, MODEL_VERSION, Prediction};
pub use guidance::{
    CatalogMatch, CategoryInfo, DisposalGuide, RegionalRuleset, Regulations, SegregationTip,
    WasteMaterial,
};
pub use response::{CompositeResponse, SDG_IMPACT, SdgGoal};
pub use waste::{Category, WasteType};
