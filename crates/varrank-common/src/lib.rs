//! varrank-common — Shared records, result model and errors used across all varrank crates.

pub mod error;
pub mod filter_result;
pub mod annotations;
pub mod inheritance;
pub mod interval;
pub mod variant;
pub mod gene;

// Re-export commonly used types
pub use error::{Result, VarrankError};
pub use filter_result::{FilterResult, FilterResultStatus, FilterResults, FilterType, Filterable};
pub use annotations::{
    ClinVarSignificance, Frequency, FrequencyData, FrequencySource, PathogenicityData,
    PathogenicityScore, PathogenicitySource, VariantEffect,
};
pub use inheritance::ModeOfInheritance;
pub use interval::GenomicInterval;
pub use variant::VariantRecord;
pub use gene::{Gene, GeneScore, GeneScoreBuilder, PriorityType};
