//! Concrete variant and gene filters.

pub mod failed_variant;
pub mod quality;
pub mod interval;
pub mod gene_id;
pub mod variant_effect;
pub mod regulatory;
pub mod known_variant;
pub mod frequency;
pub mod pathogenicity;
pub mod priority_score;
pub mod inheritance;

pub use failed_variant::FailedVariantFilter;
pub use quality::QualityFilter;
pub use interval::IntervalFilter;
pub use gene_id::GeneIdFilter;
pub use variant_effect::VariantEffectFilter;
pub use regulatory::RegulatoryFeatureFilter;
pub use known_variant::KnownVariantFilter;
pub use frequency::FrequencyFilter;
pub use pathogenicity::PathogenicityFilter;
pub use priority_score::PriorityScoreFilter;
pub use inheritance::InheritanceFilter;
