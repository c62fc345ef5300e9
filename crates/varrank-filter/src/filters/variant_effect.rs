use std::collections::HashSet;

use varrank_common::{FilterResult, FilterType, Result, VarrankError, VariantEffect, VariantRecord};

use crate::filter::Filter;

/// Fails variants whose (possibly re-classified) effect is in the removal set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantEffectFilter {
    off_target_effects: HashSet<VariantEffect>,
}

impl VariantEffectFilter {
    pub fn new(off_target_effects: impl IntoIterator<Item = VariantEffect>) -> Result<Self> {
        let off_target_effects: HashSet<VariantEffect> = off_target_effects.into_iter().collect();
        if off_target_effects.is_empty() {
            return Err(VarrankError::invalid_config(
                FilterType::VariantEffect,
                "no variant effects given to remove",
            ));
        }
        Ok(Self { off_target_effects })
    }

    /// Removes every effect outside coding sequence and splice sites.
    pub fn off_target() -> Self {
        Self {
            off_target_effects: [
                VariantEffect::SynonymousVariant,
                VariantEffect::FivePrimeUtrVariant,
                VariantEffect::ThreePrimeUtrVariant,
                VariantEffect::NonCodingTranscriptExonVariant,
                VariantEffect::IntronVariant,
                VariantEffect::UpstreamGeneVariant,
                VariantEffect::DownstreamGeneVariant,
                VariantEffect::IntergenicVariant,
                VariantEffect::Unknown,
            ]
            .into_iter()
            .collect(),
        }
    }

    pub fn off_target_effects(&self) -> &HashSet<VariantEffect> {
        &self.off_target_effects
    }
}

impl Filter<VariantRecord> for VariantEffectFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::VariantEffect
    }

    fn run_filter(&self, variant: &VariantRecord) -> FilterResult {
        if self.off_target_effects.contains(&variant.effective_effect()) {
            FilterResult::fail(FilterType::VariantEffect)
        } else {
            FilterResult::pass(FilterType::VariantEffect)
        }
    }

    fn report_messages(&self) -> Vec<String> {
        let mut effects: Vec<String> = self
            .off_target_effects
            .iter()
            .map(|e| format!("{e:?}"))
            .collect();
        effects.sort();
        vec![format!("Removed variants with effects of type: {}", effects.join(", "))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use varrank_test_utils::variant;

    #[test]
    fn test_off_target_removed() {
        let filter = VariantEffectFilter::off_target();
        let intronic = variant("1", 1).effect(VariantEffect::IntronVariant).build();
        let missense = variant("1", 2).effect(VariantEffect::MissenseVariant).build();
        assert!(filter.run_filter(&intronic).failed());
        assert!(filter.run_filter(&missense).passed());
    }

    #[test]
    fn test_regulatory_reclassification_is_respected() {
        let filter = VariantEffectFilter::new([VariantEffect::IntergenicVariant]).unwrap();
        let mut v = variant("1", 1).effect(VariantEffect::IntergenicVariant).build();
        assert!(filter.run_filter(&v).failed());
        v.regulatory_effect = Some(VariantEffect::RegulatoryRegionVariant);
        assert!(filter.run_filter(&v).passed());
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = VariantEffectFilter::new([VariantEffect::IntronVariant, VariantEffect::SynonymousVariant]).unwrap();
        let b = VariantEffectFilter::new([VariantEffect::SynonymousVariant, VariantEffect::IntronVariant]).unwrap();
        assert_eq!(a, b);
    }
}
