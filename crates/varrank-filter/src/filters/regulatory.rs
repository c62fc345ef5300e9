use varrank_common::{FilterResult, FilterType, VariantEffect, VariantRecord};

use crate::filter::{Annotation, Filter};

/// Fails intergenic and upstream variants unless they lie in a known
/// regulatory feature. All other effects pass untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegulatoryFeatureFilter;

impl Filter<VariantRecord> for RegulatoryFeatureFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::RegulatoryFeature
    }

    fn run_filter(&self, variant: &VariantRecord) -> FilterResult {
        if !variant.effect.needs_regulatory_check() {
            return FilterResult::pass(FilterType::RegulatoryFeature);
        }
        if variant.effective_effect() == VariantEffect::RegulatoryRegionVariant {
            FilterResult::pass(FilterType::RegulatoryFeature)
        } else {
            FilterResult::fail(FilterType::RegulatoryFeature)
        }
    }

    fn required_annotation(&self) -> Option<Annotation> {
        Some(Annotation::RegulatoryEffect)
    }

    fn report_messages(&self) -> Vec<String> {
        vec!["Removed intergenic and upstream variants outside known regulatory features".to_string()]
    }
}
