use varrank_common::{FilterResult, FilterType, VariantRecord};

use crate::filter::Filter;

/// Removes variants which did not pass the caller's own VCF filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailedVariantFilter;

impl Filter<VariantRecord> for FailedVariantFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::FailedVariant
    }

    fn run_filter(&self, variant: &VariantRecord) -> FilterResult {
        if variant.passed_vcf_filters {
            FilterResult::pass(FilterType::FailedVariant)
        } else {
            FilterResult::fail(FilterType::FailedVariant)
        }
    }

    fn report_messages(&self) -> Vec<String> {
        vec!["Removed variants which failed previous VCF filters".to_string()]
    }
}
