use varrank_common::{FilterResult, FilterType, VariantRecord};

use crate::filter::{Annotation, Filter};

/// Fails variants already represented in dbSNP or a frequency database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KnownVariantFilter;

impl Filter<VariantRecord> for KnownVariantFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::KnownVariant
    }

    fn run_filter(&self, variant: &VariantRecord) -> FilterResult {
        let known = variant
            .frequency_data
            .as_ref()
            .is_some_and(|data| data.is_represented_in_database());
        if known {
            FilterResult::fail(FilterType::KnownVariant)
        } else {
            FilterResult::pass(FilterType::KnownVariant)
        }
    }

    fn required_annotation(&self) -> Option<Annotation> {
        Some(Annotation::Frequency)
    }

    fn report_messages(&self) -> Vec<String> {
        vec!["Removed variants represented in dbSNP or a population frequency database".to_string()]
    }
}
