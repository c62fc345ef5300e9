use varrank_common::{FilterResult, FilterType, GenomicInterval, Result, VarrankError, VariantRecord};

use crate::filter::Filter;

/// Passes variants lying inside a single genomic interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalFilter {
    interval: GenomicInterval,
}

impl IntervalFilter {
    pub fn new(interval: GenomicInterval) -> Result<Self> {
        if interval.is_empty() || interval.chromosome.is_empty() {
            return Err(VarrankError::invalid_config(
                FilterType::Interval,
                format!("'{interval}' is not a valid interval"),
            ));
        }
        Ok(Self { interval })
    }

    pub fn interval(&self) -> &GenomicInterval {
        &self.interval
    }
}

impl Filter<VariantRecord> for IntervalFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::Interval
    }

    fn run_filter(&self, variant: &VariantRecord) -> FilterResult {
        if self.interval.contains(&variant.chromosome, variant.position) {
            FilterResult::pass(FilterType::Interval)
        } else {
            FilterResult::fail(FilterType::Interval)
        }
    }

    fn report_messages(&self) -> Vec<String> {
        vec![format!("Restricted variants to interval: {}", self.interval)]
    }
}
