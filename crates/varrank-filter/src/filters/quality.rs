use varrank_common::{FilterResult, FilterType, Result, VarrankError, VariantRecord};

use crate::filter::Filter;

/// Passes variants whose call quality is at least the configured minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityFilter {
    min_quality: f64,
}

impl QualityFilter {
    pub fn new(min_quality: f64) -> Result<Self> {
        if !min_quality.is_finite() || min_quality < 0.0 {
            return Err(VarrankError::invalid_config(
                FilterType::Quality,
                format!("minimum quality must be a non-negative number, got {min_quality}"),
            ));
        }
        Ok(Self { min_quality })
    }

    pub fn min_quality(&self) -> f64 {
        self.min_quality
    }
}

impl Filter<VariantRecord> for QualityFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::Quality
    }

    fn run_filter(&self, variant: &VariantRecord) -> FilterResult {
        if variant.quality >= self.min_quality {
            FilterResult::pass(FilterType::Quality)
        } else {
            FilterResult::fail(FilterType::Quality)
        }
    }

    fn report_messages(&self) -> Vec<String> {
        vec![format!("Removed variants with PHRED quality below {:.1}", self.min_quality)]
    }
}
