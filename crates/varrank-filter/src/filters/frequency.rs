use varrank_common::{FilterResult, FilterType, Result, VarrankError, VariantRecord};

use crate::filter::{Annotation, Filter};

/// Passes variants whose highest population frequency does not exceed the
/// threshold. Results carry the variant's rarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyFilter {
    max_frequency_percent: f32,
}

impl FrequencyFilter {
    pub fn new(max_frequency_percent: f32) -> Result<Self> {
        if !(0.0..=100.0).contains(&max_frequency_percent) {
            return Err(VarrankError::invalid_config(
                FilterType::Frequency,
                format!(
                    "maximum frequency must be a percentage in [0, 100], got {max_frequency_percent}"
                ),
            ));
        }
        Ok(Self { max_frequency_percent })
    }

    pub fn max_frequency_percent(&self) -> f32 {
        self.max_frequency_percent
    }
}

impl Filter<VariantRecord> for FrequencyFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::Frequency
    }

    /// Variants without frequency data are treated as unobserved.
    fn run_filter(&self, variant: &VariantRecord) -> FilterResult {
        let max_frequency = variant
            .frequency_data
            .as_ref()
            .map_or(0.0, |data| data.max_frequency());
        let score = variant.frequency_score();
        if max_frequency <= self.max_frequency_percent {
            FilterResult::pass_with_score(FilterType::Frequency, score)
        } else {
            FilterResult::fail_with_score(FilterType::Frequency, score)
        }
    }

    fn required_annotation(&self) -> Option<Annotation> {
        Some(Annotation::Frequency)
    }

    fn report_messages(&self) -> Vec<String> {
        vec![format!(
            "Allele frequency < {:.2} %",
            self.max_frequency_percent
        )]
    }
}
