use varrank_common::{FilterResult, FilterType, Gene, PriorityType, Result, VarrankError};

use crate::filter::Filter;

/// Passes genes whose score from one prioritiser meets a minimum.
/// Genes the prioritiser never scored fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityScoreFilter {
    priority_type: PriorityType,
    min_score: f32,
}

impl PriorityScoreFilter {
    pub fn new(priority_type: PriorityType, min_score: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&min_score) {
            return Err(VarrankError::invalid_config(
                FilterType::PriorityScore,
                format!("minimum priority score must be in [0, 1], got {min_score}"),
            ));
        }
        Ok(Self { priority_type, min_score })
    }

    pub fn priority_type(&self) -> PriorityType {
        self.priority_type
    }

    pub fn min_score(&self) -> f32 {
        self.min_score
    }
}

impl Filter<Gene> for PriorityScoreFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::PriorityScore
    }

    fn run_filter(&self, gene: &Gene) -> FilterResult {
        match gene.priority_score(self.priority_type) {
            Some(score) if score >= self.min_score => {
                FilterResult::pass_with_score(FilterType::PriorityScore, score)
            }
            Some(score) => FilterResult::fail_with_score(FilterType::PriorityScore, score),
            None => FilterResult::fail(FilterType::PriorityScore),
        }
    }

    fn report_messages(&self) -> Vec<String> {
        vec![format!(
            "Removed genes with a {:?} score below {:.3}",
            self.priority_type, self.min_score
        )]
    }
}
