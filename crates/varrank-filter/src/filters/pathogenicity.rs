use varrank_common::{FilterResult, FilterType, VariantRecord};

use crate::filter::{Annotation, Filter};

/// Minimum pathogenicity score for a variant to count as predicted pathogenic.
pub const PATHOGENICITY_THRESHOLD: f32 = 0.5;

/// Scores variants on predicted pathogenicity and, unless configured to
/// keep everything, fails those predicted benign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathogenicityFilter {
    keep_non_pathogenic: bool,
}

impl PathogenicityFilter {
    pub fn new(keep_non_pathogenic: bool) -> Self {
        Self { keep_non_pathogenic }
    }

    pub fn keep_non_pathogenic(&self) -> bool {
        self.keep_non_pathogenic
    }
}

impl Filter<VariantRecord> for PathogenicityFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::Pathogenicity
    }

    fn run_filter(&self, variant: &VariantRecord) -> FilterResult {
        let score = variant.pathogenicity_score();
        let clinvar_pathogenic = variant
            .pathogenicity_data
            .as_ref()
            .is_some_and(|data| data.is_clinvar_pathogenic());
        if self.keep_non_pathogenic || clinvar_pathogenic || score >= PATHOGENICITY_THRESHOLD {
            FilterResult::pass_with_score(FilterType::Pathogenicity, score)
        } else {
            FilterResult::fail_with_score(FilterType::Pathogenicity, score)
        }
    }

    fn required_annotation(&self) -> Option<Annotation> {
        Some(Annotation::Pathogenicity)
    }

    fn report_messages(&self) -> Vec<String> {
        if self.keep_non_pathogenic {
            vec!["Retained all non-pathogenic variants of all types. Scoring was applied, but the filter passed all variants.".to_string()]
        } else {
            vec![format!(
                "Removed variants with a pathogenicity score below {PATHOGENICITY_THRESHOLD}"
            )]
        }
    }
}
