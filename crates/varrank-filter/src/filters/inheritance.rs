use std::collections::BTreeSet;

use tracing::debug;
use varrank_common::{FilterResult, FilterType, Gene, ModeOfInheritance};

use crate::filter::Filter;

/// Passes genes compatible with at least one configured mode of inheritance.
///
/// Configured without any defined mode (nothing, or only `Any`) the filter
/// has nothing to test and returns `NotRun`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceFilter {
    modes: BTreeSet<ModeOfInheritance>,
}

impl InheritanceFilter {
    pub fn new(modes: impl IntoIterator<Item = ModeOfInheritance>) -> Self {
        Self {
            modes: modes.into_iter().filter(ModeOfInheritance::is_defined).collect(),
        }
    }

    pub fn modes(&self) -> &BTreeSet<ModeOfInheritance> {
        &self.modes
    }
}

impl Filter<Gene> for InheritanceFilter {
    fn filter_type(&self) -> FilterType {
        FilterType::Inheritance
    }

    fn run_filter(&self, gene: &Gene) -> FilterResult {
        if self.modes.is_empty() {
            debug!(gene = %gene.symbol, "No mode of inheritance defined, inheritance filter not run");
            return FilterResult::not_run(FilterType::Inheritance);
        }
        if self.modes.iter().any(|mode| gene.is_compatible_with(*mode)) {
            FilterResult::pass(FilterType::Inheritance)
        } else {
            FilterResult::fail(FilterType::Inheritance)
        }
    }

    fn report_messages(&self) -> Vec<String> {
        if self.modes.is_empty() {
            return vec!["Inheritance filter not run: no mode of inheritance defined".to_string()];
        }
        let modes: Vec<&str> = self.modes.iter().map(|m| m.abbreviation()).collect();
        vec![format!("Genes filtered for compatibility with {} inheritance", modes.join(", "))]
    }
}
