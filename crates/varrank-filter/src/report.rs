//! Filter report aggregation.
//!
//! One report per configured filter: how many entities passed and failed
//! it, the filter's own description, and for annotation-backed filters the
//! share of variants carrying that annotation. Entities with no stored
//! result for a filter (never reached, or `NotRun`) count towards neither.

use serde::{Deserialize, Serialize};
use tracing::debug;
use varrank_common::{FilterType, Filterable, Gene, VariantRecord};

use crate::filter::Filter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterReport {
    pub filter_type: FilterType,
    pub passed: usize,
    pub failed: usize,
    pub messages: Vec<String>,
}

impl FilterReport {
    pub fn title(&self) -> &'static str {
        self.filter_type.title()
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}

pub struct ReportBuilder;

impl ReportBuilder {
    /// Reports for a variant chain, in chain order.
    pub fn variant_reports<'a>(
        filters: &[Box<dyn Filter<VariantRecord>>],
        variants: impl IntoIterator<Item = &'a VariantRecord>,
    ) -> Vec<FilterReport> {
        let variants: Vec<&VariantRecord> = variants.into_iter().collect();
        filters
            .iter()
            .map(|filter| {
                let mut report = Self::count(filter.as_ref(), &variants);
                report.messages.extend(annotation_statistics(filter.filter_type(), &variants));
                report
            })
            .collect()
    }

    /// Reports for a gene chain, in chain order.
    pub fn gene_reports<'a>(
        filters: &[Box<dyn Filter<Gene>>],
        genes: impl IntoIterator<Item = &'a Gene>,
    ) -> Vec<FilterReport> {
        let genes: Vec<&Gene> = genes.into_iter().collect();
        filters
            .iter()
            .map(|filter| Self::count(filter.as_ref(), &genes))
            .collect()
    }

    /// Variant reports computed from the variants held by each gene.
    pub fn gene_variant_reports<'a>(
        filters: &[Box<dyn Filter<VariantRecord>>],
        genes: impl IntoIterator<Item = &'a Gene>,
    ) -> Vec<FilterReport> {
        Self::variant_reports(filters, genes.into_iter().flat_map(|g| g.variants.iter()))
    }

    fn count<T: Filterable>(filter: &dyn Filter<T>, entities: &[&T]) -> FilterReport {
        let filter_type = filter.filter_type();
        let mut passed = 0;
        let mut failed = 0;
        for result in entities
            .iter()
            .filter_map(|e| e.filter_results().get(filter_type))
        {
            if result.passed() {
                passed += 1;
            } else if result.failed() {
                failed += 1;
            }
        }
        debug!(filter = ?filter_type, passed, failed, "Built filter report");
        FilterReport {
            filter_type,
            passed,
            failed,
            messages: filter.report_messages(),
        }
    }
}

fn annotation_statistics(filter_type: FilterType, variants: &[&VariantRecord]) -> Vec<String> {
    let total = variants.len();
    match filter_type {
        FilterType::Frequency | FilterType::KnownVariant => {
            let with_rs_id = variants
                .iter()
                .filter(|v| v.frequency_data.as_ref().is_some_and(|d| d.has_dbsnp_rs_id()))
                .count();
            let with_frequency = variants
                .iter()
                .filter(|v| v.frequency_data.as_ref().is_some_and(|d| d.has_known_frequency()))
                .count();
            vec![
                format!(
                    "dbSNP \"rs\" id available for {} variants ({:.1}% of total)",
                    with_rs_id,
                    percent(with_rs_id, total)
                ),
                format!(
                    "Frequency data available for {} variants ({:.1}% of total)",
                    with_frequency,
                    percent(with_frequency, total)
                ),
            ]
        }
        FilterType::Pathogenicity => {
            let with_prediction = variants
                .iter()
                .filter(|v| v.pathogenicity_data.as_ref().is_some_and(|d| d.has_predicted_score()))
                .count();
            vec![format!(
                "Pathogenicity predictions available for {} variants ({:.1}% of total)",
                with_prediction,
                percent(with_prediction, total)
            )]
        }
        _ => vec![],
    }
}

fn percent(n: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * n as f64 / total as f64
}
