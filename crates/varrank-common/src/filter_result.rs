//! Filter outcome model.
//!
//! A filter produces one [`FilterResult`] per entity. Entities accumulate
//! results in an insertion-ordered [`FilterResults`] map keyed by
//! [`FilterType`]. `NotRun` outcomes are never stored.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

// ---------------------------------------------------------------------------
// Filter type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    FailedVariant,
    Quality,
    Interval,
    Frequency,
    Pathogenicity,
    KnownVariant,
    VariantEffect,
    RegulatoryFeature,
    Inheritance,
    GeneId,
    PriorityScore,
}

impl FilterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::FailedVariant     => "failed_variant",
            FilterType::Quality           => "quality",
            FilterType::Interval          => "interval",
            FilterType::Frequency         => "frequency",
            FilterType::Pathogenicity     => "pathogenicity",
            FilterType::KnownVariant      => "known_variant",
            FilterType::VariantEffect     => "variant_effect",
            FilterType::RegulatoryFeature => "regulatory_feature",
            FilterType::Inheritance       => "inheritance",
            FilterType::GeneId            => "gene_id",
            FilterType::PriorityScore     => "priority_score",
        }
    }

    /// Human-readable title used as the heading of a filter report.
    pub fn title(&self) -> &'static str {
        match self {
            FilterType::FailedVariant     => "Failed previous VCF filters",
            FilterType::Quality           => "Quality",
            FilterType::Interval          => "Interval",
            FilterType::Frequency         => "Frequency",
            FilterType::Pathogenicity     => "Pathogenicity",
            FilterType::KnownVariant      => "Known variant",
            FilterType::VariantEffect     => "Variant effect",
            FilterType::RegulatoryFeature => "Regulatory feature",
            FilterType::Inheritance       => "Inheritance",
            FilterType::GeneId            => "Gene id",
            FilterType::PriorityScore     => "Priority score",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Filter result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterResultStatus {
    Pass,
    Fail,
    /// The filter's precondition did not hold for its configuration.
    NotRun,
}

/// Outcome of running a single filter over a single entity.
/// Score is always within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterResult {
    filter_type: FilterType,
    status: FilterResultStatus,
    score: f32,
}

impl FilterResult {
    pub fn pass(filter_type: FilterType) -> Self {
        Self::with_score(filter_type, FilterResultStatus::Pass, 1.0)
    }

    pub fn fail(filter_type: FilterType) -> Self {
        Self::with_score(filter_type, FilterResultStatus::Fail, 0.0)
    }

    pub fn not_run(filter_type: FilterType) -> Self {
        Self::with_score(filter_type, FilterResultStatus::NotRun, 0.0)
    }

    /// Pass carrying a continuous value, e.g. a frequency score.
    pub fn pass_with_score(filter_type: FilterType, score: f32) -> Self {
        Self::with_score(filter_type, FilterResultStatus::Pass, score)
    }

    pub fn fail_with_score(filter_type: FilterType, score: f32) -> Self {
        Self::with_score(filter_type, FilterResultStatus::Fail, score)
    }

    fn with_score(filter_type: FilterType, status: FilterResultStatus, score: f32) -> Self {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
        Self { filter_type, status, score }
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    pub fn status(&self) -> FilterResultStatus {
        self.status
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn passed(&self) -> bool {
        self.status == FilterResultStatus::Pass
    }

    pub fn failed(&self) -> bool {
        self.status == FilterResultStatus::Fail
    }

    pub fn was_run(&self) -> bool {
        self.status != FilterResultStatus::NotRun
    }
}

// ---------------------------------------------------------------------------
// Per-entity accumulation
// ---------------------------------------------------------------------------

/// Insertion-ordered map of `FilterType -> FilterResult`, at most one entry
/// per type. Re-adding a type overwrites the stored result in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterResults {
    results: Vec<FilterResult>,
}

impl FilterResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a result. `NotRun` results leave no trace and return `false`.
    pub fn add(&mut self, result: FilterResult) -> bool {
        if !result.was_run() {
            return false;
        }
        match self
            .results
            .iter_mut()
            .find(|r| r.filter_type == result.filter_type)
        {
            Some(existing) => {
                trace!(filter = ?result.filter_type, "Overwriting stored filter result");
                *existing = result;
            }
            None => self.results.push(result),
        }
        true
    }

    pub fn get(&self, filter_type: FilterType) -> Option<&FilterResult> {
        self.results.iter().find(|r| r.filter_type == filter_type)
    }

    pub fn contains(&self, filter_type: FilterType) -> bool {
        self.get(filter_type).is_some()
    }

    pub fn passed_filter(&self, filter_type: FilterType) -> bool {
        self.get(filter_type).is_some_and(FilterResult::passed)
    }

    pub fn failed_filter(&self, filter_type: FilterType) -> bool {
        self.get(filter_type).is_some_and(FilterResult::failed)
    }

    /// True iff no stored result is a `Fail`.
    pub fn passed_filters(&self) -> bool {
        !self.results.iter().any(FilterResult::failed)
    }

    pub fn passed_filter_types(&self) -> Vec<FilterType> {
        self.results
            .iter()
            .filter(|r| r.passed())
            .map(FilterResult::filter_type)
            .collect()
    }

    pub fn failed_filter_types(&self) -> Vec<FilterType> {
        self.results
            .iter()
            .filter(|r| r.failed())
            .map(FilterResult::filter_type)
            .collect()
    }

    /// Stored filter types in insertion order.
    pub fn filter_types(&self) -> Vec<FilterType> {
        self.results.iter().map(FilterResult::filter_type).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// An entity (variant or gene) which accumulates filter results.
pub trait Filterable {
    fn filter_results(&self) -> &FilterResults;

    fn filter_results_mut(&mut self) -> &mut FilterResults;

    /// Short label used in log lines and error messages.
    fn label(&self) -> String;

    fn add_filter_result(&mut self, result: FilterResult) -> bool {
        self.filter_results_mut().add(result)
    }

    fn passed_filters(&self) -> bool {
        self.filter_results().passed_filters()
    }

    fn passed_filter(&self, filter_type: FilterType) -> bool {
        self.filter_results().passed_filter(filter_type)
    }

    fn failed_filter(&self, filter_type: FilterType) -> bool {
        self.filter_results().failed_filter(filter_type)
    }
}
