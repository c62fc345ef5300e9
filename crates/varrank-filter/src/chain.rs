//! Build filter chains from [`FilterSettings`].
//!
//! Variant filters are added in a fixed order, cheapest first, so that a
//! fail-fast run rejects on local fields before paying for an annotation
//! fetch: failed-variant, interval, gene-id, quality, variant-effect,
//! regulatory, known-variant, frequency, pathogenicity. Gene filters
//! follow as priority-score, inheritance.

use std::sync::Arc;

use tracing::info;
use varrank_common::{FilterType, Gene, Result, VariantRecord};
use varrank_config::{FilterSettings, FilterStrategy};

use crate::annotation_source::VariantAnnotationSource;
use crate::filter::{GeneFilter, VariantFilter};
use crate::filters::{
    FailedVariantFilter, FrequencyFilter, GeneIdFilter, InheritanceFilter, IntervalFilter,
    KnownVariantFilter, PathogenicityFilter, PriorityScoreFilter, QualityFilter,
    RegulatoryFeatureFilter, VariantEffectFilter,
};
use crate::provision::{AnnotationProvisioner, Provision};
use crate::report::{FilterReport, ReportBuilder};
use crate::runner::{FilterOutcome, FilterRunner};

#[derive(Debug)]
pub struct FilterChain {
    strategy: FilterStrategy,
    variant_filters: Vec<Box<VariantFilter>>,
    gene_filters: Vec<Box<GeneFilter>>,
}

impl FilterChain {
    pub fn new(
        strategy: FilterStrategy,
        variant_filters: Vec<Box<VariantFilter>>,
        gene_filters: Vec<Box<GeneFilter>>,
    ) -> Self {
        Self { strategy, variant_filters, gene_filters }
    }

    /// Construct every configured filter. Any out-of-range threshold is
    /// returned as `InvalidFilterConfig` before a chain exists.
    pub fn from_settings(settings: &FilterSettings) -> Result<Self> {
        let mut variant_filters: Vec<Box<VariantFilter>> = vec![];
        if settings.remove_failed_variants {
            variant_filters.push(Box::new(FailedVariantFilter));
        }
        if let Some(interval) = &settings.interval {
            variant_filters.push(Box::new(IntervalFilter::new(interval.clone())?));
        }
        if !settings.gene_ids.is_empty() {
            variant_filters.push(Box::new(GeneIdFilter::new(settings.gene_ids.iter().cloned())?));
        }
        if let Some(min_quality) = settings.min_quality {
            variant_filters.push(Box::new(QualityFilter::new(min_quality)?));
        }
        if !settings.remove_variant_effects.is_empty() {
            variant_filters.push(Box::new(VariantEffectFilter::new(
                settings.remove_variant_effects.iter().copied(),
            )?));
        }
        if settings.regulatory_filter {
            variant_filters.push(Box::new(RegulatoryFeatureFilter));
        }
        if settings.remove_known_variants {
            variant_filters.push(Box::new(KnownVariantFilter));
        }
        if let Some(max_frequency) = settings.max_frequency_percent {
            variant_filters.push(Box::new(FrequencyFilter::new(max_frequency)?));
        }
        if let Some(pathogenicity) = &settings.pathogenicity {
            variant_filters.push(Box::new(PathogenicityFilter::new(pathogenicity.keep_non_pathogenic)));
        }

        let mut gene_filters: Vec<Box<GeneFilter>> = vec![];
        if let Some(priority) = &settings.priority_score {
            gene_filters.push(Box::new(PriorityScoreFilter::new(
                priority.priority_type,
                priority.min_score,
            )?));
        }
        if !settings.inheritance_modes.is_empty() {
            gene_filters.push(Box::new(InheritanceFilter::new(
                settings.inheritance_modes.iter().copied(),
            )));
        }

        let chain = Self::new(settings.strategy, variant_filters, gene_filters);
        info!(
            strategy = ?chain.strategy,
            variant_filters = ?chain.variant_filter_types(),
            gene_filters = ?chain.gene_filter_types(),
            "Built filter chain"
        );
        Ok(chain)
    }

    /// A provisioner querying `source` for the sources named in `settings`.
    pub fn provisioner(
        settings: &FilterSettings,
        source: Arc<dyn VariantAnnotationSource>,
    ) -> AnnotationProvisioner {
        let provisioner = AnnotationProvisioner::new(source)
            .with_frequency_sources(settings.frequency_sources.clone());
        match &settings.pathogenicity {
            Some(pathogenicity) => provisioner.with_pathogenicity_sources(pathogenicity.sources.clone()),
            None => provisioner,
        }
    }

    pub fn strategy(&self) -> FilterStrategy {
        self.strategy
    }

    pub fn variant_filters(&self) -> &[Box<VariantFilter>] {
        &self.variant_filters
    }

    pub fn gene_filters(&self) -> &[Box<GeneFilter>] {
        &self.gene_filters
    }

    pub fn variant_filter_types(&self) -> Vec<FilterType> {
        self.variant_filters.iter().map(|f| f.filter_type()).collect()
    }

    pub fn gene_filter_types(&self) -> Vec<FilterType> {
        self.gene_filters.iter().map(|f| f.filter_type()).collect()
    }

    /// Every configured filter type, variant filters first.
    pub fn filter_types(&self) -> Vec<FilterType> {
        let mut types = self.variant_filter_types();
        types.extend(self.gene_filter_types());
        types
    }

    pub fn is_empty(&self) -> bool {
        self.variant_filters.is_empty() && self.gene_filters.is_empty()
    }

    /// Run the variant chain. Under fail-fast, failed variants come back in
    /// `failed` rather than being discarded so they can be reported on.
    pub fn run_variants(
        &self,
        variants: Vec<VariantRecord>,
        provisioner: &dyn Provision<VariantRecord>,
    ) -> Result<FilterOutcome<VariantRecord>> {
        FilterRunner::new(self.strategy)
            .with_provisioner(provisioner)
            .run_partitioned(&self.variant_filters, variants)
    }

    pub fn run_genes(&self, genes: Vec<Gene>) -> Result<FilterOutcome<Gene>> {
        FilterRunner::new(self.strategy).run_partitioned(&self.gene_filters, genes)
    }

    pub fn variant_reports<'a>(
        &self,
        variants: impl IntoIterator<Item = &'a VariantRecord>,
    ) -> Vec<FilterReport> {
        ReportBuilder::variant_reports(&self.variant_filters, variants)
    }

    pub fn gene_reports<'a>(&self, genes: impl IntoIterator<Item = &'a Gene>) -> Vec<FilterReport> {
        ReportBuilder::gene_reports(&self.gene_filters, genes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use varrank_common::{ModeOfInheritance, PathogenicitySource, PriorityType, VarrankError};
    use varrank_config::{PathogenicitySettings, PriorityScoreSettings};

    use crate::annotation_source::MockAnnotationSource;

    fn full_settings() -> FilterSettings {
        FilterSettings {
            remove_failed_variants: true,
            interval: Some("10:123256000-123256999".parse().unwrap()),
            gene_ids: vec!["FGFR2".to_string()],
            min_quality: Some(20.0),
            remove_variant_effects: vec![varrank_common::VariantEffect::IntronVariant],
            regulatory_filter: true,
            remove_known_variants: true,
            max_frequency_percent: Some(1.0),
            pathogenicity: Some(PathogenicitySettings::default()),
            inheritance_modes: vec![ModeOfInheritance::AutosomalDominant],
            priority_score: Some(PriorityScoreSettings {
                priority_type: PriorityType::HiPhive,
                min_score: 0.501,
            }),
            ..FilterSettings::default()
        }
    }

    #[test]
    fn test_canonical_order() {
        let chain = FilterChain::from_settings(&full_settings()).unwrap();
        assert_eq!(
            chain.variant_filter_types(),
            vec![
                FilterType::FailedVariant,
                FilterType::Interval,
                FilterType::GeneId,
                FilterType::Quality,
                FilterType::VariantEffect,
                FilterType::RegulatoryFeature,
                FilterType::KnownVariant,
                FilterType::Frequency,
                FilterType::Pathogenicity,
            ]
        );
        assert_eq!(
            chain.gene_filter_types(),
            vec![FilterType::PriorityScore, FilterType::Inheritance]
        );
        assert_eq!(chain.filter_types().len(), 11);
    }

    #[test]
    fn test_default_settings_build_empty_chain() {
        let chain = FilterChain::from_settings(&FilterSettings::default()).unwrap();
        assert!(chain.is_empty());
        assert_eq!(chain.strategy(), FilterStrategy::FailFast);
    }

    #[test]
    fn test_invalid_threshold_fails_construction() {
        let settings = FilterSettings {
            max_frequency_percent: Some(120.0),
            ..FilterSettings::default()
        };
        assert!(matches!(
            FilterChain::from_settings(&settings),
            Err(VarrankError::InvalidFilterConfig { filter: FilterType::Frequency, .. })
        ));
    }

    #[test]
    fn test_provisioner_uses_configured_sources() {
        let settings = FilterSettings {
            pathogenicity: Some(PathogenicitySettings {
                keep_non_pathogenic: false,
                sources: vec![PathogenicitySource::Revel],
            }),
            ..FilterSettings::default()
        };
        let provisioner = FilterChain::provisioner(&settings, Arc::new(MockAnnotationSource::new()));
        assert_eq!(provisioner.pathogenicity_sources(), &[PathogenicitySource::Revel]);
        assert_eq!(provisioner.frequency_sources(), settings.frequency_sources.as_slice());
    }
}
