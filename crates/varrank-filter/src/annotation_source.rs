//! Trait for variant annotation data access.
//!
//! Provides an abstraction over frequency, pathogenicity and regulatory
//! feature databases, so filters can be provisioned on demand without being
//! coupled to how (or where) the data is stored.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use varrank_common::{
    FrequencyData, FrequencySource, PathogenicityData, PathogenicitySource, Result, VarrankError,
    VariantEffect, VariantRecord,
};

/// Trait for looking up annotations of a single variant.
///
/// Implementations can use:
/// - Local tabix/MVStore indexes
/// - A remote annotation service
/// - Mock data (testing)
///
/// Queries must be idempotent. Failures are returned as-is; no retry is
/// attempted by the caller.
pub trait VariantAnnotationSource: Send + Sync {
    /// Frequencies from the requested sources plus any dbSNP rsID.
    /// A variant absent from every source yields empty data, not an error.
    fn fetch_frequency_data(
        &self,
        variant: &VariantRecord,
        sources: &[FrequencySource],
    ) -> Result<FrequencyData>;

    /// Predictions from the requested sources plus any ClinVar assertion.
    fn fetch_pathogenicity_data(
        &self,
        variant: &VariantRecord,
        sources: &[PathogenicitySource],
    ) -> Result<PathogenicityData>;

    /// Effect after overlaying regulatory features; the variant's own
    /// effect when it overlaps none.
    fn fetch_regulatory_effect(&self, variant: &VariantRecord) -> Result<VariantEffect>;
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Mock source with hardcoded data keyed by `VariantRecord::key()`.
/// Counts every call so tests can assert on fetch behaviour.
#[derive(Debug, Default)]
pub struct MockAnnotationSource {
    frequencies: HashMap<String, FrequencyData>,
    pathogenicities: HashMap<String, PathogenicityData>,
    regulatory_effects: HashMap<String, VariantEffect>,
    failing: Vec<String>,
    frequency_calls: AtomicUsize,
    pathogenicity_calls: AtomicUsize,
    regulatory_calls: AtomicUsize,
}

impl MockAnnotationSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frequency(mut self, key: &str, data: FrequencyData) -> Self {
        self.frequencies.insert(key.to_string(), data);
        self
    }

    pub fn with_pathogenicity(mut self, key: &str, data: PathogenicityData) -> Self {
        self.pathogenicities.insert(key.to_string(), data);
        self
    }

    pub fn with_regulatory_effect(mut self, key: &str, effect: VariantEffect) -> Self {
        self.regulatory_effects.insert(key.to_string(), effect);
        self
    }

    /// Every lookup for this variant returns an `AnnotationSource` error.
    pub fn failing_for(mut self, key: &str) -> Self {
        self.failing.push(key.to_string());
        self
    }

    pub fn frequency_calls(&self) -> usize {
        self.frequency_calls.load(Ordering::SeqCst)
    }

    pub fn pathogenicity_calls(&self) -> usize {
        self.pathogenicity_calls.load(Ordering::SeqCst)
    }

    pub fn regulatory_calls(&self) -> usize {
        self.regulatory_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self, key: &str) -> Result<()> {
        if self.failing.iter().any(|k| k == key) {
            return Err(VarrankError::AnnotationSource(format!("lookup failed for {key}")));
        }
        Ok(())
    }
}

impl VariantAnnotationSource for MockAnnotationSource {
    fn fetch_frequency_data(
        &self,
        variant: &VariantRecord,
        sources: &[FrequencySource],
    ) -> Result<FrequencyData> {
        self.frequency_calls.fetch_add(1, Ordering::SeqCst);
        let key = variant.key();
        self.check_failure(&key)?;
        Ok(self
            .frequencies
            .get(&key)
            .map(|data| FrequencyData {
                rs_id: data.rs_id.clone(),
                frequencies: data
                    .frequencies
                    .iter()
                    .filter(|f| sources.contains(&f.source))
                    .copied()
                    .collect(),
            })
            .unwrap_or_default())
    }

    fn fetch_pathogenicity_data(
        &self,
        variant: &VariantRecord,
        sources: &[PathogenicitySource],
    ) -> Result<PathogenicityData> {
        self.pathogenicity_calls.fetch_add(1, Ordering::SeqCst);
        let key = variant.key();
        self.check_failure(&key)?;
        Ok(self
            .pathogenicities
            .get(&key)
            .map(|data| PathogenicityData {
                predicted_scores: data
                    .predicted_scores
                    .iter()
                    .filter(|s| sources.contains(&s.source))
                    .copied()
                    .collect(),
                clinvar: data.clinvar,
            })
            .unwrap_or_default())
    }

    fn fetch_regulatory_effect(&self, variant: &VariantRecord) -> Result<VariantEffect> {
        self.regulatory_calls.fetch_add(1, Ordering::SeqCst);
        let key = variant.key();
        self.check_failure(&key)?;
        Ok(self
            .regulatory_effects
            .get(&key)
            .copied()
            .unwrap_or(variant.effect))
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
