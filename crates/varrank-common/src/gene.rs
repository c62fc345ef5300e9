use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filter_result::{FilterResult, FilterResults, Filterable};
use crate::inheritance::ModeOfInheritance;
use crate::variant::VariantRecord;

// ---------------------------------------------------------------------------
// Prioritiser scores
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityType {
    HiPhive,
    Phive,
    Phenix,
    Omim,
    ExomeWalker,
}

// ---------------------------------------------------------------------------
// Gene
// ---------------------------------------------------------------------------

/// A gene together with the variants called in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    pub symbol: String,
    pub gene_id: String,
    pub variants: Vec<VariantRecord>,
    pub priority_scores: BTreeMap<PriorityType, f32>,
    /// Modes the gene's variant set is compatible with, from upstream
    /// inheritance analysis.
    pub compatible_modes: Vec<ModeOfInheritance>,
    gene_scores: Vec<GeneScore>,
    filter_results: FilterResults,
}

impl Gene {
    pub fn new(symbol: impl Into<String>, gene_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            gene_id: gene_id.into(),
            variants: vec![],
            priority_scores: BTreeMap::new(),
            compatible_modes: vec![],
            gene_scores: vec![],
            filter_results: FilterResults::new(),
        }
    }

    pub fn add_variant(&mut self, variant: VariantRecord) {
        self.variants.push(variant);
    }

    pub fn set_priority_score(&mut self, priority_type: PriorityType, score: f32) {
        self.priority_scores.insert(priority_type, score);
    }

    pub fn priority_score(&self, priority_type: PriorityType) -> Option<f32> {
        self.priority_scores.get(&priority_type).copied()
    }

    /// Product of all prioritiser scores, `None` when the gene was not prioritised.
    pub fn phenotype_score(&self) -> Option<f32> {
        if self.priority_scores.is_empty() {
            return None;
        }
        Some(self.priority_scores.values().product())
    }

    pub fn is_compatible_with(&self, mode: ModeOfInheritance) -> bool {
        mode == ModeOfInheritance::Any || self.compatible_modes.contains(&mode)
    }

    pub fn passed_variants(&self) -> impl Iterator<Item = &VariantRecord> {
        self.variants.iter().filter(|v| v.passed_filters())
    }

    pub fn failed_variants(&self) -> impl Iterator<Item = &VariantRecord> {
        self.variants.iter().filter(|v| !v.passed_filters())
    }

    pub fn has_passed_variants(&self) -> bool {
        self.passed_variants().next().is_some()
    }

    pub fn has_failed_variants(&self) -> bool {
        self.failed_variants().next().is_some()
    }

    pub fn gene_scores(&self) -> &[GeneScore] {
        &self.gene_scores
    }

    pub fn gene_score_for(&self, mode: ModeOfInheritance) -> Option<&GeneScore> {
        self.gene_scores
            .iter()
            .find(|s| s.mode_of_inheritance() == mode)
    }

    /// Record a score; one per mode, re-adding a mode replaces it.
    pub fn add_gene_score(&mut self, score: GeneScore) {
        match self
            .gene_scores
            .iter_mut()
            .find(|s| s.mode_of_inheritance() == score.mode_of_inheritance())
        {
            Some(existing) => *existing = score,
            None => self.gene_scores.push(score),
        }
    }
}

impl Filterable for Gene {
    fn filter_results(&self) -> &FilterResults {
        &self.filter_results
    }

    fn filter_results_mut(&mut self) -> &mut FilterResults {
        &mut self.filter_results
    }

    fn label(&self) -> String {
        self.symbol.clone()
    }

    /// Gene-level results are also recorded on every variant of the gene.
    fn add_filter_result(&mut self, result: FilterResult) -> bool {
        if !self.filter_results.add(result) {
            return false;
        }
        for variant in &mut self.variants {
            variant.add_filter_result(result);
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Gene score
// ---------------------------------------------------------------------------

/// Score of one gene under one mode of inheritance. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneScore {
    gene_symbol: String,
    gene_id: String,
    mode_of_inheritance: ModeOfInheritance,
    variant_score: f64,
    phenotype_score: f64,
    combined_score: f64,
    contributing_variants: Vec<VariantRecord>,
}

impl GeneScore {
    pub fn builder(
        gene_symbol: impl Into<String>,
        gene_id: impl Into<String>,
        mode_of_inheritance: ModeOfInheritance,
    ) -> GeneScoreBuilder {
        GeneScoreBuilder {
            score: GeneScore {
                gene_symbol: gene_symbol.into(),
                gene_id: gene_id.into(),
                mode_of_inheritance,
                variant_score: 0.0,
                phenotype_score: 0.0,
                combined_score: 0.0,
                contributing_variants: vec![],
            },
        }
    }

    pub fn gene_symbol(&self) -> &str {
        &self.gene_symbol
    }

    pub fn gene_id(&self) -> &str {
        &self.gene_id
    }

    pub fn mode_of_inheritance(&self) -> ModeOfInheritance {
        self.mode_of_inheritance
    }

    pub fn variant_score(&self) -> f64 {
        self.variant_score
    }

    pub fn phenotype_score(&self) -> f64 {
        self.phenotype_score
    }

    pub fn combined_score(&self) -> f64 {
        self.combined_score
    }

    pub fn contributing_variants(&self) -> &[VariantRecord] {
        &self.contributing_variants
    }
}

pub struct GeneScoreBuilder {
    score: GeneScore,
}

impl GeneScoreBuilder {
    pub fn variant_score(mut self, score: f64) -> Self {
        self.score.variant_score = score;
        self
    }

    pub fn phenotype_score(mut self, score: f64) -> Self {
        self.score.phenotype_score = score;
        self
    }

    pub fn combined_score(mut self, score: f64) -> Self {
        self.score.combined_score = score;
        self
    }

    pub fn contributing_variants(mut self, variants: Vec<VariantRecord>) -> Self {
        self.score.contributing_variants = variants;
        self
    }

    pub fn build(self) -> GeneScore {
        self.score
    }
}
