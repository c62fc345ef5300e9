//! Gene score computation.
//!
//! For each mode of inheritance a gene is compatible with:
//!
//! ```text
//! contributing = top-k passing variants compatible with the mode
//!                (k = 2 for recessive modes, 1 otherwise)
//! variant      = mean(variant_score(v) for v in contributing)
//! phenotype    = product of the gene's prioritiser scores
//! combined     = (variant + phenotype) / 2, or variant when unprioritised
//! ```
//!
//! Genes without any mode score, or carrying failed variants, also get a
//! zero-scored `Any` entry listing the failed variants, so they still
//! appear in ranked output.

use tracing::debug;
use varrank_common::{Filterable, Gene, GeneScore, ModeOfInheritance, VariantRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneScorer {
    modes: Vec<ModeOfInheritance>,
}

impl GeneScorer {
    /// Score under each defined mode in `modes`; under `Any` alone when
    /// none is defined.
    pub fn new(modes: impl IntoIterator<Item = ModeOfInheritance>) -> Self {
        let mut defined: Vec<ModeOfInheritance> = vec![];
        for mode in modes.into_iter().filter(ModeOfInheritance::is_defined) {
            if !defined.contains(&mode) {
                defined.push(mode);
            }
        }
        if defined.is_empty() {
            defined.push(ModeOfInheritance::Any);
        }
        Self { modes: defined }
    }

    pub fn modes(&self) -> &[ModeOfInheritance] {
        &self.modes
    }

    pub fn score_genes(&self, genes: &mut [Gene]) {
        for gene in genes.iter_mut() {
            self.score_gene(gene);
        }
        debug!(n = genes.len(), modes = ?self.modes, "Scored genes");
    }

    /// Add one score per compatible mode to `gene` and mark the variants
    /// behind each score as contributing to it.
    pub fn score_gene(&self, gene: &mut Gene) {
        let phenotype = gene.phenotype_score().map(f64::from);

        for &mode in &self.modes {
            if !gene.is_compatible_with(mode) {
                continue;
            }
            let contributing = top_variants(gene, mode);
            if contributing.is_empty() {
                continue;
            }
            for &i in &contributing {
                gene.variants[i].mark_contributing(mode);
            }
            let variants: Vec<VariantRecord> =
                contributing.iter().map(|&i| gene.variants[i].clone()).collect();
            let variant_score = variants.iter().map(|v| f64::from(v.variant_score())).sum::<f64>()
                / variants.len() as f64;
            let combined_score = match phenotype {
                Some(p) => (variant_score + p) / 2.0,
                None => variant_score,
            };
            debug!(
                gene = %gene.symbol,
                mode = %mode,
                variant_score,
                combined_score,
                n = variants.len(),
                "Gene score"
            );
            let score = GeneScore::builder(&gene.symbol, &gene.gene_id, mode)
                .variant_score(variant_score)
                .phenotype_score(phenotype.unwrap_or(0.0))
                .combined_score(combined_score)
                .contributing_variants(variants)
                .build();
            gene.add_gene_score(score);
        }

        let needs_fallback = gene.gene_scores().is_empty() || gene.has_failed_variants();
        if needs_fallback && gene.gene_score_for(ModeOfInheritance::Any).is_none() {
            let failed: Vec<VariantRecord> = gene.failed_variants().cloned().collect();
            let score = GeneScore::builder(&gene.symbol, &gene.gene_id, ModeOfInheritance::Any)
                .phenotype_score(phenotype.unwrap_or(0.0))
                .contributing_variants(failed)
                .build();
            gene.add_gene_score(score);
        }
    }
}

impl Default for GeneScorer {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Indices of the best passing variants compatible with `mode`, best first.
fn top_variants(gene: &Gene, mode: ModeOfInheritance) -> Vec<usize> {
    let mut candidates: Vec<(usize, f32)> = gene
        .variants
        .iter()
        .enumerate()
        .filter(|(_, v)| v.passed_filters() && v.is_compatible_with(mode))
        .map(|(i, v)| (i, v.variant_score()))
        .collect();
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates
        .into_iter()
        .take(mode.max_contributing_variants())
        .map(|(i, _)| i)
        .collect()
}
