//! Ranked gene and variant rows.
//!
//! Rows are derived from scored genes on demand and borrow from them; they
//! are never stored.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;
use varrank_common::{Filterable, Gene, GeneScore, VariantRecord};
use varrank_config::OutputSettings;

use crate::score_ranker::ScoreRanker;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGene<'a> {
    pub rank: usize,
    pub gene: &'a Gene,
    pub score: &'a GeneScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedVariant<'a> {
    pub rank: usize,
    pub variant: &'a VariantRecord,
    pub gene_score: &'a GeneScore,
}

/// Every gene score of every gene, best combined score first.
///
/// Equal scores keep gene symbol order, then the order scores were added.
pub fn rank_genes(genes: &[Gene]) -> Vec<RankedGene<'_>> {
    let mut rows: Vec<(&Gene, &GeneScore)> = genes
        .iter()
        .flat_map(|gene| gene.gene_scores().iter().map(move |score| (gene, score)))
        .collect();
    rows.sort_by(|a, b| by_combined_score(a, b));

    let mut ranker = ScoreRanker::new();
    let ranked: Vec<RankedGene<'_>> = rows
        .into_iter()
        .map(|(gene, score)| RankedGene {
            rank: ranker.rank(score.combined_score()),
            gene,
            score,
        })
        .collect();
    debug!(n = ranked.len(), "Ranked gene scores");
    ranked
}

/// One or more variant rows per gene score, in gene rank order.
///
/// With `contributing_only` each score lists the variants behind it;
/// otherwise the single best surviving variant compatible with the score's
/// mode. Scores built from failed variants list their first failed variant
/// instead, as does any score with no surviving variant. Rows inherit
/// their gene score, so variants of one score share a rank.
pub fn rank_variants(genes: &[Gene], contributing_only: bool) -> Vec<RankedVariant<'_>> {
    let mut ranker = ScoreRanker::new();
    let mut rows = vec![];
    for ranked_gene in rank_genes(genes) {
        let gene_score = ranked_gene.score;
        let variants: Vec<&VariantRecord> = if contributing_only {
            gene_score.contributing_variants().iter().collect()
        } else {
            best_variant(ranked_gene.gene, gene_score).into_iter().collect()
        };
        for variant in variants {
            rows.push(RankedVariant {
                rank: ranker.rank(gene_score.combined_score()),
                variant,
                gene_score,
            });
        }
    }
    debug!(n = rows.len(), contributing_only, "Ranked variants");
    rows
}

/// [`rank_variants`] with the selection taken from output settings.
pub fn rank_variants_for_output<'a>(genes: &'a [Gene], output: &OutputSettings) -> Vec<RankedVariant<'a>> {
    rank_variants(genes, output.contributing_variants_only)
}

fn best_variant<'a>(gene: &'a Gene, score: &'a GeneScore) -> Option<&'a VariantRecord> {
    let contributing = score.contributing_variants();
    if !contributing.is_empty() && contributing.iter().all(|v| !v.passed_filters()) {
        return contributing.first();
    }
    let mode = score.mode_of_inheritance();
    let mut best: Option<&VariantRecord> = None;
    for variant in gene
        .variants
        .iter()
        .filter(|v| v.passed_filters() && v.is_compatible_with(mode))
    {
        if best.map_or(true, |b| variant.variant_score() > b.variant_score()) {
            best = Some(variant);
        }
    }
    best.or_else(|| score.contributing_variants().first())
}

fn by_combined_score(a: &(&Gene, &GeneScore), b: &(&Gene, &GeneScore)) -> Ordering {
    b.1.combined_score()
        .total_cmp(&a.1.combined_score())
        .then_with(|| a.0.symbol.cmp(&b.0.symbol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use varrank_common::ModeOfInheritance;
    use varrank_test_utils::{gene, variant};

    fn scored(symbol: &str, scores: &[(ModeOfInheritance, f64)]) -> Gene {
        let mut g = gene(symbol, symbol).build();
        for &(mode, combined) in scores {
            g.add_gene_score(GeneScore::builder(symbol, symbol, mode).combined_score(combined).build());
        }
        g
    }

    #[test]
    fn test_rows_sorted_and_ranked() {
        let genes = vec![
            scored("B", &[(ModeOfInheritance::AutosomalDominant, 0.5)]),
            scored(
                "A",
                &[
                    (ModeOfInheritance::AutosomalDominant, 0.5),
                    (ModeOfInheritance::AutosomalRecessive, 0.7),
                ],
            ),
            scored("C", &[(ModeOfInheritance::Any, 0.2)]),
        ];

        let rows: Vec<(usize, &str, f64)> = rank_genes(&genes)
            .iter()
            .map(|r| (r.rank, r.gene.symbol.as_str(), r.score.combined_score()))
            .collect();
        assert_eq!(rows, vec![(1, "A", 0.7), (2, "A", 0.5), (2, "B", 0.5), (4, "C", 0.2)]);
    }

    #[test]
    fn test_no_scores_no_rows() {
        let genes = vec![gene("A", "1").build()];
        assert!(rank_genes(&genes).is_empty());
        assert!(rank_variants(&genes, false).is_empty());
    }

    #[test]
    fn test_best_variant_falls_back_to_contributing() {
        let failed = variant("1", 5)
            .filter_result(varrank_common::FilterResult::fail(varrank_common::FilterType::Quality))
            .build();
        let mut g = gene("A", "1").variant(failed.clone()).build();
        g.add_gene_score(
            GeneScore::builder("A", "1", ModeOfInheritance::Any)
                .contributing_variants(vec![failed])
                .build(),
        );
        let genes = vec![g];
        let rows = rank_variants(&genes, false);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].variant.position, 5);
        assert_eq!(rows[0].rank, 1);
    }

    #[test]
    fn test_fallback_row_lists_failed_variant_not_passing_one() {
        let passing = variant("1", 10)
            .compatible_with(&[ModeOfInheritance::AutosomalDominant])
            .build();
        let failed = variant("1", 20)
            .filter_result(varrank_common::FilterResult::fail(varrank_common::FilterType::Frequency))
            .build();
        let mut g = gene("A", "1").variant(passing).variant(failed.clone()).build();
        g.add_gene_score(
            GeneScore::builder("A", "1", ModeOfInheritance::AutosomalDominant)
                .combined_score(0.8)
                .build(),
        );
        g.add_gene_score(
            GeneScore::builder("A", "1", ModeOfInheritance::Any)
                .contributing_variants(vec![failed])
                .build(),
        );
        let genes = vec![g];

        let rows: Vec<(u64, ModeOfInheritance)> = rank_variants(&genes, false)
            .iter()
            .map(|r| (r.variant.position, r.gene_score.mode_of_inheritance()))
            .collect();
        assert_eq!(
            rows,
            vec![(10, ModeOfInheritance::AutosomalDominant), (20, ModeOfInheritance::Any)]
        );
    }

    #[test]
    fn test_nan_scores_sort_without_panicking() {
        let genes = vec![
            scored("A", &[(ModeOfInheritance::AutosomalDominant, f64::NAN)]),
            scored("B", &[(ModeOfInheritance::AutosomalDominant, 0.4)]),
            scored("C", &[(ModeOfInheritance::AutosomalDominant, 0.9)]),
        ];
        let symbols: Vec<&str> = rank_genes(&genes).iter().map(|r| r.gene.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_output_settings_select_contributing_rows() {
        let first = variant("1", 1).build();
        let second = variant("1", 2).build();
        let mut g = gene("CFTR", "1080").variant(first.clone()).variant(second.clone()).build();
        g.add_gene_score(
            GeneScore::builder("CFTR", "1080", ModeOfInheritance::AutosomalRecessive)
                .combined_score(0.9)
                .contributing_variants(vec![first, second])
                .build(),
        );
        let genes = vec![g];

        let all = OutputSettings { contributing_variants_only: true };
        let best = OutputSettings { contributing_variants_only: false };
        assert_eq!(rank_variants_for_output(&genes, &all).len(), 2);
        assert_eq!(rank_variants_for_output(&genes, &best).len(), 1);
    }

    #[test]
    fn test_ranked_gene_serialises_rank_and_score() {
        let genes = vec![scored("FGFR2", &[(ModeOfInheritance::AutosomalDominant, 0.75)])];
        let ranked = rank_genes(&genes);
        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(json["rank"], 1);
        assert_eq!(json["gene"]["symbol"], "FGFR2");
        assert_eq!(json["score"]["mode_of_inheritance"], "autosomal_dominant");
        assert_eq!(json["score"]["combined_score"], 0.75);
    }
}
