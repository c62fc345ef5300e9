//! Scoring and ranking of filtered genes.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use varrank_common::{
    FilterResult, FilterType, FrequencySource, Gene, ModeOfInheritance, PriorityType, VariantEffect,
    VariantRecord,
};
use varrank_config::{FilterSettings, FilterStrategy};
use varrank_filter::{FilterChain, MockAnnotationSource};
use varrank_ranker::{rank_genes, rank_variants, GeneScorer};
use varrank_test_utils::{gene, init_test_tracing, variant};

const AD: ModeOfInheritance = ModeOfInheritance::AutosomalDominant;

fn rows(genes: &[Gene]) -> Vec<(String, ModeOfInheritance, f64, usize)> {
    rank_genes(genes)
        .iter()
        .map(|r| {
            (
                r.gene.symbol.clone(),
                r.score.mode_of_inheritance(),
                (r.score.combined_score() * 1000.0).round() / 1000.0,
                r.rank,
            )
        })
        .collect()
}

fn genes_with_failed_variant() -> Vec<Gene> {
    vec![
        gene("A", "1")
            .compatible_with(&[AD])
            .variant(variant("1", 100).effect(VariantEffect::StopGained).compatible_with(&[AD]).build())
            .variant(
                variant("1", 200)
                    .filter_result(FilterResult::fail(FilterType::Frequency))
                    .build(),
            )
            .build(),
        gene("B", "2")
            .compatible_with(&[AD])
            .priority(PriorityType::HiPhive, 0.8)
            .variant(variant("2", 300).effect(VariantEffect::FrameshiftVariant).compatible_with(&[AD]).build())
            .build(),
    ]
}

#[test]
fn failed_variant_gene_ranks_below_scored_genes() {
    init_test_tracing();
    let mut genes = genes_with_failed_variant();
    GeneScorer::new([AD]).score_genes(&mut genes);

    assert_eq!(
        rows(&genes),
        vec![
            ("A".to_string(), AD, 1.0, 1),
            ("B".to_string(), AD, 0.9, 2),
            ("A".to_string(), ModeOfInheritance::Any, 0.0, 3),
        ]
    );
}

#[test]
fn contributing_variant_rows_follow_gene_ranks() {
    let mut genes = genes_with_failed_variant();
    GeneScorer::new([AD]).score_genes(&mut genes);

    let ranked: Vec<(u64, usize)> = rank_variants(&genes, true)
        .iter()
        .map(|r| (r.variant.position, r.rank))
        .collect();
    assert_eq!(ranked, vec![(100, 1), (300, 2), (200, 3)]);
}

#[test]
fn best_variant_rows_surface_failed_variants_once() {
    let mut genes = genes_with_failed_variant();
    GeneScorer::new([AD]).score_genes(&mut genes);

    let ranked: Vec<(u64, ModeOfInheritance, usize)> = rank_variants(&genes, false)
        .iter()
        .map(|r| (r.variant.position, r.gene_score.mode_of_inheritance(), r.rank))
        .collect();
    assert_eq!(
        ranked,
        vec![(100, AD, 1), (300, AD, 2), (200, ModeOfInheritance::Any, 3)]
    );
}

#[test]
fn recessive_pair_shares_a_rank() {
    let ar = ModeOfInheritance::AutosomalRecessive;
    let mut genes = vec![
        gene("CFTR", "1080")
            .compatible_with(&[ar])
            .variant(variant("7", 1).effect(VariantEffect::StopGained).compatible_with(&[ar]).build())
            .variant(variant("7", 2).effect(VariantEffect::SpliceDonorVariant).compatible_with(&[ar]).build())
            .build(),
        gene("SHH", "6469")
            .compatible_with(&[ar])
            .variant(variant("7", 3).effect(VariantEffect::SynonymousVariant).compatible_with(&[ar]).build())
            .build(),
    ];
    GeneScorer::new([ar]).score_genes(&mut genes);

    let ranks: Vec<usize> = rank_variants(&genes, true).iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 1, 3]);

    let best: Vec<u64> = rank_variants(&genes, false).iter().map(|r| r.variant.position).collect();
    assert_eq!(best, vec![1, 3]);
}

#[test]
fn filter_score_rank_pipeline() {
    init_test_tracing();
    let settings = FilterSettings {
        strategy: FilterStrategy::Exhaustive,
        min_quality: Some(30.0),
        max_frequency_percent: Some(1.0),
        ..FilterSettings::default()
    };
    let chain = FilterChain::from_settings(&settings).unwrap();
    let provisioner = FilterChain::provisioner(&settings, Arc::new(MockAnnotationSource::new()));

    let variants: Vec<VariantRecord> = vec![
        variant("10", 1).gene("FGFR2", "2263").effect(VariantEffect::StopGained).build(),
        variant("10", 2).gene("FGFR2", "2263").quality(10.0).build(),
        variant("7", 3)
            .gene("SHH", "6469")
            .frequency(FrequencySource::GnomadGenomeAll, 5.0)
            .build(),
    ];
    let outcome = chain.run_variants(variants, &provisioner).unwrap();
    assert_eq!(outcome.passed.len(), 1);

    let mut genes: Vec<Gene> = vec![Gene::new("FGFR2", "2263"), Gene::new("SHH", "6469")];
    for v in outcome.passed.into_iter().chain(outcome.failed) {
        if let Some(g) = genes.iter_mut().find(|g| g.gene_id == v.gene_id) {
            g.add_variant(v);
        }
    }
    let outcome = chain.run_genes(genes).unwrap();
    let mut genes = outcome.passed;
    GeneScorer::default().score_genes(&mut genes);

    let ranked = rank_genes(&genes);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].gene.symbol, "FGFR2");
    assert_eq!(ranked[0].score.mode_of_inheritance(), ModeOfInheritance::Any);
    assert!((ranked[0].score.combined_score() - 1.0).abs() < 1e-9);
    assert_eq!(ranked[1].gene.symbol, "SHH");
    assert_eq!(ranked[1].score.combined_score(), 0.0);
}
