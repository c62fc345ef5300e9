//! varrank-ranker — Gene scoring and tie-aware ranking.
//!
//! Turns filtered genes into per-mode gene scores, then into ranked gene
//! and variant rows using competition ranking.

pub mod score_ranker;
pub mod scorer;
pub mod ranked;

pub use score_ranker::{competition_ranks, ScoreRanker, DEFAULT_PRECISION};
pub use scorer::GeneScorer;
pub use ranked::{rank_genes, rank_variants, rank_variants_for_output, RankedGene, RankedVariant};
