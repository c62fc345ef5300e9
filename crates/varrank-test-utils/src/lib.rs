//! Record builders and logging setup shared by the varrank test suites.

use std::sync::Once;

use tracing_subscriber::EnvFilter;
use varrank_common::{
    ClinVarSignificance, FilterResult, Filterable, Frequency, FrequencyData, FrequencySource, Gene,
    ModeOfInheritance, PathogenicityData, PathogenicityScore, PathogenicitySource, PriorityType,
    VariantEffect, VariantRecord,
};

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness. Honours `RUST_LOG`.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with_test_writer()
            .try_init();
    });
}

// ── Variants ────────────────────────────────────────────────────────────────

/// Start a missense A>T variant with quality 100 at `chromosome:position`.
pub fn variant(chromosome: &str, position: u64) -> VariantBuilder {
    let mut record = VariantRecord::new(chromosome, position, "A", "T");
    record.quality = 100.0;
    record.effect = VariantEffect::MissenseVariant;
    VariantBuilder { record }
}

pub struct VariantBuilder {
    record: VariantRecord,
}

impl VariantBuilder {
    pub fn alleles(mut self, reference: &str, alternate: &str) -> Self {
        self.record.reference = reference.to_string();
        self.record.alternate = alternate.to_string();
        self
    }

    pub fn quality(mut self, quality: f64) -> Self {
        self.record.quality = quality;
        self
    }

    pub fn gene(mut self, symbol: &str, gene_id: &str) -> Self {
        self.record.gene_symbol = symbol.to_string();
        self.record.gene_id = gene_id.to_string();
        self
    }

    pub fn effect(mut self, effect: VariantEffect) -> Self {
        self.record.effect = effect;
        self
    }

    pub fn failed_vcf_filters(mut self) -> Self {
        self.record.passed_vcf_filters = false;
        self
    }

    /// Attach (or extend) frequency data.
    pub fn frequency(mut self, source: FrequencySource, percent: f32) -> Self {
        self.record
            .frequency_data
            .get_or_insert_with(FrequencyData::empty)
            .frequencies
            .push(Frequency::new(source, percent));
        self
    }

    pub fn rs_id(mut self, rs_id: &str) -> Self {
        self.record
            .frequency_data
            .get_or_insert_with(FrequencyData::empty)
            .rs_id = Some(rs_id.to_string());
        self
    }

    /// Mark the variant as already looked up and absent from every database.
    pub fn not_in_databases(mut self) -> Self {
        self.record.frequency_data = Some(FrequencyData::empty());
        self
    }

    /// Attach a normalised pathogenicity prediction.
    pub fn pathogenicity(mut self, source: PathogenicitySource, score: f32) -> Self {
        self.record
            .pathogenicity_data
            .get_or_insert_with(PathogenicityData::empty)
            .predicted_scores
            .push(PathogenicityScore { source, score });
        self
    }

    pub fn clinvar(mut self, significance: ClinVarSignificance) -> Self {
        self.record
            .pathogenicity_data
            .get_or_insert_with(PathogenicityData::empty)
            .clinvar = Some(significance);
        self
    }

    pub fn compatible_with(mut self, modes: &[ModeOfInheritance]) -> Self {
        self.record.compatible_modes = modes.to_vec();
        self
    }

    pub fn filter_result(mut self, result: FilterResult) -> Self {
        self.record.add_filter_result(result);
        self
    }

    pub fn build(self) -> VariantRecord {
        self.record
    }
}

// ── Genes ───────────────────────────────────────────────────────────────────

pub fn gene(symbol: &str, gene_id: &str) -> GeneBuilder {
    GeneBuilder {
        gene: Gene::new(symbol, gene_id),
    }
}

pub struct GeneBuilder {
    gene: Gene,
}

impl GeneBuilder {
    /// Add a variant, stamping it with this gene's symbol and id.
    pub fn variant(mut self, mut record: VariantRecord) -> Self {
        record.gene_symbol = self.gene.symbol.clone();
        record.gene_id = self.gene.gene_id.clone();
        self.gene.add_variant(record);
        self
    }

    pub fn priority(mut self, priority_type: PriorityType, score: f32) -> Self {
        self.gene.set_priority_score(priority_type, score);
        self
    }

    pub fn compatible_with(mut self, modes: &[ModeOfInheritance]) -> Self {
        self.gene.compatible_modes = modes.to_vec();
        self
    }

    pub fn filter_result(mut self, result: FilterResult) -> Self {
        self.gene.add_filter_result(result);
        self
    }

    pub fn build(self) -> Gene {
        self.gene
    }
}
