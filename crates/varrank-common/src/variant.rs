use serde::{Deserialize, Serialize};

use crate::annotations::{FrequencyData, PathogenicityData, VariantEffect};
use crate::error::{Result, VarrankError};
use crate::filter_result::{FilterResults, Filterable};
use crate::inheritance::ModeOfInheritance;

/// A called, effect-annotated sequence variant.
///
/// Frequency, pathogenicity and regulatory annotations start out absent and
/// are attached on demand by the provisioning stage of a filter chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRecord {
    pub chromosome: String,
    /// 1-based start position.
    pub position: u64,
    pub reference: String,
    pub alternate: String,
    pub quality: f64,
    /// Whether the VCF FILTER column was PASS or '.'.
    pub passed_vcf_filters: bool,
    pub gene_symbol: String,
    pub gene_id: String,
    pub effect: VariantEffect,
    pub frequency_data: Option<FrequencyData>,
    pub pathogenicity_data: Option<PathogenicityData>,
    /// Effect after regulatory re-classification, once looked up.
    pub regulatory_effect: Option<VariantEffect>,
    pub compatible_modes: Vec<ModeOfInheritance>,
    pub contributing_modes: Vec<ModeOfInheritance>,
    filter_results: FilterResults,
}

impl VariantRecord {
    pub fn new(
        chromosome: impl Into<String>,
        position: u64,
        reference: impl Into<String>,
        alternate: impl Into<String>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            position,
            reference: reference.into(),
            alternate: alternate.into(),
            quality: 0.0,
            passed_vcf_filters: true,
            gene_symbol: String::new(),
            gene_id: String::new(),
            effect: VariantEffect::Unknown,
            frequency_data: None,
            pathogenicity_data: None,
            regulatory_effect: None,
            compatible_modes: vec![],
            contributing_modes: vec![],
            filter_results: FilterResults::new(),
        }
    }

    /// `chromosome-position-ref-alt`
    pub fn key(&self) -> String {
        format!("{}-{}-{}-{}", self.chromosome, self.position, self.reference, self.alternate)
    }

    /// Fail with `MissingField` unless the record can be looked up in an
    /// annotation database.
    pub fn require_lookup_fields(&self) -> Result<()> {
        let missing = if self.chromosome.is_empty() {
            Some("chromosome")
        } else if self.position == 0 {
            Some("position")
        } else if self.reference.is_empty() {
            Some("reference")
        } else if self.alternate.is_empty() {
            Some("alternate")
        } else {
            None
        };
        match missing {
            Some(field) => Err(VarrankError::MissingField { entity: self.key(), field }),
            None => Ok(()),
        }
    }

    pub fn effective_effect(&self) -> VariantEffect {
        self.regulatory_effect.unwrap_or(self.effect)
    }

    pub fn has_frequency_data(&self) -> bool {
        self.frequency_data.is_some()
    }

    pub fn has_pathogenicity_data(&self) -> bool {
        self.pathogenicity_data.is_some()
    }

    pub fn has_regulatory_effect(&self) -> bool {
        self.regulatory_effect.is_some()
    }

    /// 1.0 when no frequency data has been attached.
    pub fn frequency_score(&self) -> f32 {
        self.frequency_data.as_ref().map_or(1.0, FrequencyData::score)
    }

    /// Missense variants are scored on their predictions when any exist;
    /// every other effect takes the larger of its default score and the
    /// annotated pathogenicity.
    pub fn pathogenicity_score(&self) -> f32 {
        let effect = self.effective_effect();
        let data = self.pathogenicity_data.as_ref();
        if effect == VariantEffect::MissenseVariant {
            if let Some(data) = data.filter(|d| d.has_predicted_score() || d.is_clinvar_pathogenic()) {
                return data.score();
            }
        }
        let predicted = data.map_or(0.0, PathogenicityData::score);
        effect.default_pathogenicity().max(predicted)
    }

    pub fn variant_score(&self) -> f32 {
        self.frequency_score() * self.pathogenicity_score()
    }

    pub fn is_compatible_with(&self, mode: ModeOfInheritance) -> bool {
        mode == ModeOfInheritance::Any || self.compatible_modes.contains(&mode)
    }

    pub fn is_contributing_to(&self, mode: ModeOfInheritance) -> bool {
        self.contributing_modes.contains(&mode)
    }

    pub fn mark_contributing(&mut self, mode: ModeOfInheritance) {
        if !self.contributing_modes.contains(&mode) {
            self.contributing_modes.push(mode);
        }
    }
}

impl Filterable for VariantRecord {
    fn filter_results(&self) -> &FilterResults {
        &self.filter_results
    }

    fn filter_results_mut(&mut self) -> &mut FilterResults {
        &mut self.filter_results
    }

    fn label(&self) -> String {
        self.key()
    }
}
