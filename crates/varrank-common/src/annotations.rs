//! Annotation value types attached to variant records.
//! Frequency and pathogenicity data are supplied by an external annotation
//! source; variant effects come from upstream effect annotation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VarrankError};

// ---------------------------------------------------------------------------
// Allele frequency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencySource {
    ThousandGenomes,
    TopMed,
    Uk10k,
    EspAll,
    ExacAll,
    GnomadExomeAll,
    GnomadGenomeAll,
    Local,
}

impl FrequencySource {
    pub fn all() -> Vec<FrequencySource> {
        vec![
            FrequencySource::ThousandGenomes,
            FrequencySource::TopMed,
            FrequencySource::Uk10k,
            FrequencySource::EspAll,
            FrequencySource::ExacAll,
            FrequencySource::GnomadExomeAll,
            FrequencySource::GnomadGenomeAll,
            FrequencySource::Local,
        ]
    }
}

/// Allele frequency in percent (0–100) observed in one population source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    pub source: FrequencySource,
    pub percent: f32,
}

impl Frequency {
    pub fn new(source: FrequencySource, percent: f32) -> Self {
        Self { source, percent }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyData {
    pub rs_id: Option<String>,
    pub frequencies: Vec<Frequency>,
}

impl FrequencyData {
    /// Data for a variant absent from every queried database.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(rs_id: Option<String>, frequencies: Vec<Frequency>) -> Self {
        Self { rs_id, frequencies }
    }

    /// Highest frequency (percent) over all sources; 0.0 when none observed.
    pub fn max_frequency(&self) -> f32 {
        self.frequencies
            .iter()
            .map(|f| f.percent)
            .fold(0.0, f32::max)
    }

    pub fn has_dbsnp_rs_id(&self) -> bool {
        self.rs_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub fn has_known_frequency(&self) -> bool {
        !self.frequencies.is_empty()
    }

    pub fn is_represented_in_database(&self) -> bool {
        self.has_dbsnp_rs_id() || self.has_known_frequency()
    }

    /// Rarity score in [0, 1]: 1.0 for unobserved variants, falling off
    /// exponentially and reaching 0.0 above 2%.
    pub fn score(&self) -> f32 {
        let max_freq = self.max_frequency();
        if max_freq <= 0.0 {
            1.0
        } else if max_freq > 2.0 {
            0.0
        } else {
            (1.13533 - 0.13533 * max_freq.exp()).clamp(0.0, 1.0)
        }
    }

    /// Reject frequencies outside [0, 100].
    pub fn validate(&self, entity: &str) -> Result<()> {
        match self
            .frequencies
            .iter()
            .find(|f| !(0.0..=100.0).contains(&f.percent))
        {
            Some(bad) => Err(VarrankError::MalformedAnnotation {
                entity: entity.to_string(),
                reason: format!("{:?} frequency {} is outside [0, 100]", bad.source, bad.percent),
            }),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Pathogenicity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathogenicitySource {
    Polyphen,
    MutationTaster,
    Sift,
    Cadd,
    Remm,
    Revel,
}

impl PathogenicitySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathogenicitySource::Polyphen       => "polyphen",
            PathogenicitySource::MutationTaster => "mutation_taster",
            PathogenicitySource::Sift           => "sift",
            PathogenicitySource::Cadd           => "cadd",
            PathogenicitySource::Remm           => "remm",
            PathogenicitySource::Revel          => "revel",
        }
    }
}

impl fmt::Display for PathogenicitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A predicted pathogenicity score normalised to [0, 1], higher = more damaging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathogenicityScore {
    pub source: PathogenicitySource,
    pub score: f32,
}

impl PathogenicityScore {
    /// Normalise a raw predictor output.
    ///
    /// SIFT is inverted (low = damaging) and CADD arrives as a PHRED-scaled
    /// value; every other predictor is already in [0, 1].
    pub fn from_raw(source: PathogenicitySource, raw: f32) -> Result<Self> {
        let malformed = |reason: String| VarrankError::MalformedAnnotation {
            entity: format!("{source} score"),
            reason,
        };
        if raw.is_nan() {
            return Err(malformed("score is NaN".to_string()));
        }
        let score = match source {
            PathogenicitySource::Cadd => {
                if raw < 0.0 {
                    return Err(malformed(format!("negative PHRED value {raw}")));
                }
                1.0 - 10f32.powf(-raw / 10.0)
            }
            _ if !(0.0..=1.0).contains(&raw) => {
                return Err(malformed(format!("raw value {raw} is outside [0, 1]")));
            }
            PathogenicitySource::Sift => 1.0 - raw,
            _ => raw,
        };
        Ok(Self { source, score })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinVarSignificance {
    Pathogenic,
    LikelyPathogenic,
    UncertainSignificance,
    LikelyBenign,
    Benign,
    NotProvided,
}

impl ClinVarSignificance {
    pub fn is_pathogenic_or_likely(&self) -> bool {
        matches!(self, ClinVarSignificance::Pathogenic | ClinVarSignificance::LikelyPathogenic)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathogenicityData {
    pub predicted_scores: Vec<PathogenicityScore>,
    pub clinvar: Option<ClinVarSignificance>,
}

impl PathogenicityData {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(predicted_scores: Vec<PathogenicityScore>, clinvar: Option<ClinVarSignificance>) -> Self {
        Self { predicted_scores, clinvar }
    }

    pub fn has_predicted_score(&self) -> bool {
        !self.predicted_scores.is_empty()
    }

    /// Most damaging prediction over all sources.
    pub fn predicted_score(&self) -> Option<f32> {
        self.predicted_scores
            .iter()
            .map(|s| s.score)
            .reduce(f32::max)
    }

    pub fn is_clinvar_pathogenic(&self) -> bool {
        self.clinvar.is_some_and(|c| c.is_pathogenic_or_likely())
    }

    /// Reject predictions that are NaN or outside [0, 1].
    pub fn validate(&self, entity: &str) -> Result<()> {
        match self
            .predicted_scores
            .iter()
            .find(|s| !(0.0..=1.0).contains(&s.score))
        {
            Some(bad) => Err(VarrankError::MalformedAnnotation {
                entity: entity.to_string(),
                reason: format!("{} score {} is outside [0, 1]", bad.source, bad.score),
            }),
            None => Ok(()),
        }
    }

    /// Overall score: 1.0 for ClinVar (likely) pathogenic, else the best prediction.
    pub fn score(&self) -> f32 {
        if self.is_clinvar_pathogenic() {
            return 1.0;
        }
        self.predicted_score().unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Variant effect (Sequence Ontology terms)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantEffect {
    TranscriptAblation,
    SpliceAcceptorVariant,
    SpliceDonorVariant,
    StopGained,
    FrameshiftVariant,
    StopLost,
    StartLost,
    InframeInsertion,
    InframeDeletion,
    MissenseVariant,
    SpliceRegionVariant,
    SynonymousVariant,
    FivePrimeUtrVariant,
    ThreePrimeUtrVariant,
    NonCodingTranscriptExonVariant,
    IntronVariant,
    UpstreamGeneVariant,
    DownstreamGeneVariant,
    RegulatoryRegionVariant,
    IntergenicVariant,
    Unknown,
}

impl VariantEffect {
    /// Pathogenicity assumed for the effect alone, before any prediction.
    pub fn default_pathogenicity(&self) -> f32 {
        match self {
            VariantEffect::TranscriptAblation
            | VariantEffect::StopGained
            | VariantEffect::FrameshiftVariant
            | VariantEffect::SpliceAcceptorVariant
            | VariantEffect::SpliceDonorVariant
            | VariantEffect::StartLost
            | VariantEffect::StopLost => 1.0,
            VariantEffect::SpliceRegionVariant => 0.8,
            VariantEffect::InframeInsertion | VariantEffect::InframeDeletion => 0.6,
            VariantEffect::MissenseVariant => 0.6,
            VariantEffect::RegulatoryRegionVariant => 0.2,
            VariantEffect::SynonymousVariant => 0.1,
            _ => 0.0,
        }
    }

    /// Effects outside coding sequence and canonical splice sites.
    pub fn is_off_target(&self) -> bool {
        matches!(
            self,
            VariantEffect::SynonymousVariant
                | VariantEffect::FivePrimeUtrVariant
                | VariantEffect::ThreePrimeUtrVariant
                | VariantEffect::NonCodingTranscriptExonVariant
                | VariantEffect::IntronVariant
                | VariantEffect::UpstreamGeneVariant
                | VariantEffect::DownstreamGeneVariant
                | VariantEffect::IntergenicVariant
                | VariantEffect::Unknown
        )
    }

    /// Effects which may be re-classified once regulatory features are known.
    pub fn needs_regulatory_check(&self) -> bool {
        matches!(self, VariantEffect::IntergenicVariant | VariantEffect::UpstreamGeneVariant)
    }
}
