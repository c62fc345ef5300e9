//! Filter chain and output settings.
//!
//! Users describe which filters to run via YAML, TOML or JSON. Thresholds
//! are range-checked later, by each filter's constructor, so a bad value
//! is reported before any variant is processed.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use varrank_common::{FrequencySource, ModeOfInheritance, PathogenicitySource, PriorityType, VariantEffect};

pub use varrank_common::GenomicInterval;

use crate::error::{ConfigError, Result};

/// How a filter chain is applied to a collection of entities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStrategy {
    /// Run every filter on every entity and keep all entities.
    Exhaustive,
    /// Stop at the first failure and drop failed entities.
    #[default]
    FailFast,
}

/// Complete filtering configuration for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    #[serde(default)]
    pub strategy: FilterStrategy,

    /// Remove variants whose VCF FILTER column was not PASS
    #[serde(default)]
    pub remove_failed_variants: bool,

    /// Restrict to a single genomic interval
    #[serde(default)]
    pub interval: Option<GenomicInterval>,

    /// Allow-list of gene identifiers or symbols
    #[serde(default)]
    pub gene_ids: Vec<String>,

    /// Minimum variant call quality (PHRED)
    #[serde(default)]
    pub min_quality: Option<f64>,

    /// Variant effects to remove
    #[serde(default)]
    pub remove_variant_effects: Vec<VariantEffect>,

    /// Remove intergenic/upstream variants outside regulatory features
    #[serde(default)]
    pub regulatory_filter: bool,

    /// Remove variants already present in a frequency database or dbSNP
    #[serde(default)]
    pub remove_known_variants: bool,

    /// Maximum allele frequency, in percent
    #[serde(default)]
    pub max_frequency_percent: Option<f32>,

    #[serde(default = "default_frequency_sources")]
    pub frequency_sources: Vec<FrequencySource>,

    #[serde(default)]
    pub pathogenicity: Option<PathogenicitySettings>,

    /// Modes of inheritance genes must be compatible with
    #[serde(default)]
    pub inheritance_modes: Vec<ModeOfInheritance>,

    #[serde(default)]
    pub priority_score: Option<PriorityScoreSettings>,

    #[serde(default)]
    pub output: OutputSettings,
}

fn default_frequency_sources() -> Vec<FrequencySource> {
    FrequencySource::all()
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            strategy: FilterStrategy::default(),
            remove_failed_variants: false,
            interval: None,
            gene_ids: vec![],
            min_quality: None,
            remove_variant_effects: vec![],
            regulatory_filter: false,
            remove_known_variants: false,
            max_frequency_percent: None,
            frequency_sources: default_frequency_sources(),
            pathogenicity: None,
            inheritance_modes: vec![],
            priority_score: None,
            output: OutputSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathogenicitySettings {
    /// Score variants without removing predicted-benign ones
    #[serde(default)]
    pub keep_non_pathogenic: bool,

    #[serde(default = "default_pathogenicity_sources")]
    pub sources: Vec<PathogenicitySource>,
}

fn default_pathogenicity_sources() -> Vec<PathogenicitySource> {
    vec![
        PathogenicitySource::Polyphen,
        PathogenicitySource::MutationTaster,
        PathogenicitySource::Sift,
    ]
}

impl Default for PathogenicitySettings {
    fn default() -> Self {
        Self {
            keep_non_pathogenic: false,
            sources: default_pathogenicity_sources(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityScoreSettings {
    pub priority_type: PriorityType,
    #[serde(default = "default_min_priority_score")]
    pub min_score: f32,
}

fn default_min_priority_score() -> f32 { 0.501 }

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Only list variants that contributed to their gene's score
    #[serde(default)]
    pub contributing_variants_only: bool,
}

impl FilterSettings {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a `.yml`/`.yaml`, `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let settings = match extension.as_str() {
            "yml" | "yaml" => Self::from_yaml_str(&content)?,
            "toml" => Self::from_toml_str(&content)?,
            "json" => Self::from_json_str(&content)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        info!(path = %path.display(), strategy = ?settings.strategy, "Loaded filter settings");
        Ok(settings)
    }

    /// Structural checks which don't belong to any single filter.
    pub fn validate(&self) -> Result<()> {
        if self.max_frequency_percent.is_some() && self.frequency_sources.is_empty() {
            return Err(ConfigError::Invalid {
                field: "frequency_sources",
                reason: "a frequency threshold needs at least one source".to_string(),
            });
        }
        if let Some(pathogenicity) = &self.pathogenicity {
            if pathogenicity.sources.is_empty() {
                return Err(ConfigError::Invalid {
                    field: "pathogenicity.sources",
                    reason: "at least one pathogenicity source is required".to_string(),
                });
            }
        }
        if let Some(interval) = &self.interval {
            if interval.is_empty() {
                return Err(ConfigError::Invalid {
                    field: "interval",
                    reason: format!("end precedes start in {interval}"),
                });
            }
        }
        Ok(())
    }
}
