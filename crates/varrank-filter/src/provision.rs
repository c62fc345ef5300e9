//! The "ensure annotation present" stage run before a filter evaluates.
//!
//! Presence is checked against the entity itself, never a local cache, so
//! two filters in one chain needing the same annotation trigger exactly one
//! fetch per entity.

use std::sync::Arc;

use tracing::debug;
use varrank_common::{FrequencySource, PathogenicitySource, Result, VariantRecord};

use crate::annotation_source::VariantAnnotationSource;
use crate::filter::Annotation;

/// Attaches a missing annotation to an entity.
pub trait Provision<T>: Send + Sync {
    /// Returns `true` when a fetch was made, `false` when the annotation was
    /// already present or does not apply to this entity.
    fn ensure(&self, annotation: Annotation, entity: &mut T) -> Result<bool>;
}

/// Provisions variant records from a [`VariantAnnotationSource`].
#[derive(Clone)]
pub struct AnnotationProvisioner {
    source: Arc<dyn VariantAnnotationSource>,
    frequency_sources: Vec<FrequencySource>,
    pathogenicity_sources: Vec<PathogenicitySource>,
}

impl AnnotationProvisioner {
    pub fn new(source: Arc<dyn VariantAnnotationSource>) -> Self {
        Self {
            source,
            frequency_sources: FrequencySource::all(),
            pathogenicity_sources: vec![
                PathogenicitySource::Polyphen,
                PathogenicitySource::MutationTaster,
                PathogenicitySource::Sift,
            ],
        }
    }

    pub fn with_frequency_sources(mut self, sources: Vec<FrequencySource>) -> Self {
        self.frequency_sources = sources;
        self
    }

    pub fn with_pathogenicity_sources(mut self, sources: Vec<PathogenicitySource>) -> Self {
        self.pathogenicity_sources = sources;
        self
    }

    pub fn frequency_sources(&self) -> &[FrequencySource] {
        &self.frequency_sources
    }

    pub fn pathogenicity_sources(&self) -> &[PathogenicitySource] {
        &self.pathogenicity_sources
    }
}

impl std::fmt::Debug for AnnotationProvisioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationProvisioner")
            .field("frequency_sources", &self.frequency_sources)
            .field("pathogenicity_sources", &self.pathogenicity_sources)
            .finish_non_exhaustive()
    }
}

impl Provision<VariantRecord> for AnnotationProvisioner {
    fn ensure(&self, annotation: Annotation, variant: &mut VariantRecord) -> Result<bool> {
        match annotation {
            Annotation::Frequency => {
                if variant.has_frequency_data() {
                    return Ok(false);
                }
                variant.require_lookup_fields()?;
                let data = self
                    .source
                    .fetch_frequency_data(variant, &self.frequency_sources)?;
                data.validate(&variant.key())?;
                debug!(variant = %variant.key(), max_freq = data.max_frequency(), "Fetched frequency data");
                variant.frequency_data = Some(data);
            }
            Annotation::Pathogenicity => {
                if variant.has_pathogenicity_data() {
                    return Ok(false);
                }
                variant.require_lookup_fields()?;
                let data = self
                    .source
                    .fetch_pathogenicity_data(variant, &self.pathogenicity_sources)?;
                data.validate(&variant.key())?;
                debug!(variant = %variant.key(), n = data.predicted_scores.len(), "Fetched pathogenicity data");
                variant.pathogenicity_data = Some(data);
            }
            Annotation::RegulatoryEffect => {
                if variant.has_regulatory_effect() || !variant.effect.needs_regulatory_check() {
                    return Ok(false);
                }
                variant.require_lookup_fields()?;
                let effect = self.source.fetch_regulatory_effect(variant)?;
                debug!(variant = %variant.key(), ?effect, "Fetched regulatory effect");
                variant.regulatory_effect = Some(effect);
            }
        }
        Ok(true)
    }
}
