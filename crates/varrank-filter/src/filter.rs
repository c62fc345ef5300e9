//! The evaluation contract shared by variant and gene filters.

use std::fmt;

use varrank_common::{FilterResult, FilterType, Gene, VariantRecord};

/// Annotation a filter reads which may have to be fetched first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    Frequency,
    Pathogenicity,
    RegulatoryEffect,
}

/// A stateless predicate over one record type.
///
/// Implementations hold only their configuration, validated at
/// construction, so one instance can be shared across entities and
/// threads. `run_filter` never mutates; anything the filter needs that
/// an upstream collaborator supplies is named by `required_annotation`
/// and attached by the provisioning stage beforehand.
pub trait Filter<T>: fmt::Debug + Send + Sync {
    fn filter_type(&self) -> FilterType;

    fn run_filter(&self, entity: &T) -> FilterResult;

    fn required_annotation(&self) -> Option<Annotation> {
        None
    }

    /// Report lines describing how this filter was configured.
    fn report_messages(&self) -> Vec<String> {
        vec![]
    }
}

pub type VariantFilter = dyn Filter<VariantRecord>;
pub type GeneFilter = dyn Filter<Gene>;
