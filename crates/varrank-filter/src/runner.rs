//! Filter runners: apply an ordered chain of filters to a collection of
//! entities using one of two strategies.
//!
//! - Exhaustive: every filter runs on every entity that was passing when
//!   the chain started, even after a failure. Nothing is removed.
//! - Fail-fast: per entity, stop at the first failure (skipping any
//!   annotation fetches later filters would need), then drop failed
//!   entities. Stored results are always a prefix of the chain.

use tracing::{debug, info};
use varrank_common::{FilterResult, Filterable, Gene, Result, VariantRecord};
use varrank_config::FilterStrategy;

use crate::filter::Filter;
use crate::provision::Provision;

/// Entities split by their state after a run.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome<T> {
    pub passed: Vec<T>,
    pub failed: Vec<T>,
}

impl<T> FilterOutcome<T> {
    pub fn len(&self) -> usize {
        self.passed.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entities, passed first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.passed.iter().chain(self.failed.iter())
    }
}

pub struct FilterRunner<'p, T> {
    strategy: FilterStrategy,
    provisioner: Option<&'p dyn Provision<T>>,
}

pub type VariantFilterRunner<'p> = FilterRunner<'p, VariantRecord>;
pub type GeneFilterRunner<'p> = FilterRunner<'p, Gene>;

impl<'p, T: Filterable> FilterRunner<'p, T> {
    pub fn new(strategy: FilterStrategy) -> Self {
        Self { strategy, provisioner: None }
    }

    pub fn exhaustive() -> Self {
        Self::new(FilterStrategy::Exhaustive)
    }

    pub fn fail_fast() -> Self {
        Self::new(FilterStrategy::FailFast)
    }

    /// Fetch missing annotations through `provisioner` before each filter
    /// that declares one. Without a provisioner filters see whatever data
    /// the entities already carry.
    pub fn with_provisioner(mut self, provisioner: &'p dyn Provision<T>) -> Self {
        self.provisioner = Some(provisioner);
        self
    }

    pub fn strategy(&self) -> FilterStrategy {
        self.strategy
    }

    /// Run the chain over every entity.
    ///
    /// Exhaustive runs return all entities; fail-fast runs return only
    /// those still passing. The first error aborts the batch.
    pub fn run(&self, filters: &[Box<dyn Filter<T>>], entities: Vec<T>) -> Result<Vec<T>> {
        match self.strategy {
            FilterStrategy::Exhaustive => {
                let mut entities = entities;
                for entity in &mut entities {
                    self.run_entity(filters, entity)?;
                }
                info!(
                    strategy = ?self.strategy,
                    filters = filters.len(),
                    n = entities.len(),
                    passed = entities.iter().filter(|e| e.passed_filters()).count(),
                    "Filtered entities"
                );
                Ok(entities)
            }
            FilterStrategy::FailFast => {
                if filters.is_empty() {
                    return Ok(entities);
                }
                Ok(self.run_partitioned(filters, entities)?.passed)
            }
        }
    }

    /// Run the chain and split the entities by outcome, keeping the failed
    /// ones so they can still be reported on.
    pub fn run_partitioned(
        &self,
        filters: &[Box<dyn Filter<T>>],
        entities: Vec<T>,
    ) -> Result<FilterOutcome<T>> {
        let mut outcome = FilterOutcome {
            passed: Vec::with_capacity(entities.len()),
            failed: vec![],
        };
        for mut entity in entities {
            self.run_entity(filters, &mut entity)?;
            if entity.passed_filters() {
                outcome.passed.push(entity);
            } else {
                outcome.failed.push(entity);
            }
        }
        info!(
            strategy = ?self.strategy,
            filters = filters.len(),
            passed = outcome.passed.len(),
            failed = outcome.failed.len(),
            "Filtered entities"
        );
        Ok(outcome)
    }

    /// Run the chain over a single entity in place.
    ///
    /// Entities already failing when the chain starts are left untouched.
    /// Callers may partition a collection across threads and call this per
    /// entity, as filters share no mutable state.
    pub fn run_entity(&self, filters: &[Box<dyn Filter<T>>], entity: &mut T) -> Result<()> {
        if !entity.passed_filters() {
            debug!(entity = %entity.label(), "Skipping entity which already failed filtering");
            return Ok(());
        }
        for filter in filters {
            let result = self.apply(filter.as_ref(), entity)?;
            if result.failed() && self.strategy == FilterStrategy::FailFast {
                debug!(entity = %entity.label(), filter = ?result.filter_type(), "Failed, skipping remaining filters");
                break;
            }
        }
        Ok(())
    }

    /// Provision, evaluate, record.
    fn apply(&self, filter: &dyn Filter<T>, entity: &mut T) -> Result<FilterResult> {
        if let (Some(annotation), Some(provisioner)) = (filter.required_annotation(), self.provisioner) {
            provisioner.ensure(annotation, entity)?;
        }
        let result = filter.run_filter(entity);
        if !entity.add_filter_result(result) {
            debug!(entity = %entity.label(), filter = ?result.filter_type(), "Filter not run");
        }
        Ok(result)
    }
}
