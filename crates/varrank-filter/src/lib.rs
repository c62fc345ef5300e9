//! varrank-filter — Filter evaluation engine.
//!
//! Concrete variant and gene filters, the annotation provisioning stage
//! that fetches missing data before a filter runs, the two runner
//! strategies, and report aggregation.

pub mod filter;
pub mod filters;
pub mod annotation_source;
pub mod provision;
pub mod runner;
pub mod report;
pub mod chain;

pub use filter::{Annotation, Filter, GeneFilter, VariantFilter};
pub use annotation_source::{MockAnnotationSource, VariantAnnotationSource};
pub use provision::{AnnotationProvisioner, Provision};
pub use runner::{FilterOutcome, FilterRunner, GeneFilterRunner, VariantFilterRunner};
pub use report::{FilterReport, ReportBuilder};
pub use chain::FilterChain;
pub use varrank_config::FilterStrategy;
