//! varrank-config — Filter and ranking settings.
//!
//! Settings are resolved here, once, and handed to the filter chain
//! factory; the filtering and ranking crates never read files themselves.

pub mod error;
pub mod settings;

pub use error::{ConfigError, Result};
pub use settings::{
    FilterSettings, FilterStrategy, GenomicInterval, OutputSettings, PathogenicitySettings,
    PriorityScoreSettings,
};
