use thiserror::Error;

use crate::filter_result::FilterType;

pub type Result<T> = std::result::Result<T, VarrankError>;

#[derive(Debug, Error)]
pub enum VarrankError {
    #[error("Invalid {filter:?} filter configuration: {reason}")]
    InvalidFilterConfig { filter: FilterType, reason: String },

    #[error("Required field '{field}' missing from {entity}")]
    MissingField { entity: String, field: &'static str },

    #[error("Malformed annotation for {entity}: {reason}")]
    MalformedAnnotation { entity: String, reason: String },

    #[error("Annotation source error: {0}")]
    AnnotationSource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VarrankError {
    pub fn invalid_config(filter: FilterType, reason: impl Into<String>) -> Self {
        VarrankError::InvalidFilterConfig {
            filter,
            reason: reason.into(),
        }
    }
}
