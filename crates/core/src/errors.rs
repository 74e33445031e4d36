use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::rfp::RfpId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed input: the request carries nothing to extract from.
    #[error("rfp `{0}` has no request text")]
    EmptyRequestText(RfpId),
    /// Malformed input: a pipeline run needs at least one catalog item.
    #[error("product catalog is empty")]
    EmptyCatalog,
    /// Programmer-error class: input shapes a caller cannot recover from
    /// except by fixing the data (negative price, malformed tier table).
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("configuration failure: {0}")]
    Configuration(#[from] ConfigError),
}
