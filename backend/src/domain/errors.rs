use thiserror::Error;

use crate::domain::validation::ValidationError;

/// Every way a domain operation can fail.
///
/// The REST layer maps each variant to exactly one status code, so services
/// never need to know about HTTP.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed, missing or out-of-range input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The payload points at an entity that does not exist
    #[error("{0}")]
    BadReference(String),

    /// The entity addressed by the request does not exist
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness rule would be broken
    #[error("{0}")]
    Conflict(String),

    /// The entity is in a state that does not allow the operation
    #[error("{0}")]
    InvalidState(String),

    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
