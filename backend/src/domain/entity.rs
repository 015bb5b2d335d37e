//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use menu_tree::TreeError;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TreeError> for DomainError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::UnknownItem(_) => DomainError::NotFound(err.to_string()),
            TreeError::NestedGroup(_) | TreeError::NotAGroup(_) | TreeError::SelfTarget(_) => {
                DomainError::InvalidInput(err.to_string())
            }
        }
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, msg) if code.code == rusqlite::ErrorCode::ConstraintViolation => {
                DomainError::Conflict(msg.unwrap_or_else(|| code.to_string()))
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}
