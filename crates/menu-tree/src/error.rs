//! Tree and sync errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A move the tree rules reject
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("menu item {0} not found")]
    UnknownItem(String),
    #[error("group {0} cannot be placed inside another group")]
    NestedGroup(String),
    #[error("menu item {0} is not a group")]
    NotAGroup(String),
    #[error("menu item {0} cannot be dropped onto itself")]
    SelfTarget(String),
}

/// Failure reported by the reorder endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SyncError {
    /// Request never reached the service
    #[error("network error: {0}")]
    Network(String),
    /// Service answered with an error
    #[error("server rejected reorder: {0}")]
    Rejected(String),
    /// Response could not be decoded
    #[error("invalid response: {0}")]
    Decode(String),
}

impl SyncError {
    /// Text for the error notification
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Network(_) => "Could not save the new order: the server is unreachable.".to_string(),
            SyncError::Rejected(msg) => format!("Could not save the new order: {}", msg),
            SyncError::Decode(_) => "Could not save the new order: unexpected server response.".to_string(),
        }
    }
}
