//! Error types for the Order actor.

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order is not pending: it never existed or has already been completed.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order data provided is invalid.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The order could not be written to storage.
    #[error("Order database error: {0}")]
    DatabaseError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        OrderError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
