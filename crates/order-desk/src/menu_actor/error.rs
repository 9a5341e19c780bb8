//! Error types for the Menu actor.

use thiserror::Error;

/// Errors that can occur during menu operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    /// The requested menu item was not found.
    #[error("Menu item not found: {0}")]
    NotFound(String),

    /// A field of the submitted item is invalid.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The menu could not be written to storage.
    #[error("Menu database error: {0}")]
    DatabaseError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl MenuError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        MenuError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<String> for MenuError {
    fn from(msg: String) -> Self {
        MenuError::ActorCommunicationError(msg)
    }
}
