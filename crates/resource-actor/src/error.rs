//! # Framework Errors
//!
//! This module defines the common error types used throughout the actor framework.
//! Entity-specific errors travel boxed inside [`FrameworkError::EntityError`] and can be
//! recovered by the domain client with [`FrameworkError::downcast_entity`].

use std::path::PathBuf;

/// Errors raised by a persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Corrupt snapshot {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Snapshot already holds the highest possible ID {0}")]
    IdsExhausted(u32),
}

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("No IDs left to assign")]
    IdsExhausted,
}

impl FrameworkError {
    /// Recovers the concrete entity error, if this is an [`FrameworkError::EntityError`]
    /// carrying an `E`. Any other error is handed back unchanged.
    pub fn downcast_entity<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(e) => Ok(*e),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}
