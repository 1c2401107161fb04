//! Persistence port for the serialized store document.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Durable key-value slot storage for the store document.
///
/// Implementations treat the document as opaque text.
#[async_trait]
pub trait StatePersistence: Send + Sync {
    /// Loads the document stored under `slot`.
    ///
    /// Returns `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the backing store cannot be read.
    async fn load(&self, slot: &str) -> PersistenceResult<Option<String>>;

    /// Replaces the document stored under `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the backing store rejects the write.
    async fn save(&self, slot: &str, document: &str) -> PersistenceResult<()>;
}

/// Errors returned by persistence implementations.
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    /// The slot name cannot be mapped onto the backing store.
    #[error("invalid storage slot '{0}'")]
    InvalidSlot(String),

    /// The backing store refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Underlying I/O failure.
    #[error("persistence error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl PersistenceError {
    /// Wraps an underlying error.
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }
}
