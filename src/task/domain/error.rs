//! Error types for task domain parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The priority label is not one of the enumerated levels.
    #[error("unknown priority: {0}")]
    UnknownPriority(String),

    /// The session kind label is not recognised.
    #[error("unknown session kind: {0}")]
    UnknownSessionKind(String),
}
