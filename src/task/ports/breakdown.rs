//! Port for the external service that splits a task into subtasks.
//!
//! The store never calls a provider. Callers request a plan and hand the
//! result to `TaskStore::apply_breakdown`.

use crate::task::domain::NewSubTask;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for breakdown requests.
pub type BreakdownResult<T> = Result<T, BreakdownError>;

/// Proposed decomposition of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownPlan {
    /// Proposed subtasks in suggested sequence.
    pub sub_tasks: Vec<NewSubTask>,
    /// Estimate for the whole task in minutes.
    pub total_estimated_minutes: u32,
}

impl BreakdownPlan {
    /// Creates a plan whose total is the sum of its subtask estimates.
    #[must_use]
    pub fn from_sub_tasks(sub_tasks: Vec<NewSubTask>) -> Self {
        let total_estimated_minutes = sub_tasks
            .iter()
            .fold(0_u32, |total, sub_task| total.saturating_add(sub_task.estimated_minutes));
        Self {
            sub_tasks,
            total_estimated_minutes,
        }
    }
}

/// Source of AI-generated task breakdowns.
#[async_trait]
pub trait BreakdownProvider: Send + Sync {
    /// Proposes subtasks for a task.
    ///
    /// # Errors
    ///
    /// Returns [`BreakdownError`] when the provider is unreachable or its
    /// response cannot be interpreted.
    async fn breakdown(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> BreakdownResult<BreakdownPlan>;
}

/// Errors returned by breakdown providers.
#[derive(Debug, Clone, Error)]
pub enum BreakdownError {
    /// The provider could not be reached.
    #[error("breakdown provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with something that is not a plan.
    #[error("malformed breakdown response: {0}")]
    MalformedResponse(String),

    /// Provider-specific failure.
    #[error("breakdown provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl BreakdownError {
    /// Wraps a provider-specific error.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
