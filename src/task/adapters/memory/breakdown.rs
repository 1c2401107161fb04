//! Breakdown provider that answers with a fixed plan.

use async_trait::async_trait;

use crate::task::ports::{BreakdownError, BreakdownPlan, BreakdownProvider, BreakdownResult};

/// Provider returning the same plan, or the same failure, for every task.
#[derive(Debug, Clone)]
pub struct CannedBreakdownProvider {
    outcome: Result<BreakdownPlan, String>,
}

impl CannedBreakdownProvider {
    /// Creates a provider that always proposes `plan`.
    #[must_use]
    pub const fn new(plan: BreakdownPlan) -> Self {
        Self { outcome: Ok(plan) }
    }

    /// Creates a provider that always reports itself unavailable.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
        }
    }
}

#[async_trait]
impl BreakdownProvider for CannedBreakdownProvider {
    async fn breakdown(
        &self,
        _title: &str,
        _description: Option<&str>,
    ) -> BreakdownResult<BreakdownPlan> {
        self.outcome
            .clone()
            .map_err(BreakdownError::Unavailable)
    }
}
