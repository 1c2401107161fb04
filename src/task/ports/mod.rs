//! Port contracts for the task store.
//!
//! Ports define infrastructure-agnostic interfaces the store and its callers
//! depend on.

pub mod breakdown;
pub mod persistence;

pub use breakdown::{BreakdownError, BreakdownPlan, BreakdownProvider, BreakdownResult};
pub use persistence::{PersistenceError, PersistenceResult, StatePersistence};
