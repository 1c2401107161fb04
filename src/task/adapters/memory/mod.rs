//! In-memory adapters for tests and embedding.

mod breakdown;
mod persistence;

pub use breakdown::CannedBreakdownProvider;
pub use persistence::InMemoryStatePersistence;
