//! Application services for the task store.

mod refresh;
mod store;
mod writer;

pub use store::{StoreError, StoreResult, TaskStore};
