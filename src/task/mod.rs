//! Task and priority state engine.
//!
//! The engine holds the authoritative collection of tasks and their
//! subtasks, scores priorities, reconciles manual and priority ordering, and
//! persists its whole state after every change. It follows hexagonal
//! architecture:
//!
//! - Domain types and pure algorithms in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The task store in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
