//! Adapter implementations of the task store ports.

pub mod file;
pub mod memory;
