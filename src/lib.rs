//! Focusboard: the task engine behind a personal productivity app.
//!
//! This crate owns the in-memory model of tasks, subtasks, ordering, and
//! priority for a task manager with a Pomodoro timer and daily analytics.
//! User interfaces, timers, and AI services sit outside and talk to the
//! engine through the task store's commands.
//!
//! # Architecture
//!
//! Focusboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and AI breakdowns
//! - **Adapters**: Concrete implementations of ports (memory, JSON files)
//!
//! # Modules
//!
//! - [`config`]: Store configuration
//! - [`task`]: Task model, priority scoring, ordering, and the task store

pub mod config;
pub mod task;
