//! Domain model for the task and priority state engine.
//!
//! Tasks own their subtasks, carry a manual `order` and a derived or
//! overridden [`Priority`], and cascade completion to and from subtasks.
//! Everything here is synchronous and free of infrastructure concerns.

pub mod completion;
mod error;
mod ids;
pub mod ordering;
mod pomodoro;
mod priority;
pub mod scoring;
mod state;
mod stats;
mod task;

pub use error::TaskDomainError;
pub use ids::{SubTaskId, TaskId, TimeBlockId};
pub use ordering::{SortMode, TaskFilter, display_order};
pub use pomodoro::{PomodoroSettings, SessionKind};
pub use priority::{Priority, UNSET_PRIORITY_RANK, priority_rank};
pub use state::StoreState;
pub use stats::{DailyStats, MAX_PRODUCTIVITY_SCORE, TimeBlock};
pub use task::{NewSubTask, NewTask, SubTask, SubTaskPatch, Task, TaskPatch};
