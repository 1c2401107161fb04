//! Timer history and per-day productivity records.

use super::{SessionKind, TaskId, TimeBlockId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound of the productivity score.
pub const MAX_PRODUCTIVITY_SCORE: u8 = 100;

/// A recorded focus or break session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    id: TimeBlockId,
    #[serde(default)]
    task_id: Option<TaskId>,
    started_at: DateTime<Utc>,
    duration_minutes: u32,
    kind: SessionKind,
}

impl TimeBlock {
    /// Creates a time block with a fresh identifier.
    #[must_use]
    pub fn new(kind: SessionKind, started_at: DateTime<Utc>, duration_minutes: u32) -> Self {
        Self {
            id: TimeBlockId::new(),
            task_id: None,
            started_at,
            duration_minutes,
            kind,
        }
    }

    /// Links the block to the task it was spent on.
    #[must_use]
    pub const fn for_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Returns the block identifier.
    #[must_use]
    pub const fn id(&self) -> TimeBlockId {
        self.id
    }

    /// Returns the linked task, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    /// Returns the start time.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns the length in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Returns the session kind.
    #[must_use]
    pub const fn kind(&self) -> SessionKind {
        self.kind
    }
}

/// Productivity summary for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    date: NaiveDate,
    tasks_completed: u32,
    time_spent_minutes: u32,
    productivity_score: u8,
}

impl DailyStats {
    /// Creates a record, clamping the score to `0..=100`.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        tasks_completed: u32,
        time_spent_minutes: u32,
        productivity_score: u8,
    ) -> Self {
        Self {
            date,
            tasks_completed,
            time_spent_minutes,
            productivity_score: productivity_score.min(MAX_PRODUCTIVITY_SCORE),
        }
    }

    /// Returns the day this record summarises.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the number of tasks completed that day.
    #[must_use]
    pub const fn tasks_completed(&self) -> u32 {
        self.tasks_completed
    }

    /// Returns the minutes spent that day.
    #[must_use]
    pub const fn time_spent_minutes(&self) -> u32 {
        self.time_spent_minutes
    }

    /// Returns the productivity score in `0..=100`.
    #[must_use]
    pub const fn productivity_score(&self) -> u8 {
        self.productivity_score
    }
}
