//! Automatic priority scoring.
//!
//! Scores accumulate from due-date urgency, size, decomposition, and
//! category, then map onto a [`Priority`] through [`Priority::from_points`].
//! Completed tasks short-circuit to [`Priority::Low`].

use super::{Priority, Task};
use chrono::{DateTime, TimeDelta, Utc};

/// Category label that earns the work bonus.
pub const WORK_CATEGORY: &str = "Work";

/// Returns the priority the scorer assigns to `task` at `now`.
#[must_use]
pub fn score(task: &Task, now: DateTime<Utc>) -> Priority {
    if task.is_completed() {
        return Priority::Low;
    }
    Priority::from_points(score_points(task, now))
}

/// Returns the raw urgency points for an incomplete task.
///
/// Completion is ignored here; [`score`] applies that rule.
#[must_use]
pub fn score_points(task: &Task, now: DateTime<Utc>) -> u32 {
    let due = task.due_date().map_or(0, |due_date| due_points(due_date, now));
    due + size_points(task.estimated_minutes())
        + decomposition_points(task.sub_tasks().len())
        + category_points(task.category())
}

// `ceil(remaining / 1 day) <= n` holds exactly when `remaining <= n days`,
// so past-due tasks land in the most urgent bucket.
fn due_points(due_date: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let remaining = due_date - now;
    if remaining <= TimeDelta::days(1) {
        5
    } else if remaining <= TimeDelta::days(3) {
        3
    } else if remaining <= TimeDelta::days(7) {
        1
    } else {
        0
    }
}

const fn size_points(estimated_minutes: u32) -> u32 {
    if estimated_minutes > 120 {
        2
    } else if estimated_minutes > 60 {
        1
    } else {
        0
    }
}

const fn decomposition_points(sub_task_count: usize) -> u32 {
    if sub_task_count > 3 {
        2
    } else if sub_task_count > 0 {
        1
    } else {
        0
    }
}

fn category_points(category: Option<&str>) -> u32 {
    if category == Some(WORK_CATEGORY) { 2 } else { 0 }
}
