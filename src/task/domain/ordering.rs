//! Manual and priority ordering of the task collection.
//!
//! Only [`renumber_from_ids`] and [`sort_by_priority`] rewrite `order`.
//! [`display_order`] and [`TaskFilter`] are read-only views for consumers
//! that choose between manual and priority presentation.

use super::{Task, TaskId, priority_rank};
use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;

/// Assigns `order = position + 1` to each task named in `ordered_ids`.
///
/// Unknown identifiers are skipped but still occupy their position. Tasks
/// missing from `ordered_ids` keep their previous order. When an identifier
/// repeats, its first position wins. Returns whether any task was matched.
pub fn renumber_from_ids(tasks: &mut [Task], ordered_ids: &[TaskId]) -> bool {
    let mut positions: HashMap<TaskId, u32> = HashMap::with_capacity(ordered_ids.len());
    for (index, id) in ordered_ids.iter().enumerate() {
        positions.entry(*id).or_insert_with(|| position_to_order(index));
    }

    let mut matched = false;
    for task in tasks.iter_mut() {
        if let Some(order) = positions.get(&task.id()) {
            task.set_order(*order);
            matched = true;
        }
    }
    matched
}

/// Stably sorts tasks by priority rank and renumbers `order` as `1..=N`.
pub fn sort_by_priority(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| priority_rank(task.priority()));
    for (index, task) in tasks.iter_mut().enumerate() {
        task.set_order(position_to_order(index));
    }
}

fn position_to_order(index: usize) -> u32 {
    u32::try_from(index)
        .ok()
        .and_then(|position| position.checked_add(1))
        .unwrap_or(u32::MAX)
}

/// Completion filter applied by list views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskFilter {
    /// Every task.
    #[default]
    All,
    /// Tasks not yet completed.
    Active,
    /// Completed tasks.
    Completed,
}

impl TaskFilter {
    /// Returns whether `task` belongs in this view.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.is_completed(),
            Self::Completed => task.is_completed(),
        }
    }
}

/// Primary sort key chosen by the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Manual `order` only.
    #[default]
    Manual,
    /// Priority rank first, then manual `order`.
    Priority,
}

/// Returns the filtered tasks in display sequence without mutating them.
///
/// Ties on the active keys fall back to `order`, then newest `created_at`.
#[must_use]
pub fn display_order(tasks: &[Task], filter: TaskFilter, mode: SortMode) -> Vec<&Task> {
    let mut visible: Vec<&Task> = tasks.iter().filter(|task| filter.matches(task)).collect();
    visible.sort_by(|left, right| compare_for_display(left, right, mode));
    visible
}

fn compare_for_display(left: &Task, right: &Task, mode: SortMode) -> Ordering {
    let by_priority = match mode {
        SortMode::Manual => Ordering::Equal,
        SortMode::Priority => priority_rank(left.priority()).cmp(&priority_rank(right.priority())),
    };
    by_priority
        .then_with(|| left.order().cmp(&right.order()))
        .then_with(|| Reverse(left.created_at()).cmp(&Reverse(right.created_at())))
}
