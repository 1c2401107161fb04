//! Completion cascade from subtasks to their parent task.

use super::{SubTask, SubTaskId};

/// Recomputes a task's completed flag after one subtask changed.
///
/// The task is completed only when the changed subtask is now completed and
/// every other subtask already is. `sub_tasks` is the post-update list.
#[must_use]
pub fn task_completed_after_sub_task_change(
    sub_tasks: &[SubTask],
    changed: SubTaskId,
    completed: bool,
) -> bool {
    completed
        && sub_tasks
            .iter()
            .filter(|sub_task| sub_task.id() != changed)
            .all(SubTask::is_completed)
}
