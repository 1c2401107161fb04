//! The complete persisted store document and its state transitions.
//!
//! Each transition returns `None` or `false` when the addressed task or
//! subtask does not exist, leaving the state untouched.

use super::{
    DailyStats, NewSubTask, NewTask, PomodoroSettings, Priority, SubTaskId, SubTaskPatch, Task,
    TaskId, TaskPatch, TimeBlock, ordering, scoring,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the task store owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreState {
    /// Task collection in insertion sequence.
    pub tasks: Vec<Task>,
    /// Recorded timer sessions.
    pub time_blocks: Vec<TimeBlock>,
    /// Append-only per-day summaries.
    pub daily_stats: Vec<DailyStats>,
    /// Timer configuration.
    pub pomodoro_settings: PomodoroSettings,
}

impl StoreState {
    /// Returns the task with the given identifier.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    fn edit_task(&mut self, id: TaskId, edit: impl FnOnce(&mut Task)) -> bool {
        let Some(task) = self.task_mut(id) else {
            return false;
        };
        edit(task);
        true
    }

    /// Returns the manual position a newly added task receives.
    #[must_use]
    pub fn next_order(&self) -> u32 {
        self.tasks
            .iter()
            .map(Task::order)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }

    /// Appends a new task and returns its identifier.
    pub fn add_task(&mut self, input: NewTask, now: DateTime<Utc>) -> TaskId {
        let task = Task::new(input, self.next_order(), now);
        let id = task.id();
        self.tasks.push(task);
        id
    }

    /// Shallow-merges a patch into a task.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> bool {
        self.edit_task(id, |task| task.apply_patch(patch))
    }

    /// Removes a task together with its subtasks.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        self.tasks.len() != before
    }

    /// Sets a task's completed flag and cascades it to every subtask.
    pub fn complete_task(&mut self, id: TaskId, completed: bool) -> bool {
        self.edit_task(id, |task| task.set_completed(completed))
    }

    /// Appends a subtask to a task.
    pub fn add_sub_task(&mut self, task_id: TaskId, input: NewSubTask) -> Option<SubTaskId> {
        self.task_mut(task_id).map(|task| task.push_sub_task(input))
    }

    /// Shallow-merges a patch into one subtask.
    pub fn update_sub_task(
        &mut self,
        task_id: TaskId,
        sub_task_id: SubTaskId,
        patch: SubTaskPatch,
    ) -> bool {
        self.task_mut(task_id)
            .is_some_and(|task| task.update_sub_task(sub_task_id, patch))
    }

    /// Removes one subtask.
    pub fn delete_sub_task(&mut self, task_id: TaskId, sub_task_id: SubTaskId) -> bool {
        self.task_mut(task_id)
            .is_some_and(|task| task.remove_sub_task(sub_task_id))
    }

    /// Clears every subtask of a task.
    pub fn delete_all_sub_tasks(&mut self, task_id: TaskId) -> bool {
        self.edit_task(task_id, Task::clear_sub_tasks)
    }

    /// Sets a subtask's completed flag and recomputes the parent's flag.
    pub fn complete_sub_task(
        &mut self,
        task_id: TaskId,
        sub_task_id: SubTaskId,
        completed: bool,
    ) -> bool {
        self.task_mut(task_id)
            .is_some_and(|task| task.complete_sub_task(sub_task_id, completed))
    }

    /// Appends AI-produced subtasks and marks the task as AI-assisted.
    pub fn add_ai_generated_sub_tasks(
        &mut self,
        task_id: TaskId,
        inputs: impl IntoIterator<Item = NewSubTask>,
    ) -> bool {
        self.edit_task(task_id, |task| task.attach_ai_sub_tasks(inputs))
    }

    /// Renumbers the named tasks `1..=N` in the given sequence.
    pub fn reorder_tasks(&mut self, ordered_ids: &[TaskId]) -> bool {
        ordering::renumber_from_ids(&mut self.tasks, ordered_ids)
    }

    /// Overrides one task's priority without consulting the scorer.
    pub fn assign_priority(&mut self, id: TaskId, priority: Priority) -> bool {
        self.edit_task(id, |task| task.set_priority(Some(priority)))
    }

    /// Recomputes every task's priority with the scorer.
    pub fn auto_assign_priorities(&mut self, now: DateTime<Utc>) {
        for task in &mut self.tasks {
            let priority = scoring::score(task, now);
            task.set_priority(Some(priority));
        }
    }

    /// Stably sorts the collection by priority and renumbers `order`.
    pub fn sort_tasks_by_priority(&mut self) {
        ordering::sort_by_priority(&mut self.tasks);
    }

    /// Records a timer session.
    pub fn add_time_block(&mut self, block: TimeBlock) {
        self.time_blocks.push(block);
    }

    /// Appends a daily summary.
    pub fn add_daily_stats(&mut self, stats: DailyStats) {
        self.daily_stats.push(stats);
    }

    /// Replaces the timer configuration.
    pub const fn update_pomodoro_settings(&mut self, settings: PomodoroSettings) {
        self.pomodoro_settings = settings;
    }
}
