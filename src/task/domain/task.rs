//! Task aggregate root, owned subtasks, and their command inputs.

use super::{Priority, SubTaskId, TaskId, completion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Child work item owned by exactly one [`Task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    id: SubTaskId,
    title: String,
    #[serde(default)]
    estimated_minutes: u32,
    #[serde(default)]
    completed: bool,
}

impl SubTask {
    /// Creates an incomplete subtask with a fresh identifier.
    #[must_use]
    pub fn new(input: NewSubTask) -> Self {
        Self {
            id: SubTaskId::new(),
            title: input.title,
            estimated_minutes: input.estimated_minutes,
            completed: false,
        }
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubTaskId {
        self.id
    }

    /// Returns the subtask title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the estimated effort in minutes.
    #[must_use]
    pub const fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    /// Returns whether the subtask is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Shallow-merges the present patch fields into this subtask.
    pub fn apply_patch(&mut self, patch: SubTaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(minutes) = patch.estimated_minutes {
            self.estimated_minutes = minutes;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }

    pub(crate) const fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

/// Caller-supplied fields for a new subtask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubTask {
    /// Subtask title.
    pub title: String,
    /// Estimated effort in minutes.
    #[serde(default)]
    pub estimated_minutes: u32,
}

impl NewSubTask {
    /// Creates subtask input.
    #[must_use]
    pub fn new(title: impl Into<String>, estimated_minutes: u32) -> Self {
        Self {
            title: title.into(),
            estimated_minutes,
        }
    }
}

/// Partial field set merged into a subtask.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubTaskPatch {
    title: Option<String>,
    estimated_minutes: Option<u32>,
    completed: Option<bool>,
}

impl SubTaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the estimate.
    #[must_use]
    pub const fn with_estimated_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    /// Replaces the completed flag without touching the parent task.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    estimated_minutes: u32,
    #[serde(default)]
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    ai_generated: bool,
    #[serde(default)]
    order: u32,
    #[serde(default)]
    sub_tasks: Vec<SubTask>,
}

impl Task {
    /// Creates a new incomplete task at the given manual position.
    #[must_use]
    pub fn new(input: NewTask, order: u32, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::new(),
            title: input.title,
            description: input.description,
            category: input.category,
            priority: input.priority,
            estimated_minutes: input.estimated_minutes,
            due_date: input.due_date,
            created_at,
            completed: false,
            ai_generated: false,
            order,
            sub_tasks: Vec::new(),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the category label, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the priority, or `None` before any assignment.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the estimated effort in minutes.
    #[must_use]
    pub const fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns whether AI-produced subtasks have been attached.
    #[must_use]
    pub const fn is_ai_generated(&self) -> bool {
        self.ai_generated
    }

    /// Returns the manual sort position.
    #[must_use]
    pub const fn order(&self) -> u32 {
        self.order
    }

    /// Returns the owned subtasks in sequence.
    #[must_use]
    pub fn sub_tasks(&self) -> &[SubTask] {
        &self.sub_tasks
    }

    /// Returns the subtask with the given identifier.
    #[must_use]
    pub fn sub_task(&self, id: SubTaskId) -> Option<&SubTask> {
        self.sub_tasks.iter().find(|sub_task| sub_task.id == id)
    }

    /// Shallow-merges the present patch fields into this task.
    ///
    /// A patched `completed` flag is stored as given and does not cascade.
    pub fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(minutes) = patch.estimated_minutes {
            self.estimated_minutes = minutes;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(ai_generated) = patch.ai_generated {
            self.ai_generated = ai_generated;
        }
    }

    /// Sets the completed flag and forces every subtask to match.
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
        for sub_task in &mut self.sub_tasks {
            sub_task.set_completed(completed);
        }
    }

    /// Overrides the priority.
    pub const fn set_priority(&mut self, priority: Option<Priority>) {
        self.priority = priority;
    }

    /// Overrides the manual sort position.
    pub const fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    /// Appends a new incomplete subtask and returns its identifier.
    pub fn push_sub_task(&mut self, input: NewSubTask) -> SubTaskId {
        let sub_task = SubTask::new(input);
        let id = sub_task.id;
        self.sub_tasks.push(sub_task);
        id
    }

    /// Appends AI-produced subtasks and flags the task as AI-assisted.
    pub fn attach_ai_sub_tasks(&mut self, inputs: impl IntoIterator<Item = NewSubTask>) {
        self.sub_tasks.extend(inputs.into_iter().map(SubTask::new));
        self.ai_generated = true;
    }

    /// Merges a patch into one subtask. Returns `false` when it is absent.
    pub fn update_sub_task(&mut self, id: SubTaskId, patch: SubTaskPatch) -> bool {
        let Some(sub_task) = self.sub_tasks.iter_mut().find(|sub_task| sub_task.id == id) else {
            return false;
        };
        sub_task.apply_patch(patch);
        true
    }

    /// Removes one subtask. Returns `false` when it is absent.
    pub fn remove_sub_task(&mut self, id: SubTaskId) -> bool {
        let before = self.sub_tasks.len();
        self.sub_tasks.retain(|sub_task| sub_task.id != id);
        self.sub_tasks.len() != before
    }

    /// Discards every subtask.
    pub fn clear_sub_tasks(&mut self) {
        self.sub_tasks.clear();
    }

    /// Sets one subtask's completed flag and recomputes the task's flag.
    ///
    /// Returns `false` when the subtask is absent, leaving the task as is.
    pub fn complete_sub_task(&mut self, id: SubTaskId, completed: bool) -> bool {
        let Some(sub_task) = self.sub_tasks.iter_mut().find(|sub_task| sub_task.id == id) else {
            return false;
        };
        sub_task.set_completed(completed);
        self.completed =
            completion::task_completed_after_sub_task_change(&self.sub_tasks, id, completed);
        true
    }
}

/// Caller-supplied fields for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: Option<String>,
    category: Option<String>,
    estimated_minutes: u32,
    priority: Option<Priority>,
    due_date: Option<DateTime<Utc>>,
}

impl NewTask {
    /// Creates task input with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, estimated_minutes: u32) -> Self {
        Self {
            title: title.into(),
            description: None,
            category: None,
            estimated_minutes,
            priority: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets an initial priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Partial field set merged into a task.
///
/// Nested options distinguish "leave unchanged" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<Option<String>>,
    category: Option<Option<String>>,
    priority: Option<Option<Priority>>,
    estimated_minutes: Option<u32>,
    due_date: Option<Option<DateTime<Utc>>>,
    completed: Option<bool>,
    ai_generated: Option<bool>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces or clears the category.
    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = Some(category);
        self
    }

    /// Replaces or clears the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Option<Priority>) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the estimate.
    #[must_use]
    pub const fn with_estimated_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    /// Replaces or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the completed flag without cascading to subtasks.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Replaces the AI-generated flag.
    #[must_use]
    pub const fn with_ai_generated(mut self, ai_generated: bool) -> Self {
        self.ai_generated = Some(ai_generated);
        self
    }
}
