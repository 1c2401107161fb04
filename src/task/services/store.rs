//! The task store: the single authoritative in-memory task model.
//!
//! Commands are synchronous and total. Each one computes the next state
//! under the store lock, publishes it to subscribers, and queues the full
//! document for the background writer before returning. Commands that
//! address a missing task or subtask leave the state untouched and queue
//! nothing.
//!
//! `add_task` additionally schedules a priority refresh over every task.
//! Refreshes run one at a time, in scheduling order, on the runtime the
//! store was opened on. Until they run, readers may see priorities that
//! predate the add; [`TaskStore::settle`] waits for them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use mockable::Clock;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use super::refresh::{self, RefreshRequest, RefreshTracker};
use super::writer::{self, WriterCommand};
use crate::config::StoreConfig;
use crate::task::{
    domain::{
        DailyStats, NewSubTask, NewTask, PomodoroSettings, Priority, StoreState, SubTaskId,
        SubTaskPatch, Task, TaskId, TaskPatch, TimeBlock,
    },
    ports::{BreakdownPlan, PersistenceError, StatePersistence},
};

/// Errors surfaced by the store's persistence boundary.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Reading or writing the backing store failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The persisted document could not be decoded.
    #[error("store document in slot '{slot}' is corrupt: {source}")]
    CorruptDocument {
        /// Slot holding the unreadable document.
        slot: String,
        /// Decoding failure.
        source: Arc<serde_json::Error>,
    },

    /// The in-memory state could not be encoded.
    #[error("failed to serialize store state: {0}")]
    Serialize(Arc<serde_json::Error>),

    /// The background writer is no longer running.
    #[error("persistence writer has stopped")]
    WriterClosed,
}

/// Result type for store persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Whether a command's return value means the state changed.
trait Outcome {
    fn changed(&self) -> bool;
}

impl Outcome for () {
    fn changed(&self) -> bool {
        true
    }
}

impl Outcome for bool {
    fn changed(&self) -> bool {
        *self
    }
}

impl Outcome for TaskId {
    fn changed(&self) -> bool {
        true
    }
}

impl<T> Outcome for Option<T> {
    fn changed(&self) -> bool {
        self.is_some()
    }
}

struct StoreCore<C> {
    state: Mutex<StoreState>,
    updates: watch::Sender<Arc<StoreState>>,
    writer: mpsc::UnboundedSender<WriterCommand>,
    clock: Arc<C>,
    refresh: RefreshTracker,
}

impl<C> StoreCore<C>
where
    C: Clock + Send + Sync,
{
    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn commit<T: Outcome>(
        &self,
        operation: &'static str,
        mutation: impl FnOnce(&mut StoreState, DateTime<Utc>) -> T,
    ) -> T {
        let now = self.clock.utc();
        let mut state = self.lock_state();
        let outcome = mutation(&mut state, now);
        if !outcome.changed() {
            debug!(operation, "no matching record, state unchanged");
            return outcome;
        }

        let snapshot = Arc::new(state.clone());
        self.updates.send_replace(Arc::clone(&snapshot));
        if self.writer.send(WriterCommand::Save(snapshot)).is_err() {
            warn!(operation, "persistence writer stopped, change kept in memory only");
        }
        debug!(operation, tasks = state.tasks.len(), "store state committed");
        outcome
    }
}

/// Cloneable handle to the task store.
pub struct TaskStore<C>
where
    C: Clock + Send + Sync + 'static,
{
    core: Arc<StoreCore<C>>,
    refresher: mpsc::UnboundedSender<RefreshRequest>,
    priority_refresh_delay: Duration,
    storage_slot: Arc<str>,
}

impl<C> Clone for TaskStore<C>
where
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            refresher: self.refresher.clone(),
            priority_refresh_delay: self.priority_refresh_delay,
            storage_slot: Arc::clone(&self.storage_slot),
        }
    }
}

impl<C> TaskStore<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Loads the persisted document and starts the store.
    ///
    /// A missing document yields the default state. The background writer
    /// and later priority refreshes run on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the document cannot be read
    /// and [`StoreError::CorruptDocument`] when it cannot be decoded.
    pub async fn open<P>(
        persistence: Arc<P>,
        clock: Arc<C>,
        config: StoreConfig,
    ) -> StoreResult<Self>
    where
        P: StatePersistence + ?Sized + 'static,
    {
        let slot = config.storage_slot;
        let state = match persistence.load(&slot).await? {
            Some(document) => serde_json::from_str::<StoreState>(&document).map_err(|err| {
                StoreError::CorruptDocument {
                    slot: slot.clone(),
                    source: Arc::new(err),
                }
            })?,
            None => StoreState::default(),
        };
        info!(slot = %slot, tasks = state.tasks.len(), "task store opened");

        let (updates, _) = watch::channel(Arc::new(state.clone()));
        let writer = writer::spawn(persistence, slot.clone());
        let core = StoreCore {
            state: Mutex::new(state),
            updates,
            writer,
            clock,
            refresh: RefreshTracker::new(),
        };
        let core = Arc::new(core);
        let refresher = refresh::spawn(&Handle::current(), {
            let core = Arc::clone(&core);
            move |ticket| {
                core.commit("auto_assign_priorities", |state, now| {
                    state.auto_assign_priorities(now);
                });
                core.refresh.finish();
                debug!(ticket, "priority refresh finished");
            }
        });
        Ok(Self {
            core,
            refresher,
            priority_refresh_delay: config.priority_refresh_delay,
            storage_slot: slot.into(),
        })
    }

    /// Returns the persistence slot this store writes to.
    #[must_use]
    pub fn storage_slot(&self) -> &str {
        &self.storage_slot
    }

    /// Returns the latest committed state.
    #[must_use]
    pub fn snapshot(&self) -> Arc<StoreState> {
        Arc::clone(&*self.core.updates.borrow())
    }

    /// Returns every task in collection sequence.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.snapshot().tasks.clone()
    }

    /// Returns one task by identifier.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.snapshot().task(id).cloned()
    }

    /// Returns the current timer configuration.
    #[must_use]
    pub fn pomodoro_settings(&self) -> PomodoroSettings {
        self.snapshot().pomodoro_settings
    }

    /// Subscribes to committed states.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<StoreState>> {
        self.core.updates.subscribe()
    }

    /// Adds a task and schedules a priority refresh over all tasks.
    ///
    /// The new task takes `order = max(order) + 1`. The refresh runs after
    /// this call returns; await [`TaskStore::settle`] to observe it.
    pub fn add_task(&self, input: NewTask) -> TaskId {
        let id = self
            .core
            .commit("add_task", |state, now| state.add_task(input, now));
        debug!(task_id = %id, "task added");
        self.schedule_priority_refresh();
        id
    }

    /// Shallow-merges `patch` into a task. Returns whether it exists.
    pub fn update_task(&self, id: TaskId, patch: TaskPatch) -> bool {
        self.core
            .commit("update_task", |state, _| state.update_task(id, patch))
    }

    /// Removes a task and its subtasks. Returns whether it existed.
    pub fn delete_task(&self, id: TaskId) -> bool {
        self.core
            .commit("delete_task", |state, _| state.delete_task(id))
    }

    /// Sets a task's completion and forces every subtask to match.
    pub fn complete_task(&self, id: TaskId, completed: bool) -> bool {
        self.core
            .commit("complete_task", |state, _| state.complete_task(id, completed))
    }

    /// Appends a subtask. Returns its identifier when the task exists.
    pub fn add_sub_task(&self, task_id: TaskId, input: NewSubTask) -> Option<SubTaskId> {
        self.core
            .commit("add_sub_task", |state, _| state.add_sub_task(task_id, input))
    }

    /// Shallow-merges `patch` into a subtask.
    pub fn update_sub_task(
        &self,
        task_id: TaskId,
        sub_task_id: SubTaskId,
        patch: SubTaskPatch,
    ) -> bool {
        self.core.commit("update_sub_task", |state, _| {
            state.update_sub_task(task_id, sub_task_id, patch)
        })
    }

    /// Removes one subtask.
    pub fn delete_sub_task(&self, task_id: TaskId, sub_task_id: SubTaskId) -> bool {
        self.core.commit("delete_sub_task", |state, _| {
            state.delete_sub_task(task_id, sub_task_id)
        })
    }

    /// Clears a task's subtasks.
    pub fn delete_all_sub_tasks(&self, task_id: TaskId) -> bool {
        self.core.commit("delete_all_sub_tasks", |state, _| {
            state.delete_all_sub_tasks(task_id)
        })
    }

    /// Sets a subtask's completion and recomputes the parent's completion.
    pub fn complete_sub_task(
        &self,
        task_id: TaskId,
        sub_task_id: SubTaskId,
        completed: bool,
    ) -> bool {
        self.core.commit("complete_sub_task", |state, _| {
            state.complete_sub_task(task_id, sub_task_id, completed)
        })
    }

    /// Appends AI-produced subtasks and flags the task as AI-assisted.
    pub fn add_ai_generated_sub_tasks(&self, task_id: TaskId, inputs: Vec<NewSubTask>) -> bool {
        self.core.commit("add_ai_generated_sub_tasks", |state, _| {
            state.add_ai_generated_sub_tasks(task_id, inputs)
        })
    }

    /// Applies a provider's plan: sets the task's estimate and AI flag, then
    /// appends the proposed subtasks.
    pub fn apply_breakdown(&self, task_id: TaskId, plan: BreakdownPlan) -> bool {
        self.core.commit("apply_breakdown", |state, _| {
            let patch = TaskPatch::new()
                .with_estimated_minutes(plan.total_estimated_minutes)
                .with_ai_generated(true);
            state.update_task(task_id, patch)
                && state.add_ai_generated_sub_tasks(task_id, plan.sub_tasks)
        })
    }

    /// Renumbers the named tasks `1..=N` in the given sequence.
    ///
    /// Unknown identifiers are ignored and unnamed tasks keep their order.
    pub fn reorder_tasks(&self, ordered_ids: &[TaskId]) -> bool {
        self.core
            .commit("reorder_tasks", |state, _| state.reorder_tasks(ordered_ids))
    }

    /// Overrides one task's priority.
    pub fn assign_priority(&self, id: TaskId, priority: Priority) -> bool {
        self.core.commit("assign_priority", |state, _| {
            state.assign_priority(id, priority)
        })
    }

    /// Recomputes every task's priority with the scorer.
    pub fn auto_assign_priorities(&self) {
        self.core.commit("auto_assign_priorities", |state, now| {
            state.auto_assign_priorities(now);
        });
    }

    /// Stably sorts tasks by priority and renumbers `order` to `1..=N`.
    pub fn sort_tasks_by_priority(&self) {
        self.core.commit("sort_tasks_by_priority", |state, _| {
            state.sort_tasks_by_priority();
        });
    }

    /// Records a timer session.
    pub fn add_time_block(&self, block: TimeBlock) {
        self.core
            .commit("add_time_block", |state, _| state.add_time_block(block));
    }

    /// Appends a daily summary.
    pub fn add_daily_stats(&self, stats: DailyStats) {
        self.core
            .commit("add_daily_stats", |state, _| state.add_daily_stats(stats));
    }

    /// Replaces the timer configuration.
    pub fn update_pomodoro_settings(&self, settings: PomodoroSettings) {
        self.core.commit("update_pomodoro_settings", |state, _| {
            state.update_pomodoro_settings(settings);
        });
    }

    /// Returns how many scheduled priority refreshes have not run yet.
    #[must_use]
    pub fn pending_priority_refreshes(&self) -> u64 {
        self.core.refresh.pending()
    }

    /// Waits for every priority refresh scheduled before this call.
    pub async fn settle(&self) {
        self.core.refresh.settled().await;
    }

    /// Waits for queued writes and retries any that failed.
    ///
    /// # Errors
    ///
    /// Returns the persistence failure when the latest state still cannot
    /// be written, or [`StoreError::WriterClosed`] when the writer stopped.
    /// The in-memory state is unaffected either way.
    pub async fn flush(&self) -> StoreResult<()> {
        let (reply, response) = oneshot::channel();
        self.core
            .writer
            .send(WriterCommand::Flush(reply))
            .map_err(|_| StoreError::WriterClosed)?;
        response.await.map_err(|_| StoreError::WriterClosed)?
    }

    /// Queues the current state for writing and waits for the outcome.
    ///
    /// # Errors
    ///
    /// Same as [`TaskStore::flush`].
    pub async fn persist_now(&self) -> StoreResult<()> {
        self.core
            .writer
            .send(WriterCommand::Save(self.snapshot()))
            .map_err(|_| StoreError::WriterClosed)?;
        self.flush().await
    }

    fn schedule_priority_refresh(&self) {
        let ticket = self.core.refresh.issue();
        let now = tokio::time::Instant::now();
        let due = now.checked_add(self.priority_refresh_delay).unwrap_or(now);
        if self.refresher.send(RefreshRequest { ticket, due }).is_err() {
            warn!(ticket, "priority refresh runner stopped, refresh skipped");
            self.core.refresh.finish();
        }
    }
}
