//! Task and subtask lifecycles through the public store API.

use crate::in_memory::helpers::{TestStore, now, open_store, persistence};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use focusboard::task::{
    adapters::memory::InMemoryStatePersistence,
    domain::{
        DailyStats, NewSubTask, NewTask, Priority, SessionKind, StoreState, SubTaskPatch,
        TaskPatch, TimeBlock,
    },
};
use rstest::rstest;

async fn settled(store: &TestStore) {
    store.settle().await;
    store.flush().await.expect("flush should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_with_sub_tasks_completes_through_its_steps(
    persistence: InMemoryStatePersistence,
    now: DateTime<Utc>,
) {
    let store = open_store(&persistence, now).await;
    let id = store.add_task(NewTask::new("Write article", 90).with_category("Personal"));
    let outline = store
        .add_sub_task(id, NewSubTask::new("Outline", 20))
        .expect("task exists");
    let draft = store
        .add_sub_task(id, NewSubTask::new("Draft", 60))
        .expect("task exists");

    assert!(store.complete_sub_task(id, outline, true));
    assert_eq!(store.task(id).map(|task| task.is_completed()), Some(false));

    assert!(store.complete_sub_task(id, draft, true));
    assert_eq!(store.task(id).map(|task| task.is_completed()), Some(true));

    assert!(store.complete_sub_task(id, draft, false));
    assert_eq!(store.task(id).map(|task| task.is_completed()), Some(false));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn complete_task_cascades_both_ways(persistence: InMemoryStatePersistence, now: DateTime<Utc>) {
    let store = open_store(&persistence, now).await;
    let id = store.add_task(NewTask::new("Errands", 30));
    let steps: Vec<_> = ["Bank", "Post office", "Groceries"]
        .into_iter()
        .filter_map(|title| store.add_sub_task(id, NewSubTask::new(title, 10)))
        .collect();
    for step in steps.iter().take(2) {
        store.complete_sub_task(id, *step, true);
    }

    store.complete_task(id, true);
    let task = store.task(id).expect("task exists");
    assert_eq!(task.sub_tasks().len(), 3);
    assert!(task.sub_tasks().iter().all(|step| step.is_completed()));

    store.complete_task(id, false);
    let task = store.task(id).expect("task exists");
    assert!(task.sub_tasks().iter().all(|step| !step.is_completed()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updates_merge_and_deletes_cascade(persistence: InMemoryStatePersistence, now: DateTime<Utc>) {
    let store = open_store(&persistence, now).await;
    let due = now + TimeDelta::days(5);
    let id = store.add_task(NewTask::new("Renew passport", 30).with_description("Photos needed"));
    let step = store
        .add_sub_task(id, NewSubTask::new("Book photo", 15))
        .expect("task exists");

    assert!(store.update_task(id, TaskPatch::new().with_due_date(Some(due))));
    assert!(store.update_sub_task(id, step, SubTaskPatch::new().with_title("Take photo")));

    let task = store.task(id).expect("task exists");
    assert_eq!(task.due_date(), Some(due));
    assert_eq!(task.description(), Some("Photos needed"));
    assert_eq!(task.sub_task(step).map(|sub_task| sub_task.title()), Some("Take photo"));

    assert!(store.delete_sub_task(id, step));
    assert!(!store.delete_sub_task(id, step));
    assert!(store.delete_task(id));
    assert!(store.task(id).is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn timer_records_and_settings_survive_a_restart(
    persistence: InMemoryStatePersistence,
    now: DateTime<Utc>,
) {
    let store = open_store(&persistence, now).await;
    let id = store.add_task(NewTask::new("Deep work", 120).with_category("Work"));
    store.add_time_block(TimeBlock::new(SessionKind::Focus, now, 25).for_task(id));
    store.add_daily_stats(DailyStats::new(
        NaiveDate::from_ymd_opt(2026, 6, 14).expect("valid date"),
        4,
        100,
        82,
    ));
    let mut settings = store.pomodoro_settings();
    settings.sessions_before_long_break = 3;
    store.update_pomodoro_settings(settings);
    settled(&store).await;

    let reopened = open_store(&persistence, now).await;
    let state: StoreState = (*reopened.snapshot()).clone();

    assert_eq!(state, *store.snapshot());
    assert_eq!(state.time_blocks.first().and_then(TimeBlock::task_id), Some(id));
    assert_eq!(state.pomodoro_settings.sessions_before_long_break, 3);
    assert_eq!(
        state.tasks.first().and_then(|task| task.priority()),
        Some(Priority::Medium)
    );
}
