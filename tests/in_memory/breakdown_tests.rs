//! Applying breakdown provider plans to tasks.

use crate::in_memory::helpers::{now, open_store, persistence};
use chrono::{DateTime, Utc};
use focusboard::task::{
    adapters::memory::{CannedBreakdownProvider, InMemoryStatePersistence},
    domain::{NewSubTask, NewTask},
    ports::{BreakdownError, BreakdownPlan, BreakdownProvider},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn provider_plan_is_applied_by_the_caller(
    persistence: InMemoryStatePersistence,
    now: DateTime<Utc>,
) {
    let store = open_store(&persistence, now).await;
    let provider = CannedBreakdownProvider::new(BreakdownPlan::from_sub_tasks(vec![
        NewSubTask::new("Collect receipts", 30),
        NewSubTask::new("Fill in form", 45),
    ]));
    let id = store.add_task(NewTask::new("File taxes", 0).with_description("Due in April"));
    let task = store.task(id).expect("task exists");

    let plan = provider
        .breakdown(task.title(), task.description())
        .await
        .expect("provider answers");
    assert_eq!(plan.total_estimated_minutes, 75);
    assert!(store.apply_breakdown(id, plan));
    store.settle().await;

    let task = store.task(id).expect("task exists");
    assert!(task.is_ai_generated());
    assert_eq!(task.estimated_minutes(), 75);
    assert_eq!(task.sub_tasks().len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn provider_failure_leaves_the_task_untouched(
    persistence: InMemoryStatePersistence,
    now: DateTime<Utc>,
) {
    let store = open_store(&persistence, now).await;
    let provider = CannedBreakdownProvider::unavailable("offline");
    let id = store.add_task(NewTask::new("Plan garden", 30));
    store.settle().await;
    let before = store.task(id);

    let result = provider.breakdown("Plan garden", None).await;

    assert!(matches!(result, Err(BreakdownError::Unavailable(ref reason)) if reason == "offline"));
    assert_eq!(store.task(id), before);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ai_sub_tasks_append_after_manual_ones(
    persistence: InMemoryStatePersistence,
    now: DateTime<Utc>,
) {
    let store = open_store(&persistence, now).await;
    let id = store.add_task(NewTask::new("Launch site", 60));
    let manual = store
        .add_sub_task(id, NewSubTask::new("Buy domain", 10))
        .expect("task exists");
    store.complete_sub_task(id, manual, true);

    assert!(store.add_ai_generated_sub_tasks(
        id,
        vec![NewSubTask::new("Pick theme", 20), NewSubTask::new("Write copy", 60)],
    ));

    let task = store.task(id).expect("task exists");
    assert!(task.is_ai_generated());
    assert_eq!(task.estimated_minutes(), 60);
    assert_eq!(task.sub_tasks().first().map(|step| step.id()), Some(manual));
    assert!(task.sub_task(manual).is_some_and(|step| step.is_completed()));
    assert_eq!(task.sub_tasks().len(), 3);
}
