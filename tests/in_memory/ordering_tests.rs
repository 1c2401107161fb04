//! Manual reordering against priority sorting.

use crate::in_memory::helpers::{now, open_store, persistence};
use chrono::{DateTime, TimeDelta, Utc};
use focusboard::task::{
    adapters::memory::InMemoryStatePersistence,
    domain::{NewTask, Priority, SortMode, TaskFilter, TaskId, display_order},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_renumbers_the_full_sequence(
    persistence: InMemoryStatePersistence,
    now: DateTime<Utc>,
) {
    let store = open_store(&persistence, now).await;
    let x = store.add_task(NewTask::new("x", 10));
    let y = store.add_task(NewTask::new("y", 10));
    let z = store.add_task(NewTask::new("z", 10));

    assert!(store.reorder_tasks(&[z, x, y]));

    let order_of = |id: TaskId| store.task(id).map(|task| task.order());
    assert_eq!(order_of(z), Some(1));
    assert_eq!(order_of(x), Some(2));
    assert_eq!(order_of(y), Some(3));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn priority_sort_breaks_ties_by_collection_sequence(
    persistence: InMemoryStatePersistence,
    now: DateTime<Utc>,
) {
    let store = open_store(&persistence, now).await;
    let first_low = store.add_task(NewTask::new("first low", 10));
    let high = store.add_task(NewTask::new("high", 10));
    let second_low = store.add_task(NewTask::new("second low", 10));
    store.settle().await;
    store.assign_priority(first_low, Priority::Low);
    store.assign_priority(high, Priority::High);
    store.assign_priority(second_low, Priority::Low);
    store.reorder_tasks(&[second_low, high, first_low]);

    store.sort_tasks_by_priority();

    let titles: Vec<String> = store
        .tasks()
        .iter()
        .map(|task| format!("{}:{}", task.title(), task.order()))
        .collect();
    assert_eq!(titles, ["high:1", "first low:2", "second low:3"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn display_modes_read_the_same_collection(
    persistence: InMemoryStatePersistence,
    now: DateTime<Utc>,
) {
    let store = open_store(&persistence, now).await;
    let later = store.add_task(NewTask::new("later", 10));
    let soon = store.add_task(NewTask::new("soon", 10).with_due_date(now + TimeDelta::hours(2)));
    let done = store.add_task(NewTask::new("done", 10));
    store.complete_task(done, true);
    store.settle().await;

    let snapshot = store.snapshot();
    let manual: Vec<TaskId> = display_order(&snapshot.tasks, TaskFilter::Active, SortMode::Manual)
        .into_iter()
        .map(|task| task.id())
        .collect();
    let by_priority: Vec<TaskId> =
        display_order(&snapshot.tasks, TaskFilter::Active, SortMode::Priority)
            .into_iter()
            .map(|task| task.id())
            .collect();

    assert_eq!(manual, [later, soon]);
    assert_eq!(by_priority, [soon, later]);
}
