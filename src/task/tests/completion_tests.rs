//! Unit tests for the task and subtask completion cascade.

use super::fixtures::{now, task_with_sub_tasks};
use crate::task::domain::{NewTask, SubTaskId, Task, completion};
use chrono::{DateTime, Utc};
use rstest::rstest;

fn sub_task_ids(task: &Task) -> Vec<SubTaskId> {
    task.sub_tasks().iter().map(|sub_task| sub_task.id()).collect()
}

#[rstest]
fn completing_a_task_forces_every_sub_task_to_match(now: DateTime<Utc>) {
    let mut task = task_with_sub_tasks(NewTask::new("Cascade", 30), 3, now);
    let ids = sub_task_ids(&task);
    for id in ids.iter().take(2) {
        task.complete_sub_task(*id, true);
    }

    task.set_completed(true);
    assert!(task.is_completed());
    assert!(task.sub_tasks().iter().all(|sub_task| sub_task.is_completed()));

    task.set_completed(false);
    assert!(!task.is_completed());
    assert!(task.sub_tasks().iter().all(|sub_task| !sub_task.is_completed()));
}

#[rstest]
fn completing_the_last_open_sub_task_completes_the_task(now: DateTime<Utc>) {
    let mut task = task_with_sub_tasks(NewTask::new("Pair", 30), 2, now);
    let [first, second] = sub_task_ids(&task).try_into().expect("two subtasks");
    task.complete_sub_task(second, true);
    assert!(!task.is_completed());

    assert!(task.complete_sub_task(first, true));
    assert!(task.is_completed());

    assert!(task.complete_sub_task(first, false));
    assert!(!task.is_completed());
}

#[rstest]
fn completing_one_of_several_open_sub_tasks_leaves_task_open(now: DateTime<Utc>) {
    let mut task = task_with_sub_tasks(NewTask::new("Trio", 30), 3, now);
    let ids = sub_task_ids(&task);
    let first = *ids.first().expect("subtask present");

    task.complete_sub_task(first, true);

    assert!(!task.is_completed());
}

#[rstest]
fn reopening_a_sub_task_reopens_a_completed_task(now: DateTime<Utc>) {
    let mut task = task_with_sub_tasks(NewTask::new("Done", 30), 2, now);
    task.set_completed(true);
    let first = *sub_task_ids(&task).first().expect("subtask present");

    task.complete_sub_task(first, false);

    assert!(!task.is_completed());
}

#[rstest]
fn unknown_sub_task_leaves_task_untouched(now: DateTime<Utc>) {
    let mut task = task_with_sub_tasks(NewTask::new("Stable", 30), 1, now);
    let before = task.clone();

    assert!(!task.complete_sub_task(SubTaskId::new(), true));
    assert_eq!(task, before);
}

#[rstest]
fn recomputation_only_considers_the_other_sub_tasks(now: DateTime<Utc>) {
    let mut task = task_with_sub_tasks(NewTask::new("Pure", 30), 2, now);
    let [first, second] = sub_task_ids(&task).try_into().expect("two subtasks");
    task.complete_sub_task(second, true);

    assert!(completion::task_completed_after_sub_task_change(
        task.sub_tasks(),
        first,
        true
    ));
    assert!(!completion::task_completed_after_sub_task_change(
        task.sub_tasks(),
        first,
        false
    ));
    assert!(!completion::task_completed_after_sub_task_change(
        task.sub_tasks(),
        second,
        true
    ));
}
