use chrono::{Duration, TimeZone, Utc};
use taskflow::model::analytics::TaskMetrics;
use taskflow::model::{Priority, Task, TaskStatus};

fn task(id: &str, status: TaskStatus) -> Task {
    Task {
        id: id.to_string(),
        title: format!("task {}", id),
        description: None,
        status,
        created_at: Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap(),
        priority: None,
        due_date: None,
        recurrence: None,
    }
}

#[test]
fn empty_task_list_is_all_zeroes() {
    let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
    let metrics = TaskMetrics::compute(&[], now);
    assert_eq!(metrics, TaskMetrics::default());
    assert_eq!(metrics.completion_rate, 0);
}

#[test]
fn status_counts_and_completion_rate() {
    let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
    let tasks = vec![
        task("1", TaskStatus::Completed),
        task("2", TaskStatus::Completed),
        task("3", TaskStatus::InProgress),
        task("4", TaskStatus::Pending),
        task("5", TaskStatus::Pending),
        task("6", TaskStatus::Pending),
    ];
    let metrics = TaskMetrics::compute(&tasks, now);
    assert_eq!(metrics.total, 6);
    assert_eq!(metrics.completed, 2);
    assert_eq!(metrics.in_progress, 1);
    assert_eq!(metrics.pending, 3);
    // 2/6 = 33.33% rounds to 33.
    assert_eq!(metrics.completion_rate, 33);
}

#[test]
fn completion_rate_rounds_half_up() {
    let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
    let tasks = vec![
        task("1", TaskStatus::Completed),
        task("2", TaskStatus::Pending),
        task("3", TaskStatus::Pending),
        task("4", TaskStatus::Pending),
        task("5", TaskStatus::Pending),
        task("6", TaskStatus::Pending),
        task("7", TaskStatus::Pending),
        task("8", TaskStatus::Pending),
    ];
    // 1/8 = 12.5% rounds to 13.
    assert_eq!(TaskMetrics::compute(&tasks, now).completion_rate, 13);
}

#[test]
fn overdue_ignores_completed_and_undated() {
    let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
    let mut overdue = task("1", TaskStatus::Pending);
    overdue.due_date = Some(now - Duration::days(1));
    let mut done_late = task("2", TaskStatus::Completed);
    done_late.due_date = Some(now - Duration::days(1));
    let mut future = task("3", TaskStatus::Pending);
    future.due_date = Some(now + Duration::days(1));
    let undated = task("4", TaskStatus::Pending);

    let metrics = TaskMetrics::compute(&[overdue, done_late, future, undated], now);
    assert_eq!(metrics.overdue, 1);
}

#[test]
fn high_priority_and_created_today() {
    let now = Utc.with_ymd_and_hms(2026, 3, 10, 23, 30, 0).unwrap();
    let mut urgent = task("1", TaskStatus::Pending);
    urgent.priority = Some(Priority::High);
    let mut relaxed = task("2", TaskStatus::Pending);
    relaxed.priority = Some(Priority::Low);
    let mut old = task("3", TaskStatus::Pending);
    old.created_at = Utc.with_ymd_and_hms(2026, 3, 9, 23, 59, 0).unwrap();

    let metrics = TaskMetrics::compute(&[urgent, relaxed, old], now);
    assert_eq!(metrics.high_priority, 1);
    // Tasks 1 and 2 were created on the 10th, task 3 the day before.
    assert_eq!(metrics.created_today, 2);
}
