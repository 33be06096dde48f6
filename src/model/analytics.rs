// File: src/model/analytics.rs
// Derives the analytics view's metrics from the loaded task list.
use crate::model::{Priority, Task, TaskStatus};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskMetrics {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    /// Rounded percentage, 0 when there are no tasks.
    pub completion_rate: u32,
    pub high_priority: usize,
    pub overdue: usize,
    pub created_today: usize,
}

impl TaskMetrics {
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let total = tasks.len();
        let completed = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count();
        let in_progress = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::InProgress)
            .count();
        let pending = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Pending)
            .count();

        let completion_rate = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        let high_priority = tasks
            .iter()
            .filter(|t| t.priority == Some(Priority::High))
            .count();
        let overdue = tasks.iter().filter(|t| t.is_overdue(now)).count();

        let today = now.date_naive();
        let created_today = tasks
            .iter()
            .filter(|t| t.created_at.date_naive() == today)
            .count();

        Self {
            total,
            completed,
            in_progress,
            pending,
            completion_rate,
            high_priority,
            overdue,
            created_today,
        }
    }
}
