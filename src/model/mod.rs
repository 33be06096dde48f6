// File: ./src/model/mod.rs
// Core data types shared between the REST client and the TUI.
pub mod analytics;
pub mod parser;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use parser::{ParsedTask, parse_task_text};

/// Task urgency as the backend understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "pending")]
    Pending,
    // The backend uses the kebab-case literal on the wire.
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::InProgress => write!(f, "in-progress"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::None => write!(f, "none"),
            Recurrence::Daily => write!(f, "daily"),
            Recurrence::Weekly => write!(f, "weekly"),
            Recurrence::Monthly => write!(f, "monthly"),
        }
    }
}

/// A task as served by the backend. Field names follow the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

impl Task {
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        if self.status.is_done() {
            return false;
        }
        match self.due_date {
            Some(due) => due < now,
            None => false,
        }
    }
}

/// The account owning the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An entry in the dashboard's sessions view.
///
/// The backend exposes no sessions endpoint; these are seeded locally at
/// startup and revoked locally, mirroring the web client.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSession {
    pub id: String,
    pub device: String,
    pub location: String,
    pub last_active: DateTime<Utc>,
    pub current: bool,
}

impl DeviceSession {
    /// Demonstration entries shown until a real sessions API exists.
    pub fn seed(now: DateTime<Utc>) -> Vec<DeviceSession> {
        vec![
            DeviceSession {
                id: "1".to_string(),
                device: "This terminal".to_string(),
                location: "Local machine".to_string(),
                last_active: now,
                current: true,
            },
            DeviceSession {
                id: "2".to_string(),
                device: "Safari on iPhone".to_string(),
                location: "San Francisco, CA".to_string(),
                last_active: now - chrono::Duration::hours(1),
                current: false,
            },
            DeviceSession {
                id: "3".to_string(),
                device: "Chrome on Windows".to_string(),
                location: "New York, NY".to_string(),
                last_active: now - chrono::Duration::hours(24),
                current: false,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: TaskStatus, due: Option<DateTime<Utc>>) -> Task {
        Task {
            id: "t1".to_string(),
            title: "x".to_string(),
            description: None,
            status,
            created_at: Utc::now(),
            priority: None,
            due_date: due,
            recurrence: None,
        }
    }

    #[test]
    fn status_wire_format_is_kebab_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        let parsed: TaskStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(parsed, TaskStatus::InProgress);
    }

    #[test]
    fn task_deserializes_camel_case() {
        let json = r#"{
            "id": "abc",
            "title": "Write report",
            "status": "pending",
            "createdAt": "2026-03-01T10:00:00Z",
            "dueDate": "2026-03-05T00:00:00Z",
            "priority": "high"
        }"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.id, "abc");
        assert_eq!(t.priority, Some(Priority::High));
        assert!(t.due_date.is_some());
        assert_eq!(t.recurrence, None);
    }

    #[test]
    fn completed_tasks_are_never_overdue() {
        let now = Utc::now();
        let past = now - chrono::Duration::days(2);
        assert!(task(TaskStatus::Pending, Some(past)).is_overdue(now));
        assert!(!task(TaskStatus::Completed, Some(past)).is_overdue(now));
        assert!(!task(TaskStatus::Pending, None).is_overdue(now));
    }
}
