use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "task_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Meeting,
    Inspection,
    Delivery,
    Milestone,
    Maintenance,
    SafetyCheck,
    Other,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "task_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Option<Uuid>,
    pub title: String,
    pub task_type: TaskType,
    pub task_date: NaiveDate,
    pub task_time: NaiveTime,
    pub description: Option<String>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Flips the completed flag, keeping `completed_at` set exactly while the task is completed.
    /// Re-completing an already completed task keeps the original timestamp.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        self.completed = completed;
        if completed {
            if self.completed_at.is_none() {
                self.completed_at = Some(now);
            }
        } else {
            self.completed_at = None;
        }
        self.updated_at = now;
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.task_date < today
    }

    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        !self.completed && self.task_date >= today
    }
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub project_id: Option<Uuid>,
    pub title: String,
    pub task_type: TaskType,
    pub task_date: NaiveDate,
    pub task_time: NaiveTime,
    pub description: Option<String>,
    pub priority: TaskPriority,
}
