use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::non_blank,
    models::{
        projectmodel::Project,
        taskmodel::{NewTask, Task, TaskPriority, TaskType},
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[serde(rename = "type")]
    pub task_type: TaskType,

    pub date: NaiveDate,
    pub time: NaiveTime,

    pub description: Option<String>,

    /// Must be one of the caller's projects.
    pub project: Option<Uuid>,

    #[serde(default)]
    pub priority: TaskPriority,
}

impl CreateTaskDto {
    pub fn into_new_task(self) -> NewTask {
        NewTask {
            project_id: self.project,
            title: self.title.trim().to_string(),
            task_type: self.task_type,
            task_date: self.date,
            task_time: self.time,
            description: non_blank(self.description),
            priority: self.priority,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCompletionDto {
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SchedulePageDto {
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub upcoming_count: usize,
    pub this_week_count: usize,
    pub overdue_count: usize,
    pub completed_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_dto_parses_form_fields() {
        let dto: CreateTaskDto = serde_json::from_value(serde_json::json!({
            "title": "Cement delivery",
            "type": "delivery",
            "date": "2025-03-07",
            "time": "07:30:00"
        }))
        .unwrap();

        assert!(dto.validate().is_ok());
        let task = dto.into_new_task();
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.task_type, TaskType::Delivery);
        assert_eq!(task.project_id, None);
    }
}
