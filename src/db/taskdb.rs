use async_trait::async_trait;
use uuid::Uuid;

use super::DBClient;
use crate::models::taskmodel::{NewTask, Task};

const TASK_COLUMNS: &str = r#"
    id, user_id, project_id, title, task_type, task_date, task_time, description,
    completed, completed_at, priority, created_at, updated_at
"#;

#[async_trait]
pub trait TaskExt {
    async fn create_task(&self, user_id: Uuid, task: NewTask) -> Result<Task, sqlx::Error>;

    async fn get_task(&self, task_id: Uuid) -> Result<Option<Task>, sqlx::Error>;

    /// Ordered by date then time, earliest first.
    async fn get_user_tasks(&self, user_id: Uuid) -> Result<Vec<Task>, sqlx::Error>;

    async fn get_tasks(&self) -> Result<Vec<Task>, sqlx::Error>;

    /// Persists `completed`, `completed_at` and `updated_at` from `task`.
    async fn save_task_completion(&self, task: &Task) -> Result<Task, sqlx::Error>;

    async fn delete_task(&self, task_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl TaskExt for DBClient {
    async fn create_task(&self, user_id: Uuid, task: NewTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO tasks
            (user_id, project_id, title, task_type, task_date, task_time, description, priority)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            TASK_COLUMNS
        );

        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(task.project_id)
            .bind(task.title)
            .bind(task.task_type)
            .bind(task.task_date)
            .bind(task.task_time)
            .bind(task.description)
            .bind(task.priority)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_task(&self, task_id: Uuid) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);

        sqlx::query_as::<_, Task>(&query)
            .bind(task_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_user_tasks(&self, user_id: Uuid) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY task_date ASC, task_time ASC",
            TASK_COLUMNS
        );

        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_tasks(&self) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM tasks ORDER BY task_date ASC, task_time ASC",
            TASK_COLUMNS
        );

        sqlx::query_as::<_, Task>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn save_task_completion(&self, task: &Task) -> Result<Task, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE tasks
            SET completed = $2, completed_at = $3, updated_at = $4
            WHERE id = $1
            RETURNING {}
            "#,
            TASK_COLUMNS
        );

        sqlx::query_as::<_, Task>(&query)
            .bind(task.id)
            .bind(task.completed)
            .bind(task.completed_at)
            .bind(task.updated_at)
            .fetch_one(&self.pool)
            .await
    }

    async fn delete_task(&self, task_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
