use async_trait::async_trait;
use uuid::Uuid;

use super::DBClient;
use crate::models::workermodel::{Worker, WorkerProfileParams, WorkerRole, WorkerStatus};

const WORKER_COLUMNS: &str = r#"
    id, user_id, name, phone, role, daily_rate, experience_years, bio, skills,
    id_number, status, rating, completed_projects, created_at, updated_at
"#;

#[async_trait]
pub trait WorkerExt {
    async fn get_worker_profile(&self, user_id: Uuid) -> Result<Option<Worker>, sqlx::Error>;

    async fn get_worker_by_id(&self, worker_id: Uuid) -> Result<Option<Worker>, sqlx::Error>;

    /// Creates the caller's profile or replaces its editable fields.
    async fn upsert_worker_profile(
        &self,
        user_id: Uuid,
        params: WorkerProfileParams,
    ) -> Result<Worker, sqlx::Error>;

    /// Directory listing ordered by rating (highest first), then name.
    async fn get_workers(
        &self,
        role: Option<WorkerRole>,
        status: Option<WorkerStatus>,
    ) -> Result<Vec<Worker>, sqlx::Error>;

    /// Profiles belonging to `user_id`.
    async fn get_user_workers(&self, user_id: Uuid) -> Result<Vec<Worker>, sqlx::Error>;

    async fn delete_worker(&self, worker_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl WorkerExt for DBClient {
    async fn get_worker_profile(&self, user_id: Uuid) -> Result<Option<Worker>, sqlx::Error> {
        let query = format!("SELECT {} FROM workers WHERE user_id = $1", WORKER_COLUMNS);

        sqlx::query_as::<_, Worker>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_worker_by_id(&self, worker_id: Uuid) -> Result<Option<Worker>, sqlx::Error> {
        let query = format!("SELECT {} FROM workers WHERE id = $1", WORKER_COLUMNS);

        sqlx::query_as::<_, Worker>(&query)
            .bind(worker_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn upsert_worker_profile(
        &self,
        user_id: Uuid,
        params: WorkerProfileParams,
    ) -> Result<Worker, sqlx::Error> {
        let skills = params.skill_keys();
        let query = format!(
            r#"
            INSERT INTO workers
            (user_id, name, phone, role, daily_rate, experience_years, bio, skills, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id) DO UPDATE SET
                name = EXCLUDED.name,
                phone = EXCLUDED.phone,
                role = EXCLUDED.role,
                daily_rate = EXCLUDED.daily_rate,
                experience_years = EXCLUDED.experience_years,
                bio = EXCLUDED.bio,
                skills = EXCLUDED.skills,
                status = EXCLUDED.status,
                updated_at = NOW()
            RETURNING {}
            "#,
            WORKER_COLUMNS
        );

        sqlx::query_as::<_, Worker>(&query)
            .bind(user_id)
            .bind(params.name)
            .bind(params.phone)
            .bind(params.role)
            .bind(params.daily_rate)
            .bind(params.experience_years)
            .bind(params.bio)
            .bind(skills)
            .bind(params.status)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_workers(
        &self,
        role: Option<WorkerRole>,
        status: Option<WorkerStatus>,
    ) -> Result<Vec<Worker>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {} FROM workers
            WHERE ($1::worker_role IS NULL OR role = $1)
              AND ($2::worker_status IS NULL OR status = $2)
            ORDER BY rating DESC, name ASC
            "#,
            WORKER_COLUMNS
        );

        sqlx::query_as::<_, Worker>(&query)
            .bind(role)
            .bind(status)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_user_workers(&self, user_id: Uuid) -> Result<Vec<Worker>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM workers WHERE user_id = $1 ORDER BY name ASC",
            WORKER_COLUMNS
        );

        sqlx::query_as::<_, Worker>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn delete_worker(&self, worker_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM workers WHERE id = $1")
            .bind(worker_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
