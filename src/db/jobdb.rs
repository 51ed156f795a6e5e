use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::DBClient;
use crate::models::jobmodel::{ApplicationStatus, JobApplication};

const APPLICATION_COLUMNS: &str = r#"
    ja.id, ja.worker_id, ja.project_id, ja.status, ja.applied_at, ja.responded_at,
    ja.cover_letter, ja.notes, ja.created_at, ja.updated_at
"#;

#[async_trait]
pub trait JobApplicationExt {
    /// Inserts an application unless one already exists for the pair.
    /// The flag is `true` when this call created the row.
    async fn create_application_if_absent(
        &self,
        worker_id: Uuid,
        project_id: Uuid,
        cover_letter: Option<&str>,
    ) -> Result<(JobApplication, bool), sqlx::Error>;

    async fn get_application(
        &self,
        application_id: Uuid,
    ) -> Result<Option<JobApplication>, sqlx::Error>;

    /// Applications made to any project owned by `owner_id`.
    async fn get_project_owner_applications(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<JobApplication>, sqlx::Error>;

    async fn get_worker_applications(
        &self,
        worker_id: Uuid,
    ) -> Result<Vec<JobApplication>, sqlx::Error>;

    /// Compare-and-set on status. Returns `None` when the row is no longer in `from`.
    /// `None` for `notes` or `responded_at` leaves the stored value untouched.
    async fn update_application_status(
        &self,
        application_id: Uuid,
        from: ApplicationStatus,
        to: ApplicationStatus,
        notes: Option<&str>,
        responded_at: Option<DateTime<Utc>>,
    ) -> Result<Option<JobApplication>, sqlx::Error>;
}

#[async_trait]
impl JobApplicationExt for DBClient {
    async fn create_application_if_absent(
        &self,
        worker_id: Uuid,
        project_id: Uuid,
        cover_letter: Option<&str>,
    ) -> Result<(JobApplication, bool), sqlx::Error> {
        let insert = format!(
            r#"
            INSERT INTO job_applications AS ja (worker_id, project_id, cover_letter)
            VALUES ($1, $2, $3)
            ON CONFLICT (worker_id, project_id) DO NOTHING
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        );

        let created = sqlx::query_as::<_, JobApplication>(&insert)
            .bind(worker_id)
            .bind(project_id)
            .bind(cover_letter)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(application) = created {
            return Ok((application, true));
        }

        let select = format!(
            r#"
            SELECT {} FROM job_applications ja
            WHERE ja.worker_id = $1 AND ja.project_id = $2
            "#,
            APPLICATION_COLUMNS
        );

        let existing = sqlx::query_as::<_, JobApplication>(&select)
            .bind(worker_id)
            .bind(project_id)
            .fetch_one(&self.pool)
            .await?;

        Ok((existing, false))
    }

    async fn get_application(
        &self,
        application_id: Uuid,
    ) -> Result<Option<JobApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM job_applications ja WHERE ja.id = $1",
            APPLICATION_COLUMNS
        );

        sqlx::query_as::<_, JobApplication>(&query)
            .bind(application_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_project_owner_applications(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<JobApplication>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {} FROM job_applications ja
            JOIN projects p ON p.id = ja.project_id
            WHERE p.user_id = $1
            ORDER BY ja.applied_at DESC
            "#,
            APPLICATION_COLUMNS
        );

        sqlx::query_as::<_, JobApplication>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_worker_applications(
        &self,
        worker_id: Uuid,
    ) -> Result<Vec<JobApplication>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {} FROM job_applications ja
            WHERE ja.worker_id = $1
            ORDER BY ja.applied_at DESC
            "#,
            APPLICATION_COLUMNS
        );

        sqlx::query_as::<_, JobApplication>(&query)
            .bind(worker_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn update_application_status(
        &self,
        application_id: Uuid,
        from: ApplicationStatus,
        to: ApplicationStatus,
        notes: Option<&str>,
        responded_at: Option<DateTime<Utc>>,
    ) -> Result<Option<JobApplication>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE job_applications AS ja
            SET status = $3,
                notes = COALESCE($4, ja.notes),
                responded_at = COALESCE($5, ja.responded_at),
                updated_at = NOW()
            WHERE ja.id = $1 AND ja.status = $2
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        );

        sqlx::query_as::<_, JobApplication>(&query)
            .bind(application_id)
            .bind(from)
            .bind(to)
            .bind(notes)
            .bind(responded_at)
            .fetch_optional(&self.pool)
            .await
    }
}
