use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::DBClient;
use crate::models::timelogmodel::TimeLog;

const TIME_LOG_COLUMNS: &str = r#"
    id, worker_id, project_id, log_date, clock_in_time, clock_out_time,
    hours_worked, notes, created_at, updated_at
"#;

#[async_trait]
pub trait TimeLogExt {
    /// Opens a session. Returns `None` if the worker already has an open log for `log_date`.
    async fn create_time_log(
        &self,
        worker_id: Uuid,
        project_id: Option<Uuid>,
        log_date: NaiveDate,
        clock_in_time: DateTime<Utc>,
    ) -> Result<Option<TimeLog>, sqlx::Error>;

    /// All sessions of the worker without a clock-out, oldest first.
    async fn get_open_time_logs(&self, worker_id: Uuid) -> Result<Vec<TimeLog>, sqlx::Error>;

    /// Writes the closing fields of `log`. Returns `None` if it was already closed.
    async fn save_clock_out(&self, log: &TimeLog) -> Result<Option<TimeLog>, sqlx::Error>;

    async fn get_worker_time_logs(
        &self,
        worker_id: Uuid,
        limit: i64,
    ) -> Result<Vec<TimeLog>, sqlx::Error>;
}

#[async_trait]
impl TimeLogExt for DBClient {
    async fn create_time_log(
        &self,
        worker_id: Uuid,
        project_id: Option<Uuid>,
        log_date: NaiveDate,
        clock_in_time: DateTime<Utc>,
    ) -> Result<Option<TimeLog>, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO time_logs (worker_id, project_id, log_date, clock_in_time)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (worker_id, log_date) WHERE clock_out_time IS NULL DO NOTHING
            RETURNING {}
            "#,
            TIME_LOG_COLUMNS
        );

        sqlx::query_as::<_, TimeLog>(&query)
            .bind(worker_id)
            .bind(project_id)
            .bind(log_date)
            .bind(clock_in_time)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_open_time_logs(&self, worker_id: Uuid) -> Result<Vec<TimeLog>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {} FROM time_logs
            WHERE worker_id = $1 AND clock_out_time IS NULL
            ORDER BY log_date ASC, clock_in_time ASC
            "#,
            TIME_LOG_COLUMNS
        );

        sqlx::query_as::<_, TimeLog>(&query)
            .bind(worker_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn save_clock_out(&self, log: &TimeLog) -> Result<Option<TimeLog>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE time_logs
            SET clock_out_time = $2, hours_worked = $3, notes = $4, updated_at = $5
            WHERE id = $1 AND clock_out_time IS NULL
            RETURNING {}
            "#,
            TIME_LOG_COLUMNS
        );

        sqlx::query_as::<_, TimeLog>(&query)
            .bind(log.id)
            .bind(log.clock_out_time)
            .bind(log.hours_worked.clone())
            .bind(log.notes.as_deref())
            .bind(log.updated_at)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_worker_time_logs(
        &self,
        worker_id: Uuid,
        limit: i64,
    ) -> Result<Vec<TimeLog>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {} FROM time_logs
            WHERE worker_id = $1
            ORDER BY log_date DESC, clock_in_time DESC
            LIMIT $2
            "#,
            TIME_LOG_COLUMNS
        );

        sqlx::query_as::<_, TimeLog>(&query)
            .bind(worker_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }
}
