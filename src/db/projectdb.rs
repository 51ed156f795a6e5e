use async_trait::async_trait;
use uuid::Uuid;

use super::DBClient;
use crate::models::projectmodel::{NewProject, Project, ProjectStatus};

const PROJECT_COLUMNS: &str = r#"
    id, user_id, team_id, name, location, client_name, client_phone, budget,
    description, status, start_date, end_date, progress, created_at, updated_at
"#;

#[async_trait]
pub trait ProjectExt {
    async fn create_project(
        &self,
        user_id: Uuid,
        project: NewProject,
    ) -> Result<Project, sqlx::Error>;

    async fn get_project(&self, project_id: Uuid) -> Result<Option<Project>, sqlx::Error>;

    /// Projects owned by `user_id`, newest first.
    async fn get_user_projects(&self, user_id: Uuid) -> Result<Vec<Project>, sqlx::Error>;

    /// Every project, optionally restricted to one status, newest first.
    async fn get_projects(
        &self,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<Project>, sqlx::Error>;

    async fn delete_project(&self, project_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl ProjectExt for DBClient {
    async fn create_project(
        &self,
        user_id: Uuid,
        project: NewProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO projects
            (user_id, team_id, name, location, client_name, client_phone, budget,
             description, status, start_date, end_date, progress)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            PROJECT_COLUMNS
        );

        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(project.team_id)
            .bind(project.name)
            .bind(project.location)
            .bind(project.client_name)
            .bind(project.client_phone)
            .bind(project.budget)
            .bind(project.description)
            .bind(project.status)
            .bind(project.start_date)
            .bind(project.end_date)
            .bind(project.progress)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_project(&self, project_id: Uuid) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {} FROM projects WHERE id = $1", PROJECT_COLUMNS);

        sqlx::query_as::<_, Project>(&query)
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_user_projects(&self, user_id: Uuid) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM projects WHERE user_id = $1 ORDER BY created_at DESC",
            PROJECT_COLUMNS
        );

        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_projects(
        &self,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {} FROM projects
            WHERE ($1::project_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
            PROJECT_COLUMNS
        );

        sqlx::query_as::<_, Project>(&query)
            .bind(status)
            .fetch_all(&self.pool)
            .await
    }

    async fn delete_project(&self, project_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
