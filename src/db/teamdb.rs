use async_trait::async_trait;
use uuid::Uuid;

use super::DBClient;
use crate::models::teammodel::{Team, TeamMember, TeamRole};

#[async_trait]
pub trait TeamExt {
    async fn create_team(
        &self,
        owner_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Team, sqlx::Error>;

    async fn get_team(&self, team_id: Uuid) -> Result<Option<Team>, sqlx::Error>;

    async fn get_user_teams(&self, owner_id: Uuid) -> Result<Vec<Team>, sqlx::Error>;

    /// Returns `None` when the user is already on the team.
    async fn add_team_member(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<Option<TeamMember>, sqlx::Error>;

    async fn get_team_members(&self, team_id: Uuid) -> Result<Vec<TeamMember>, sqlx::Error>;
}

#[async_trait]
impl TeamExt for DBClient {
    async fn create_team(
        &self,
        owner_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Team, sqlx::Error> {
        sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (owner_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, name, description, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_team(&self, team_id: Uuid) -> Result<Option<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>(
            r#"
            SELECT id, owner_id, name, description, created_at, updated_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_user_teams(&self, owner_id: Uuid) -> Result<Vec<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>(
            r#"
            SELECT id, owner_id, name, description, created_at, updated_at
            FROM teams
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn add_team_member(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        sqlx::query_as::<_, TeamMember>(
            r#"
            INSERT INTO team_members (team_id, user_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (team_id, user_id) DO NOTHING
            RETURNING id, team_id, user_id, role, is_active, created_at, updated_at
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_team_members(&self, team_id: Uuid) -> Result<Vec<TeamMember>, sqlx::Error> {
        sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT id, team_id, user_id, role, is_active, created_at, updated_at
            FROM team_members
            WHERE team_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
    }
}
