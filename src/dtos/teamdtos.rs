use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::teammodel::TeamRole;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTeamDto {
    #[validate(length(min = 1, max = 200, message = "Team name must be between 1 and 200 characters"))]
    pub name: String,

    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTeamMemberDto {
    pub user_id: Uuid,

    #[serde(default)]
    pub role: TeamRole,
}
