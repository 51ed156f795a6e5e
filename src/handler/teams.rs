use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{TeamExt, UserExt},
    dtos::{
        non_blank,
        teamdtos::{AddTeamMemberDto, CreateTeamDto},
        ApiResponse,
    },
    error::HttpError,
    middleware::{owned_or_not_found, JWTAuthMiddeware},
    models::teammodel::{Team, TeamMember},
    AppState,
};

pub fn teams_handler() -> Router {
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/:id/members", get(list_members).post(add_member))
}

pub async fn list_teams(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let teams = app_state
        .db_client
        .get_user_teams(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Teams retrieved", teams)))
}

pub async fn create_team(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateTeamDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let description = non_blank(body.description);
    let team = app_state
        .db_client
        .create_team(auth.user.id, body.name.trim(), description.as_deref())
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Team created successfully!", team)),
    ))
}

pub async fn list_members(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(team_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let team = owned_team(&app_state, &auth, team_id).await?;
    let members = app_state
        .db_client
        .get_team_members(team.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success("Team members retrieved", members)))
}

pub async fn add_member(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(team_id): Path<Uuid>,
    Json(body): Json<AddTeamMemberDto>,
) -> Result<Response, HttpError> {
    let team = owned_team(&app_state, &auth, team_id).await?;

    app_state
        .db_client
        .get_user(Some(body.user_id), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let member = app_state
        .db_client
        .add_team_member(team.id, body.user_id, body.role)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(match member {
        Some(member) => (
            StatusCode::CREATED,
            Json(ApiResponse::success("Member added to team", member)),
        )
            .into_response(),
        None => Json(ApiResponse::<TeamMember>::info(
            "User is already a member of this team",
            None,
        ))
        .into_response(),
    })
}

async fn owned_team(
    app_state: &AppState,
    auth: &JWTAuthMiddeware,
    team_id: Uuid,
) -> Result<Team, HttpError> {
    let team = app_state
        .db_client
        .get_team(team_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    owned_or_not_found(team, auth.user.id, "Team")
}
