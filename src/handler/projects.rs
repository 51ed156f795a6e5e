use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{ProjectExt, TeamExt},
    dtos::{projectdtos::CreateProjectDto, ApiResponse},
    error::HttpError,
    middleware::{owned_or_not_found, JWTAuthMiddeware},
    AppState,
};

pub fn projects_handler() -> Router {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/:id", delete(delete_project))
}

pub async fn list_projects(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let page = app_state
        .dashboard_service
        .projects_page(auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Projects retrieved", page)))
}

pub async fn create_project(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateProjectDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if let Some(team_id) = body.team_id {
        let team = app_state
            .db_client
            .get_team(team_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        owned_or_not_found(team, auth.user.id, "Team")?;
    }

    let new_project = body.into_new_project()?;
    let project = app_state
        .db_client
        .create_project(auth.user.id, new_project)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(project_id = %project.id, user_id = %auth.user.id, "project created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Project created successfully!", project)),
    ))
}

pub async fn delete_project(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let project = app_state
        .db_client
        .get_project(project_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let project = owned_or_not_found(project, auth.user.id, "Project")?;

    app_state
        .db_client
        .delete_project(project.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::done("Project deleted successfully!")))
}
