use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{ProjectExt, TaskExt},
    dtos::{
        taskdtos::{CreateTaskDto, TaskCompletionDto},
        ApiResponse,
    },
    error::HttpError,
    middleware::{owned_or_not_found, JWTAuthMiddeware},
    models::taskmodel::Task,
    AppState,
};

pub fn schedule_handler() -> Router {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/:id", delete(delete_task))
        .route("/:id/complete", post(complete_task))
        .route("/:id/completion", put(set_task_completion))
}

pub async fn list_tasks(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let page = app_state
        .dashboard_service
        .schedule_page(auth.user.id, Utc::now().date_naive())
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Schedule retrieved", page)))
}

pub async fn create_task(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateTaskDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if let Some(project_id) = body.project {
        let project = app_state
            .db_client
            .get_project(project_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
        owned_or_not_found(project, auth.user.id, "Project")?;
    }

    let task = app_state
        .db_client
        .create_task(auth.user.id, body.into_new_task())
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Task added successfully!", task)),
    ))
}

pub async fn delete_task(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let task = owned_task(&app_state, &auth, task_id).await?;

    app_state
        .db_client
        .delete_task(task.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::done("Task deleted successfully!")))
}

pub async fn complete_task(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let task = save_completion(&app_state, &auth, task_id, true).await?;
    Ok(Json(ApiResponse::success("Task marked as completed!", task)))
}

pub async fn set_task_completion(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(task_id): Path<Uuid>,
    Json(body): Json<TaskCompletionDto>,
) -> Result<impl IntoResponse, HttpError> {
    let task = save_completion(&app_state, &auth, task_id, body.completed).await?;
    let message = if task.completed {
        "Task marked as completed!"
    } else {
        "Task reopened"
    };
    Ok(Json(ApiResponse::success(message, task)))
}

async fn owned_task(
    app_state: &AppState,
    auth: &JWTAuthMiddeware,
    task_id: Uuid,
) -> Result<Task, HttpError> {
    let task = app_state
        .db_client
        .get_task(task_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    owned_or_not_found(task, auth.user.id, "Task")
}

async fn save_completion(
    app_state: &AppState,
    auth: &JWTAuthMiddeware,
    task_id: Uuid,
    completed: bool,
) -> Result<Task, HttpError> {
    let mut task = owned_task(app_state, auth, task_id).await?;
    task.set_completed(completed, Utc::now());

    app_state
        .db_client
        .save_task_completion(&task)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))
}
