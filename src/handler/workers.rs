use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{delete, get},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    db::WorkerExt,
    dtos::{
        workerdtos::{SkillDto, WorkerFilterQuery},
        ApiResponse,
    },
    error::HttpError,
    middleware::{owned_or_not_found, JWTAuthMiddeware},
    AppState,
};

pub fn workers_handler() -> Router {
    Router::new()
        .route("/", get(list_workers))
        .route("/skills", get(list_skills))
        .route("/:id", delete(delete_worker))
}

pub async fn list_workers(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<WorkerFilterQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let page = app_state
        .dashboard_service
        .workers_page(query.trade()?, query.status()?)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Workers retrieved", page)))
}

pub async fn list_skills() -> impl IntoResponse {
    Json(ApiResponse::success("Skills retrieved", SkillDto::catalogue()))
}

pub async fn delete_worker(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(worker_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let worker = app_state
        .db_client
        .get_worker_by_id(worker_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let worker = owned_or_not_found(worker, auth.user.id, "Worker")?;

    app_state
        .db_client
        .delete_worker(worker.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::done("Worker deleted successfully!")))
}
