use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    db::WorkerExt,
    dtos::{workerdtos::UpdateWorkerProfileDto, ApiResponse},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn staff_handler() -> Router {
    Router::new()
        .route("/portal", get(portal))
        .route("/profile", put(update_profile))
        .route("/projects", get(projects))
        .route("/workers", get(workers))
        .route("/schedule", get(schedule))
        .route("/payments", get(payments))
}

pub async fn portal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let portal = app_state
        .dashboard_service
        .staff_portal(auth.user.id, Utc::now())
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        &format!("Welcome, {}", auth.user.display_name()),
        portal,
    )))
}

/// Creates the caller's worker profile on first use.
pub async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateWorkerProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let worker = app_state
        .db_client
        .upsert_worker_profile(auth.user.id, body.into_params()?)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(worker_id = %worker.id, user_id = %auth.user.id, "worker profile saved");

    Ok(Json(ApiResponse::success("Profile updated successfully!", worker)))
}

pub async fn projects(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let page = app_state
        .dashboard_service
        .staff_projects()
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Projects retrieved", page)))
}

pub async fn workers(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let page = app_state
        .dashboard_service
        .staff_workers()
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Workers retrieved", page)))
}

pub async fn schedule(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let page = app_state
        .dashboard_service
        .staff_schedule(Utc::now().date_naive())
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Schedule retrieved", page)))
}

pub async fn payments(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let page = app_state
        .dashboard_service
        .staff_payments()
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Payments retrieved", page)))
}
