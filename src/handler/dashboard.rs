use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};
use chrono::Utc;

use crate::{dtos::ApiResponse, error::HttpError, middleware::JWTAuthMiddeware, AppState};

pub fn dashboard_handler() -> Router {
    Router::new().route("/", get(get_dashboard))
}

pub async fn get_dashboard(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let dashboard = app_state
        .dashboard_service
        .dashboard(auth.user.id, Utc::now().date_naive())
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Dashboard retrieved", dashboard)))
}
