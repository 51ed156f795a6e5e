use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        auth::auth_handler,
        dashboard::dashboard_handler,
        jobs::{applications_handler, apply_handler},
        payments::payments_handler,
        projects::projects_handler,
        schedule::schedule_handler,
        staff::staff_handler,
        teams::teams_handler,
        timelog::timelog_handler,
        workers::workers_handler,
    },
    middleware::{auth, staff_only},
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // worker portal: authenticated staff accounts only
    let staff_routes = Router::new()
        .merge(apply_handler())
        .merge(timelog_handler())
        .nest("/staff", staff_handler())
        .layer(middleware::from_fn(staff_only))
        .layer(middleware::from_fn(auth));

    let client_routes = Router::new()
        .merge(applications_handler())
        .nest("/dashboard", dashboard_handler())
        .nest("/projects", projects_handler())
        .nest("/workers", workers_handler())
        .nest("/payments", payments_handler())
        .nest("/schedule", schedule_handler())
        .nest("/teams", teams_handler())
        .layer(middleware::from_fn(auth));

    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .merge(staff_routes)
        .merge(client_routes)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
