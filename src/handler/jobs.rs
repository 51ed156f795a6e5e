use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{
        jobdtos::{ApplyJobDto, RespondApplicationDto, UpdateApplicationDto},
        non_blank, ApiResponse,
    },
    error::HttpError,
    handler::OptionalJson,
    middleware::JWTAuthMiddeware,
    models::jobmodel::ResponseAction,
    service::job_service::ApplyOutcome,
    AppState,
};

/// Routes for project owners and applicants.
pub fn applications_handler() -> Router {
    Router::new()
        .route("/respond-application/:app_id", post(respond_application))
        .route("/applications/:app_id/complete", post(complete_application))
        .route("/applications/:app_id/cancel", post(cancel_application))
}

/// Staff-only routes.
pub fn apply_handler() -> Router {
    Router::new().route("/apply-job/:project_id", post(apply_for_job))
}

pub async fn apply_for_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(project_id): Path<Uuid>,
    OptionalJson(body): OptionalJson<ApplyJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let outcome = app_state
        .job_service
        .apply(auth.user.id, project_id, non_blank(body.cover_letter))
        .await
        .map_err(HttpError::from)?;

    Ok(Json(match outcome {
        ApplyOutcome::Created(application) => {
            ApiResponse::success("Application submitted", application)
        }
        ApplyOutcome::AlreadyApplied(application) => {
            ApiResponse::info("Already applied for this project", Some(application))
        }
    }))
}

pub async fn respond_application(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(app_id): Path<Uuid>,
    OptionalJson(body): OptionalJson<RespondApplicationDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let action = ResponseAction::from_form(body.action.as_deref());
    let application = app_state
        .job_service
        .respond(auth.user.id, app_id, action, body.notes, Utc::now())
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        &format!("Application {}!", action.past_tense()),
        application,
    )))
}

pub async fn complete_application(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(app_id): Path<Uuid>,
    OptionalJson(body): OptionalJson<UpdateApplicationDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let application = app_state
        .job_service
        .complete(auth.user.id, app_id, non_blank(body.notes))
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Application completed", application)))
}

pub async fn cancel_application(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(app_id): Path<Uuid>,
    OptionalJson(body): OptionalJson<UpdateApplicationDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let application = app_state
        .job_service
        .cancel(auth.user.id, app_id, non_blank(body.notes))
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Application cancelled", application)))
}
