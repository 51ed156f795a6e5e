use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    dtos::{
        jobdtos::{ClockInDto, ClockInResponseDto, ClockOutDto, ClockOutResponseDto, TimeLogListDto},
        non_blank, ApiResponse,
    },
    error::HttpError,
    handler::OptionalJson,
    middleware::JWTAuthMiddeware,
    service::time_service::{ClockInOutcome, ClockOutOutcome},
    AppState,
};

pub fn timelog_handler() -> Router {
    Router::new()
        .route("/clock-in", post(clock_in))
        .route("/clock-out", post(clock_out))
        .route("/time-logs", get(list_time_logs))
}

pub async fn clock_in(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    OptionalJson(body): OptionalJson<ClockInDto>,
) -> Result<impl IntoResponse, HttpError> {
    let now = Utc::now();
    let outcome = app_state
        .time_service
        .clock_in(auth.user.id, body.project_id, now)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(match outcome {
        ClockInOutcome::ClockedIn(log) => ClockInResponseDto {
            status: "success".to_string(),
            message: format!("Clocked in at {}", log.clock_in_time.format("%H:%M:%S")),
            time_log_id: Some(log.id),
        },
        ClockInOutcome::AlreadyClockedIn(_) => ClockInResponseDto {
            status: "info".to_string(),
            message: "Already clocked in".to_string(),
            time_log_id: None,
        },
    }))
}

pub async fn clock_out(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    OptionalJson(body): OptionalJson<ClockOutDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let now = Utc::now();
    let outcome = app_state
        .time_service
        .clock_out(auth.user.id, non_blank(body.notes), now)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(match outcome {
        ClockOutOutcome::ClockedOut(log) => {
            let hours = log.hours_as_f64();
            ClockOutResponseDto {
                status: "success".to_string(),
                message: format!(
                    "Clocked out at {} ({:.2} hrs)",
                    now.format("%H:%M:%S"),
                    hours
                ),
                hours_worked: Some(hours),
            }
        }
        ClockOutOutcome::NoActiveClockIn => ClockOutResponseDto {
            status: "info".to_string(),
            message: "No active clock in found".to_string(),
            hours_worked: None,
        },
    }))
}

pub async fn list_time_logs(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let time_logs = app_state
        .time_service
        .time_logs(auth.user.id)
        .await
        .map_err(HttpError::from)?;
    let total_hours = time_logs.iter().map(|log| log.hours_as_f64()).sum();

    Ok(Json(ApiResponse::success(
        "Time logs retrieved",
        TimeLogListDto {
            time_logs,
            total_hours,
        },
    )))
}
