use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Extension, Json, Router,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::PaymentExt,
    dtos::{paymentdtos::CreatePaymentDto, ApiResponse},
    error::HttpError,
    middleware::{owned_or_not_found, JWTAuthMiddeware},
    AppState,
};

pub fn payments_handler() -> Router {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/:id", delete(delete_payment))
}

pub async fn list_payments(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let page = app_state
        .dashboard_service
        .payments_page(auth.user.id, Utc::now().date_naive())
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Payments retrieved", page)))
}

pub async fn create_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreatePaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let payment = app_state
        .db_client
        .create_payment(auth.user.id, body.into_new_payment()?)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(payment_id = %payment.id, user_id = %auth.user.id, "payment recorded");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Payment recorded successfully!", payment)),
    ))
}

pub async fn delete_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let payment = app_state
        .db_client
        .get_payment(payment_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let payment = owned_or_not_found(payment, auth.user.id, "Payment")?;

    app_state
        .db_client
        .delete_payment(payment.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::done("Payment deleted successfully!")))
}
