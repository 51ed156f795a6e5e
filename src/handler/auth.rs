use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::{
    db::UserExt,
    dtos::{
        non_blank,
        userdtos::{
            FilterUserDto, LoginUserDto, RegisterUserDto, Response, UserData, UserLoginResponseDto,
            UserResponseDto,
        },
    },
    error::{ErrorMessage, HttpError},
    models::usermodel::User,
    utils::{password, token},
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/staff/login", post(staff_login))
        .route("/logout", post(logout))
}

pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let username = body.username.trim();

    let existing = app_state
        .db_client
        .get_user(None, Some(username), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    if existing.is_some() {
        return Err(HttpError::unique_constraint_violation(
            ErrorMessage::UsernameExist.to_string(),
        ));
    }

    let existing = app_state
        .db_client
        .get_user(None, None, Some(&body.email))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    if existing.is_some() {
        return Err(HttpError::unique_constraint_violation(
            ErrorMessage::EmailExist.to_string(),
        ));
    }

    let hashed_password =
        password::hash(&body.password).map_err(|e| HttpError::server_error(e.to_string()))?;
    let full_name = non_blank(body.full_name);

    let user = app_state
        .db_client
        .save_user(
            username,
            &body.email,
            &hashed_password,
            full_name.as_deref(),
            body.is_staff,
        )
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                HttpError::unique_constraint_violation(ErrorMessage::UsernameExist.to_string())
            }
            _ => HttpError::server_error(e.to_string()),
        })?;

    tracing::info!(user_id = %user.id, is_staff = user.is_staff, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(UserResponseDto {
            status: "success".to_string(),
            data: UserData {
                user: FilterUserDto::filter_user(&user),
            },
        }),
    ))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    let user = authenticate(&app_state, body).await?;
    session_response(&app_state, &user, "Login successful")
}

/// Same as `login`, but only for accounts with worker portal access.
pub async fn staff_login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    let user = authenticate(&app_state, body).await?;

    if !user.is_staff {
        return Err(HttpError::forbidden(
            ErrorMessage::StaffAccessRequired.to_string(),
        ));
    }

    session_response(
        &app_state,
        &user,
        &format!("Welcome back, {}!", user.display_name()),
    )
}

pub async fn logout() -> Result<impl IntoResponse, HttpError> {
    let cookie = Cookie::build(("token", ""))
        .path("/")
        .max_age(time::Duration::minutes(-1))
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error("Failed to build session cookie"))?,
    );

    let mut response = Json(Response {
        status: "success",
        message: "Logged out".to_string(),
    })
    .into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}

async fn authenticate(app_state: &AppState, body: LoginUserDto) -> Result<User, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let identifier = body.username.trim();
    let mut result = app_state
        .db_client
        .get_user(None, Some(identifier), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if result.is_none() && identifier.contains('@') {
        result = app_state
            .db_client
            .get_user(None, None, Some(identifier))
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
    }

    let user = result
        .ok_or_else(|| HttpError::bad_request(ErrorMessage::WrongCredentials.to_string()))?;

    let password_matched = password::compare(&body.password, &user.password)
        .map_err(|_| HttpError::bad_request(ErrorMessage::WrongCredentials.to_string()))?;

    if !password_matched {
        tracing::debug!(username = identifier, "rejected login attempt");
        return Err(HttpError::bad_request(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    Ok(user)
}

fn session_response(
    app_state: &AppState,
    user: &User,
    message: &str,
) -> Result<axum::response::Response, HttpError> {
    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(time::Duration::minutes(app_state.env.jwt_maxage))
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error("Failed to build session cookie"))?,
    );

    let mut response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        message: message.to_string(),
        token,
    })
    .into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}
