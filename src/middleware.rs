use std::sync::Arc;

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::IntoResponse,
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::UserExt,
    error::{ErrorMessage, HttpError},
    models::{usermodel::User, Owned},
    utils::token,
    AppState,
};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JWTAuthMiddeware {
    pub user: User,
}

pub async fn auth(
    cookie_jar: CookieJar,
    Extension(app_state): Extension<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let cookies = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
                .map(|token| token.to_owned())
        });

    let token = cookies
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::TokenNotProvided.to_string()))?;

    let token_details = token::decode_token(token, app_state.env.jwt_secret.as_bytes())
        .map_err(|_| HttpError::unauthorized(ErrorMessage::InvalidToken.to_string()))?;

    let user_id = Uuid::parse_str(&token_details)
        .map_err(|_| HttpError::unauthorized(ErrorMessage::InvalidToken.to_string()))?;

    let user = app_state
        .db_client
        .get_user(Some(user_id), None, None)
        .await
        .map_err(|_| HttpError::unauthorized(ErrorMessage::UserNoLongerExist.to_string()))?
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::UserNoLongerExist.to_string()))?;

    req.extensions_mut().insert(JWTAuthMiddeware { user });

    Ok(next.run(req).await)
}

/// Runs after `auth`; lets only staff accounts through.
pub async fn staff_only(req: Request, next: Next) -> Result<impl IntoResponse, HttpError> {
    let auth = req
        .extensions()
        .get::<JWTAuthMiddeware>()
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::UserNotAuthenticated.to_string()))?;

    if !auth.user.is_staff {
        return Err(HttpError::forbidden(
            ErrorMessage::StaffAccessRequired.to_string(),
        ));
    }

    Ok(next.run(req).await)
}

/// Ownership guard: a record owned by someone else is reported as missing.
pub fn owned_or_not_found<T: Owned>(
    record: Option<T>,
    user_id: Uuid,
    what: &str,
) -> Result<T, HttpError> {
    match record {
        Some(record) if record.is_owned_by(user_id) => Ok(record),
        _ => Err(HttpError::not_found(format!("{} not found", what))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::teammodel::Team;
    use axum::http::StatusCode;
    use chrono::Utc;

    fn team(owner_id: Uuid) -> Team {
        Team {
            id: Uuid::new_v4(),
            owner_id,
            name: "Roofing crew".to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_passes_guard() {
        let owner = Uuid::new_v4();
        let record = owned_or_not_found(Some(team(owner)), owner, "Team").unwrap();
        assert_eq!(record.owner_id, owner);
    }

    #[test]
    fn test_other_users_and_missing_records_look_the_same() {
        let owner = Uuid::new_v4();

        let foreign = owned_or_not_found(Some(team(owner)), Uuid::new_v4(), "Team").unwrap_err();
        let missing = owned_or_not_found::<Team>(None, owner, "Team").unwrap_err();

        assert_eq!(foreign.status, StatusCode::NOT_FOUND);
        assert_eq!(foreign.message, missing.message);
    }
}
