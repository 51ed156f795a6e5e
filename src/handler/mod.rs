pub mod auth;
pub mod dashboard;
pub mod jobs;
pub mod payments;
pub mod projects;
pub mod schedule;
pub mod staff;
pub mod teams;
pub mod timelog;
pub mod workers;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// JSON body whose fields are all optional: an empty body yields `T::default()`.
/// Malformed JSON is a 400 in the usual error envelope.
pub struct OptionalJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| HttpError::bad_request(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJson(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(OptionalJson)
            .map_err(|e| HttpError::bad_request(format!("Invalid JSON body: {}", e)))
    }
}
