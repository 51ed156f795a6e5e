use thiserror::Error;
use uuid::Uuid;

use crate::{error::HttpError, models::jobmodel::ApplicationStatus};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Worker profile not found. Please create your profile first.")]
    WorkerProfileNotFound(Uuid),

    #[error("Project {0} not found")]
    ProjectNotFound(Uuid),

    #[error("Application {0} not found")]
    ApplicationNotFound(Uuid),

    #[error("Application cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("Record {0} was modified by another request, please retry")]
    ConcurrentUpdate(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::WorkerProfileNotFound(_)
            | ServiceError::ProjectNotFound(_)
            | ServiceError::ApplicationNotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::InvalidTransition { .. } => HttpError::bad_request(error.to_string()),

            ServiceError::ConcurrentUpdate(_) => HttpError::conflict(error.to_string()),

            ServiceError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}
