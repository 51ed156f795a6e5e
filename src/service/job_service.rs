use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    db::{JobApplicationExt, ProjectExt, SiteStore, WorkerExt},
    models::{
        jobmodel::{ApplicationStatus, JobApplication, ResponseAction},
        Owned,
    },
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub enum ApplyOutcome {
    Created(JobApplication),
    AlreadyApplied(JobApplication),
}

impl ApplyOutcome {
    pub fn application(&self) -> &JobApplication {
        match self {
            ApplyOutcome::Created(application) | ApplyOutcome::AlreadyApplied(application) => {
                application
            }
        }
    }
}

#[derive(Clone)]
pub struct JobService {
    db_client: Arc<dyn SiteStore>,
}

impl JobService {
    pub fn new(db_client: Arc<dyn SiteStore>) -> Self {
        Self { db_client }
    }

    /// Applies the caller's worker profile to a project. Applying twice is not an error.
    pub async fn apply(
        &self,
        user_id: Uuid,
        project_id: Uuid,
        cover_letter: Option<String>,
    ) -> Result<ApplyOutcome, ServiceError> {
        let worker = self
            .db_client
            .get_worker_profile(user_id)
            .await?
            .ok_or(ServiceError::WorkerProfileNotFound(user_id))?;

        let project = self
            .db_client
            .get_project(project_id)
            .await?
            .ok_or(ServiceError::ProjectNotFound(project_id))?;

        let (application, created) = self
            .db_client
            .create_application_if_absent(worker.id, project.id, cover_letter.as_deref())
            .await?;

        if created {
            tracing::info!(
                application_id = %application.id,
                worker_id = %worker.id,
                project_id = %project.id,
                "job application submitted"
            );
            Ok(ApplyOutcome::Created(application))
        } else {
            tracing::debug!(application_id = %application.id, "duplicate job application ignored");
            Ok(ApplyOutcome::AlreadyApplied(application))
        }
    }

    /// Project owner accepts or rejects a pending application.
    pub async fn respond(
        &self,
        owner_id: Uuid,
        application_id: Uuid,
        action: ResponseAction,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<JobApplication, ServiceError> {
        let application = self.owned_application(owner_id, application_id).await?;

        // a response always replaces the notes, blank when none are given
        let notes = notes.unwrap_or_default();
        let updated = self
            .transition(&application, action.target_status(), Some(&notes), Some(now))
            .await?;

        tracing::info!(
            application_id = %updated.id,
            status = updated.status.to_str(),
            "job application answered"
        );
        Ok(updated)
    }

    /// Project owner closes out an accepted engagement.
    pub async fn complete(
        &self,
        owner_id: Uuid,
        application_id: Uuid,
        notes: Option<String>,
    ) -> Result<JobApplication, ServiceError> {
        let application = self.owned_application(owner_id, application_id).await?;
        self.transition(&application, ApplicationStatus::Completed, notes.as_deref(), None)
            .await
    }

    /// Either side may call off an accepted engagement.
    pub async fn cancel(
        &self,
        user_id: Uuid,
        application_id: Uuid,
        notes: Option<String>,
    ) -> Result<JobApplication, ServiceError> {
        let application = self
            .db_client
            .get_application(application_id)
            .await?
            .ok_or(ServiceError::ApplicationNotFound(application_id))?;

        let is_owner = self
            .db_client
            .get_project(application.project_id)
            .await?
            .map_or(false, |project| project.is_owned_by(user_id));

        let is_applicant = self
            .db_client
            .get_worker_by_id(application.worker_id)
            .await?
            .map_or(false, |worker| worker.is_owned_by(user_id));

        if !is_owner && !is_applicant {
            return Err(ServiceError::ApplicationNotFound(application_id));
        }

        self.transition(&application, ApplicationStatus::Cancelled, notes.as_deref(), None)
            .await
    }

    /// Anyone other than the project owner sees the application as missing.
    async fn owned_application(
        &self,
        owner_id: Uuid,
        application_id: Uuid,
    ) -> Result<JobApplication, ServiceError> {
        let application = self
            .db_client
            .get_application(application_id)
            .await?
            .ok_or(ServiceError::ApplicationNotFound(application_id))?;

        let project = self.db_client.get_project(application.project_id).await?;
        match project {
            Some(project) if project.is_owned_by(owner_id) => Ok(application),
            _ => Err(ServiceError::ApplicationNotFound(application_id)),
        }
    }

    async fn transition(
        &self,
        application: &JobApplication,
        to: ApplicationStatus,
        notes: Option<&str>,
        responded_at: Option<DateTime<Utc>>,
    ) -> Result<JobApplication, ServiceError> {
        if !application.status.can_transition_to(to) {
            return Err(ServiceError::InvalidTransition {
                from: application.status,
                to,
            });
        }

        self.db_client
            .update_application_status(application.id, application.status, to, notes, responded_at)
            .await?
            .ok_or(ServiceError::ConcurrentUpdate(application.id))
    }
}
