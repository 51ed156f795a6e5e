use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    dtos::{non_blank, to_money},
    error::HttpError,
    models::{
        jobmodel::JobApplication,
        projectmodel::{NewProject, Project, ProjectStatus},
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_project_dates", skip_on_field_errors = false))]
pub struct CreateProjectDto {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 200, message = "Client name must be at most 200 characters"))]
    pub client_name: Option<String>,

    #[validate(length(max = 20, message = "Client phone must be at most 20 characters"))]
    pub client_phone: Option<String>,

    #[validate(range(min = 0.0, max = 9999999999.99, message = "Budget must be a positive amount"))]
    #[serde(default)]
    pub budget: f64,

    pub description: Option<String>,

    #[serde(default)]
    pub status: ProjectStatus,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    #[validate(range(min = 0, max = 100, message = "Progress must be between 0 and 100"))]
    #[serde(default)]
    pub progress: i32,

    pub team_id: Option<Uuid>,
}

fn validate_project_dates(dto: &CreateProjectDto) -> Result<(), ValidationError> {
    match (dto.start_date, dto.end_date) {
        (Some(start), Some(end)) if end < start => {
            let mut error = ValidationError::new("date_range");
            error.message = Some("End date cannot be before start date".into());
            Err(error)
        }
        _ => Ok(()),
    }
}

impl CreateProjectDto {
    pub fn into_new_project(self) -> Result<NewProject, HttpError> {
        Ok(NewProject {
            team_id: self.team_id,
            name: self.name.trim().to_string(),
            location: non_blank(self.location),
            client_name: non_blank(self.client_name),
            client_phone: non_blank(self.client_phone),
            budget: to_money(self.budget)?,
            description: non_blank(self.description),
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            progress: self.progress,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectsPageDto {
    pub projects: Vec<Project>,
    pub applications: Vec<JobApplication>,
    pub total_projects: usize,
    pub active_projects: usize,
    pub planning_projects: usize,
    pub completed_projects: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CreateProjectDto {
        CreateProjectDto {
            name: "Kilimani apartments".to_string(),
            location: Some("Nairobi".to_string()),
            client_name: None,
            client_phone: Some(" ".to_string()),
            budget: 250000.0,
            description: None,
            status: ProjectStatus::Active,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 6),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30),
            progress: 10,
            team_id: None,
        }
    }

    #[test]
    fn test_valid_project() {
        assert!(dto().validate().is_ok());
        let project = dto().into_new_project().unwrap();
        assert_eq!(project.client_phone, None);
        assert_eq!(project.status, ProjectStatus::Active);
    }

    #[test]
    fn test_progress_out_of_range() {
        let mut invalid = dto();
        invalid.progress = 101;
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut invalid = dto();
        invalid.end_date = NaiveDate::from_ymd_opt(2024, 12, 31);
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_negative_budget_is_rejected() {
        let mut invalid = dto();
        invalid.budget = -1.0;
        assert!(invalid.validate().is_err());
    }
}
