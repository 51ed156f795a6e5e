use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    dtos::{non_blank, to_money},
    error::HttpError,
    models::workermodel::{Skill, Worker, WorkerProfileParams, WorkerRole, WorkerStatus},
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateWorkerProfileDto {
    #[validate(length(min = 1, max = 200, message = "Full name must be between 1 and 200 characters"))]
    pub full_name: String,

    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,

    pub trade: WorkerRole,

    #[validate(range(min = 0.0, max = 99999999.99, message = "Daily rate must be a positive amount"))]
    #[serde(default)]
    pub daily_rate: f64,

    #[validate(range(min = 0, max = 70, message = "Experience must be between 0 and 70 years"))]
    pub experience: Option<i32>,

    pub bio: Option<String>,

    #[serde(default)]
    pub status: WorkerStatus,

    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl UpdateWorkerProfileDto {
    pub fn into_params(self) -> Result<WorkerProfileParams, HttpError> {
        Ok(WorkerProfileParams {
            name: self.full_name.trim().to_string(),
            phone: non_blank(self.phone),
            role: self.trade,
            daily_rate: to_money(self.daily_rate)?,
            experience_years: self.experience.unwrap_or(0),
            bio: non_blank(self.bio),
            skills: self.skills,
            status: self.status,
        })
    }
}

/// Query string for the worker directory. Blank values mean "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct WorkerFilterQuery {
    pub trade: Option<String>,
    pub status: Option<String>,
}

impl WorkerFilterQuery {
    pub fn trade(&self) -> Result<Option<WorkerRole>, HttpError> {
        parse_filter(self.trade.as_deref(), "trade")
    }

    pub fn status(&self) -> Result<Option<WorkerStatus>, HttpError> {
        parse_filter(self.status.as_deref(), "status")
    }
}

fn parse_filter<T: serde::de::DeserializeOwned>(
    raw: Option<&str>,
    field: &str,
) -> Result<Option<T>, HttpError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => serde_json::from_value(serde_json::Value::String(value.to_string()))
            .map(Some)
            .map_err(|_| HttpError::bad_request(format!("Unknown {} filter: {}", field, value))),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WorkersPageDto {
    pub workers: Vec<Worker>,
    pub total_workers: usize,
    pub available_workers: usize,
    pub on_project_workers: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SkillDto {
    pub key: String,
    pub name: String,
}

impl SkillDto {
    pub fn catalogue() -> Vec<SkillDto> {
        Skill::ALL
            .iter()
            .map(|skill| SkillDto {
                key: skill.to_str().to_string(),
                name: skill.display_name().to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_blank_means_none() {
        let query = WorkerFilterQuery {
            trade: Some(String::new()),
            status: None,
        };
        assert_eq!(query.trade().unwrap(), None);
        assert_eq!(query.status().unwrap(), None);
    }

    #[test]
    fn test_filter_parses_snake_case_values() {
        let query = WorkerFilterQuery {
            trade: Some("electrician".to_string()),
            status: Some("on_leave".to_string()),
        };
        assert_eq!(query.trade().unwrap(), Some(WorkerRole::Electrician));
        assert_eq!(query.status().unwrap(), Some(WorkerStatus::OnLeave));
    }

    #[test]
    fn test_filter_rejects_unknown_values() {
        let query = WorkerFilterQuery {
            trade: Some("astronaut".to_string()),
            status: None,
        };
        assert!(query.trade().is_err());
    }

    #[test]
    fn test_profile_defaults() {
        let dto: UpdateWorkerProfileDto = serde_json::from_value(serde_json::json!({
            "full_name": "Otieno",
            "trade": "plumber",
            "skills": ["plumbing", "tile_work"]
        }))
        .unwrap();
        assert!(dto.validate().is_ok());

        let params = dto.into_params().unwrap();
        assert_eq!(params.status, WorkerStatus::Available);
        assert_eq!(params.experience_years, 0);
        assert_eq!(params.skill_keys(), vec!["plumbing", "tile_work"]);
    }
}
