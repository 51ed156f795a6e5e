use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::timelogmodel::TimeLog;

#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct ApplyJobDto {
    #[validate(length(max = 5000, message = "Cover letter must be at most 5000 characters"))]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct RespondApplicationDto {
    /// "accept" or "reject"; absent means accept.
    pub action: Option<String>,

    #[validate(length(max = 5000, message = "Notes must be at most 5000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateApplicationDto {
    #[validate(length(max = 5000, message = "Notes must be at most 5000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ClockInDto {
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct ClockOutDto {
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClockInResponseDto {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_log_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClockOutResponseDto {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_worked: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TimeLogListDto {
    pub time_logs: Vec<TimeLog>,
    pub total_hours: f64,
}
