use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;

use crate::models::{
    jobmodel::JobApplication, paymentmodel::Payment, projectmodel::Project, taskmodel::Task,
    timelogmodel::TimeLog, workermodel::Worker,
};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub planning: usize,
    pub total_budget: BigDecimal,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerStats {
    pub total: usize,
    pub available: usize,
    pub busy: usize,
    pub inactive: usize,
    pub on_leave: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStats {
    pub monthly_total: BigDecimal,
    pub total_received: BigDecimal,
    pub total_paid: BigDecimal,
    pub total_completed: BigDecimal,
    pub total_pending: BigDecimal,
    pub total_cancelled: BigDecimal,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStats {
    /// Tasks dated in the Monday to Sunday week containing today.
    pub this_week: usize,
    /// Incomplete tasks in the current week.
    pub this_week_open: usize,
    pub overdue: usize,
    pub upcoming: usize,
    pub completed: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardDto {
    pub project_stats: ProjectStats,
    pub worker_stats: WorkerStats,
    pub payment_stats: PaymentStats,
    pub task_stats: TaskStats,
    pub recent_projects: Vec<Project>,
    pub recent_payments: Vec<Payment>,
    pub upcoming_tasks: Vec<Task>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StaffPortalDto {
    pub worker_profile: Option<Worker>,
    pub available_jobs: Vec<Project>,
    pub other_workers: Vec<Worker>,
    pub tasks: Vec<Task>,
    pub applications: Vec<JobApplication>,
    pub open_time_log: Option<TimeLog>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StaffProjectsDto {
    pub projects: Vec<Project>,
    pub active_projects: usize,
    pub completed_projects: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StaffWorkersDto {
    pub workers: Vec<Worker>,
    pub total_workers: usize,
    pub available_workers: usize,
    pub busy_workers: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StaffScheduleDto {
    pub tasks: Vec<Task>,
    pub upcoming_tasks: usize,
    pub overdue_tasks: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StaffPaymentsDto {
    pub payments: Vec<Payment>,
    pub total_received: BigDecimal,
    pub total_paid: BigDecimal,
}
