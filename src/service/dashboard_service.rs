use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use sqlx::types::BigDecimal;
use uuid::Uuid;

use crate::{
    db::{JobApplicationExt, PaymentExt, ProjectExt, SiteStore, TaskExt, TimeLogExt, WorkerExt},
    dtos::{
        dashboarddtos::*, paymentdtos::PaymentsPageDto, projectdtos::ProjectsPageDto,
        taskdtos::SchedulePageDto, workerdtos::WorkersPageDto,
    },
    models::{
        paymentmodel::{Payment, PaymentStatus, PaymentType},
        projectmodel::{Project, ProjectStatus},
        taskmodel::Task,
        workermodel::{Worker, WorkerRole, WorkerStatus},
    },
    service::error::ServiceError,
};

const RECENT_PROJECTS: usize = 3;
const RECENT_PAYMENTS: usize = 4;
const UPCOMING_TASKS: usize = 3;

/// Monday and Sunday of the week containing `today`.
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    (start, start + Duration::days(6))
}

fn total<'a>(amounts: impl Iterator<Item = &'a BigDecimal>) -> BigDecimal {
    amounts.fold(BigDecimal::from(0), |acc, amount| acc + amount)
}

pub fn project_stats(projects: &[Project]) -> ProjectStats {
    let count = |status: ProjectStatus| projects.iter().filter(|p| p.status == status).count();

    ProjectStats {
        total: projects.len(),
        active: count(ProjectStatus::Active),
        completed: count(ProjectStatus::Completed),
        planning: count(ProjectStatus::Planning),
        total_budget: total(projects.iter().map(|p| &p.budget)),
    }
}

pub fn worker_stats(workers: &[Worker]) -> WorkerStats {
    let count = |status: WorkerStatus| workers.iter().filter(|w| w.status == status).count();

    WorkerStats {
        total: workers.len(),
        available: count(WorkerStatus::Available),
        busy: count(WorkerStatus::Busy),
        inactive: count(WorkerStatus::Inactive),
        on_leave: count(WorkerStatus::OnLeave),
    }
}

pub fn payment_stats(payments: &[Payment], today: NaiveDate) -> PaymentStats {
    let by_type = |kind: PaymentType| {
        total(
            payments
                .iter()
                .filter(|p| p.payment_type == kind)
                .map(|p| &p.amount),
        )
    };
    let by_status = |status: PaymentStatus| {
        total(
            payments
                .iter()
                .filter(|p| p.status == status)
                .map(|p| &p.amount),
        )
    };
    let this_month = |date: &NaiveDate| date.year() == today.year() && date.month() == today.month();

    PaymentStats {
        monthly_total: total(
            payments
                .iter()
                .filter(|p| p.payment_date.as_ref().map_or(false, this_month))
                .map(|p| &p.amount),
        ),
        total_received: by_type(PaymentType::Received),
        total_paid: by_type(PaymentType::Paid),
        total_completed: by_status(PaymentStatus::Completed),
        total_pending: by_status(PaymentStatus::Pending),
        total_cancelled: by_status(PaymentStatus::Cancelled),
    }
}

pub fn task_stats(tasks: &[Task], today: NaiveDate) -> TaskStats {
    let (week_start, week_end) = week_bounds(today);
    let in_week = |task: &&Task| task.task_date >= week_start && task.task_date <= week_end;

    TaskStats {
        this_week: tasks.iter().filter(in_week).count(),
        this_week_open: tasks.iter().filter(in_week).filter(|t| !t.completed).count(),
        overdue: tasks.iter().filter(|t| t.is_overdue(today)).count(),
        upcoming: tasks.iter().filter(|t| t.is_upcoming(today)).count(),
        completed: tasks.iter().filter(|t| t.completed).count(),
    }
}

#[derive(Clone)]
pub struct DashboardService {
    db_client: Arc<dyn SiteStore>,
}

impl DashboardService {
    pub fn new(db_client: Arc<dyn SiteStore>) -> Self {
        Self { db_client }
    }

    /// Everything on the client dashboard, scoped to `user_id`.
    pub async fn dashboard(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<DashboardDto, ServiceError> {
        let projects = self.db_client.get_user_projects(user_id).await?;
        let workers = self.db_client.get_user_workers(user_id).await?;
        let payments = self.db_client.get_user_payments(user_id).await?;
        let tasks = self.db_client.get_user_tasks(user_id).await?;

        Ok(DashboardDto {
            project_stats: project_stats(&projects),
            worker_stats: worker_stats(&workers),
            payment_stats: payment_stats(&payments, today),
            task_stats: task_stats(&tasks, today),
            recent_projects: projects.into_iter().take(RECENT_PROJECTS).collect(),
            recent_payments: payments.into_iter().take(RECENT_PAYMENTS).collect(),
            upcoming_tasks: tasks
                .into_iter()
                .filter(|t| t.is_upcoming(today))
                .take(UPCOMING_TASKS)
                .collect(),
        })
    }

    pub async fn projects_page(&self, user_id: Uuid) -> Result<ProjectsPageDto, ServiceError> {
        let projects = self.db_client.get_user_projects(user_id).await?;
        let applications = self.db_client.get_project_owner_applications(user_id).await?;
        let stats = project_stats(&projects);

        Ok(ProjectsPageDto {
            projects,
            applications,
            total_projects: stats.total,
            active_projects: stats.active,
            planning_projects: stats.planning,
            completed_projects: stats.completed,
        })
    }

    /// Directory listing; the counts cover every worker regardless of the filters.
    pub async fn workers_page(
        &self,
        role: Option<WorkerRole>,
        status: Option<WorkerStatus>,
    ) -> Result<WorkersPageDto, ServiceError> {
        let workers = self.db_client.get_workers(role, status).await?;
        let everyone = match (role, status) {
            (None, None) => workers.clone(),
            _ => self.db_client.get_workers(None, None).await?,
        };
        let stats = worker_stats(&everyone);

        Ok(WorkersPageDto {
            workers,
            total_workers: stats.total,
            available_workers: stats.available,
            on_project_workers: stats.busy,
        })
    }

    pub async fn payments_page(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<PaymentsPageDto, ServiceError> {
        let payments = self.db_client.get_user_payments(user_id).await?;
        let stats = payment_stats(&payments, today);

        Ok(PaymentsPageDto {
            payments,
            total_received: stats.total_received,
            total_pending: stats.total_pending,
            total_paid: stats.total_paid,
            monthly_total: stats.monthly_total,
        })
    }

    pub async fn schedule_page(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<SchedulePageDto, ServiceError> {
        let tasks = self.db_client.get_user_tasks(user_id).await?;
        let projects = self.db_client.get_user_projects(user_id).await?;
        let stats = task_stats(&tasks, today);

        Ok(SchedulePageDto {
            tasks,
            projects,
            upcoming_count: stats.upcoming,
            this_week_count: stats.this_week_open,
            overdue_count: stats.overdue,
            completed_count: stats.completed,
        })
    }

    pub async fn staff_portal(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<StaffPortalDto, ServiceError> {
        let worker_profile = self.db_client.get_worker_profile(user_id).await?;
        let available_jobs = self
            .db_client
            .get_projects(Some(ProjectStatus::Active))
            .await?;
        let other_workers = self
            .db_client
            .get_workers(None, None)
            .await?
            .into_iter()
            .filter(|w| w.user_id != user_id)
            .collect();
        let tasks = self.db_client.get_user_tasks(user_id).await?;

        let (applications, open_time_log) = match &worker_profile {
            Some(worker) => {
                let applications = self.db_client.get_worker_applications(worker.id).await?;
                let today = now.date_naive();
                let open = self
                    .db_client
                    .get_open_time_logs(worker.id)
                    .await?
                    .into_iter()
                    .find(|log| log.log_date == today);
                (applications, open)
            }
            None => (Vec::new(), None),
        };

        Ok(StaffPortalDto {
            worker_profile,
            available_jobs,
            other_workers,
            tasks,
            applications,
            open_time_log,
        })
    }

    pub async fn staff_projects(&self) -> Result<StaffProjectsDto, ServiceError> {
        let projects = self.db_client.get_projects(None).await?;
        let stats = project_stats(&projects);

        Ok(StaffProjectsDto {
            projects,
            active_projects: stats.active,
            completed_projects: stats.completed,
        })
    }

    pub async fn staff_workers(&self) -> Result<StaffWorkersDto, ServiceError> {
        let workers = self.db_client.get_workers(None, None).await?;
        let stats = worker_stats(&workers);

        Ok(StaffWorkersDto {
            workers,
            total_workers: stats.total,
            available_workers: stats.available,
            busy_workers: stats.busy,
        })
    }

    /// Upcoming counts every task dated today or later, completed or not.
    pub async fn staff_schedule(&self, today: NaiveDate) -> Result<StaffScheduleDto, ServiceError> {
        let tasks = self.db_client.get_tasks().await?;
        let upcoming_tasks = tasks.iter().filter(|t| t.task_date >= today).count();
        let overdue_tasks = tasks.iter().filter(|t| t.is_overdue(today)).count();

        Ok(StaffScheduleDto {
            tasks,
            upcoming_tasks,
            overdue_tasks,
        })
    }

    pub async fn staff_payments(&self) -> Result<StaffPaymentsDto, ServiceError> {
        let payments = self.db_client.get_payments().await?;
        let stats = payment_stats(&payments, Utc::now().date_naive());

        Ok(StaffPaymentsDto {
            payments,
            total_received: stats.total_received,
            total_paid: stats.total_paid,
        })
    }
}
