//! In-process `SiteStore` used by service and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::{
    JobApplicationExt, PaymentExt, ProjectExt, TaskExt, TeamExt, TimeLogExt, UserExt, WorkerExt,
};
use crate::models::{
    jobmodel::{ApplicationStatus, JobApplication},
    paymentmodel::{NewPayment, Payment},
    projectmodel::{NewProject, Project, ProjectStatus},
    taskmodel::{NewTask, Task},
    teammodel::{Team, TeamMember, TeamRole},
    timelogmodel::TimeLog,
    usermodel::User,
    workermodel::{Worker, WorkerProfileParams, WorkerRole, WorkerStatus},
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    projects: Vec<Project>,
    workers: Vec<Worker>,
    payments: Vec<Payment>,
    tasks: Vec<Task>,
    teams: Vec<Team>,
    team_members: Vec<TeamMember>,
    applications: Vec<JobApplication>,
    time_logs: Vec<TimeLog>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> Result<R, sqlx::Error> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| sqlx::Error::PoolClosed)?;
        Ok(f(&mut tables))
    }

    /// Test helper: every time log of a worker, in insertion order.
    pub fn time_logs_for(&self, worker_id: Uuid) -> Vec<TimeLog> {
        self.with(|t| {
            t.time_logs
                .iter()
                .filter(|log| log.worker_id == worker_id)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
    }

    /// Test helper: number of applications stored for a pair.
    pub fn application_count(&self, worker_id: Uuid, project_id: Uuid) -> usize {
        self.with(|t| {
            t.applications
                .iter()
                .filter(|a| a.worker_id == worker_id && a.project_id == project_id)
                .count()
        })
        .unwrap_or_default()
    }
}

/// Newest first; later inserts win ties.
fn newest_first<T: Clone>(rows: impl Iterator<Item = T>, key: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.reverse();
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    rows
}

fn duplicate(what: &str) -> sqlx::Error {
    sqlx::Error::Protocol(format!("duplicate key value violates unique constraint on {}", what))
}

#[async_trait]
impl UserExt for MemoryStore {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        self.with(|t| {
            t.users
                .iter()
                .find(|u| {
                    if let Some(id) = user_id {
                        u.id == id
                    } else if let Some(username) = username {
                        u.username == username
                    } else if let Some(email) = email {
                        u.email.eq_ignore_ascii_case(email)
                    } else {
                        false
                    }
                })
                .cloned()
        })
    }

    async fn save_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        full_name: Option<&str>,
        is_staff: bool,
    ) -> Result<User, sqlx::Error> {
        self.with(|t| {
            if t.users.iter().any(|u| u.username == username || u.email == email) {
                return Err(duplicate("users"));
            }
            let now = Utc::now();
            let user = User {
                id: Uuid::new_v4(),
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                full_name: full_name.map(str::to_string),
                is_staff,
                created_at: now,
                updated_at: now,
            };
            t.users.push(user.clone());
            Ok(user)
        })?
    }
}

#[async_trait]
impl ProjectExt for MemoryStore {
    async fn create_project(
        &self,
        user_id: Uuid,
        project: NewProject,
    ) -> Result<Project, sqlx::Error> {
        self.with(|t| {
            let now = Utc::now();
            let project = Project {
                id: Uuid::new_v4(),
                user_id,
                team_id: project.team_id,
                name: project.name,
                location: project.location,
                client_name: project.client_name,
                client_phone: project.client_phone,
                budget: project.budget,
                description: project.description,
                status: project.status,
                start_date: project.start_date,
                end_date: project.end_date,
                progress: project.progress,
                created_at: now,
                updated_at: now,
            };
            t.projects.push(project.clone());
            project
        })
    }

    async fn get_project(&self, project_id: Uuid) -> Result<Option<Project>, sqlx::Error> {
        self.with(|t| t.projects.iter().find(|p| p.id == project_id).cloned())
    }

    async fn get_user_projects(&self, user_id: Uuid) -> Result<Vec<Project>, sqlx::Error> {
        self.with(|t| {
            newest_first(
                t.projects.iter().filter(|p| p.user_id == user_id).cloned(),
                |p| p.created_at,
            )
        })
    }

    async fn get_projects(
        &self,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<Project>, sqlx::Error> {
        self.with(|t| {
            newest_first(
                t.projects
                    .iter()
                    .filter(|p| status.map_or(true, |s| p.status == s))
                    .cloned(),
                |p| p.created_at,
            )
        })
    }

    async fn delete_project(&self, project_id: Uuid) -> Result<(), sqlx::Error> {
        self.with(|t| {
            t.projects.retain(|p| p.id != project_id);
            t.applications.retain(|a| a.project_id != project_id);
            t.time_logs.retain(|l| l.project_id != Some(project_id));
            for task in t.tasks.iter_mut().filter(|task| task.project_id == Some(project_id)) {
                task.project_id = None;
            }
        })
    }
}

#[async_trait]
impl WorkerExt for MemoryStore {
    async fn get_worker_profile(&self, user_id: Uuid) -> Result<Option<Worker>, sqlx::Error> {
        self.with(|t| t.workers.iter().find(|w| w.user_id == user_id).cloned())
    }

    async fn get_worker_by_id(&self, worker_id: Uuid) -> Result<Option<Worker>, sqlx::Error> {
        self.with(|t| t.workers.iter().find(|w| w.id == worker_id).cloned())
    }

    async fn upsert_worker_profile(
        &self,
        user_id: Uuid,
        params: WorkerProfileParams,
    ) -> Result<Worker, sqlx::Error> {
        let skills = params.skill_keys();
        self.with(|t| {
            let now = Utc::now();
            if let Some(worker) = t.workers.iter_mut().find(|w| w.user_id == user_id) {
                worker.name = params.name;
                worker.phone = params.phone;
                worker.role = params.role;
                worker.daily_rate = params.daily_rate;
                worker.experience_years = params.experience_years;
                worker.bio = params.bio;
                worker.skills = skills;
                worker.status = params.status;
                worker.updated_at = now;
                return worker.clone();
            }
            let worker = Worker {
                id: Uuid::new_v4(),
                user_id,
                name: params.name,
                phone: params.phone,
                role: params.role,
                daily_rate: params.daily_rate,
                experience_years: params.experience_years,
                bio: params.bio,
                skills,
                id_number: None,
                status: params.status,
                rating: 5.0,
                completed_projects: 0,
                created_at: now,
                updated_at: now,
            };
            t.workers.push(worker.clone());
            worker
        })
    }

    async fn get_workers(
        &self,
        role: Option<WorkerRole>,
        status: Option<WorkerStatus>,
    ) -> Result<Vec<Worker>, sqlx::Error> {
        self.with(|t| {
            let mut workers: Vec<Worker> = t
                .workers
                .iter()
                .filter(|w| role.map_or(true, |r| w.role == r))
                .filter(|w| status.map_or(true, |s| w.status == s))
                .cloned()
                .collect();
            workers.sort_by(|a, b| {
                b.rating
                    .total_cmp(&a.rating)
                    .then_with(|| a.name.cmp(&b.name))
            });
            workers
        })
    }

    async fn get_user_workers(&self, user_id: Uuid) -> Result<Vec<Worker>, sqlx::Error> {
        self.with(|t| {
            t.workers
                .iter()
                .filter(|w| w.user_id == user_id)
                .cloned()
                .collect()
        })
    }

    async fn delete_worker(&self, worker_id: Uuid) -> Result<(), sqlx::Error> {
        self.with(|t| {
            t.workers.retain(|w| w.id != worker_id);
            t.applications.retain(|a| a.worker_id != worker_id);
            t.time_logs.retain(|l| l.worker_id != worker_id);
        })
    }
}

#[async_trait]
impl PaymentExt for MemoryStore {
    async fn create_payment(
        &self,
        user_id: Uuid,
        payment: NewPayment,
    ) -> Result<Payment, sqlx::Error> {
        self.with(|t| {
            let now = Utc::now();
            let payment = Payment {
                id: Uuid::new_v4(),
                user_id,
                payment_type: payment.payment_type,
                category: payment.category,
                amount: payment.amount,
                description: payment.description,
                payment_date: payment.payment_date,
                status: payment.status,
                payment_method: payment.payment_method,
                reference: payment.reference,
                created_at: now,
                updated_at: now,
            };
            t.payments.push(payment.clone());
            payment
        })
    }

    async fn get_payment(&self, payment_id: Uuid) -> Result<Option<Payment>, sqlx::Error> {
        self.with(|t| t.payments.iter().find(|p| p.id == payment_id).cloned())
    }

    async fn get_user_payments(&self, user_id: Uuid) -> Result<Vec<Payment>, sqlx::Error> {
        self.with(|t| {
            sort_payments(t.payments.iter().filter(|p| p.user_id == user_id).cloned())
        })
    }

    async fn get_payments(&self) -> Result<Vec<Payment>, sqlx::Error> {
        self.with(|t| sort_payments(t.payments.iter().cloned()))
    }

    async fn delete_payment(&self, payment_id: Uuid) -> Result<(), sqlx::Error> {
        self.with(|t| t.payments.retain(|p| p.id != payment_id))
    }
}

fn sort_payments(rows: impl Iterator<Item = Payment>) -> Vec<Payment> {
    let mut payments = newest_first(rows, |p| p.created_at);
    // dated rows first, newest date first
    payments.sort_by(|a, b| match (a.payment_date, b.payment_date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    payments
}

#[async_trait]
impl TaskExt for MemoryStore {
    async fn create_task(&self, user_id: Uuid, task: NewTask) -> Result<Task, sqlx::Error> {
        self.with(|t| {
            let now = Utc::now();
            let task = Task {
                id: Uuid::new_v4(),
                user_id,
                project_id: task.project_id,
                title: task.title,
                task_type: task.task_type,
                task_date: task.task_date,
                task_time: task.task_time,
                description: task.description,
                completed: false,
                completed_at: None,
                priority: task.priority,
                created_at: now,
                updated_at: now,
            };
            t.tasks.push(task.clone());
            task
        })
    }

    async fn get_task(&self, task_id: Uuid) -> Result<Option<Task>, sqlx::Error> {
        self.with(|t| t.tasks.iter().find(|task| task.id == task_id).cloned())
    }

    async fn get_user_tasks(&self, user_id: Uuid) -> Result<Vec<Task>, sqlx::Error> {
        self.with(|t| sort_tasks(t.tasks.iter().filter(|task| task.user_id == user_id).cloned()))
    }

    async fn get_tasks(&self) -> Result<Vec<Task>, sqlx::Error> {
        self.with(|t| sort_tasks(t.tasks.iter().cloned()))
    }

    async fn save_task_completion(&self, task: &Task) -> Result<Task, sqlx::Error> {
        self.with(|t| {
            let stored = t
                .tasks
                .iter_mut()
                .find(|stored| stored.id == task.id)
                .ok_or(sqlx::Error::RowNotFound)?;
            stored.completed = task.completed;
            stored.completed_at = task.completed_at;
            stored.updated_at = task.updated_at;
            Ok(stored.clone())
        })?
    }

    async fn delete_task(&self, task_id: Uuid) -> Result<(), sqlx::Error> {
        self.with(|t| t.tasks.retain(|task| task.id != task_id))
    }
}

fn sort_tasks(rows: impl Iterator<Item = Task>) -> Vec<Task> {
    let mut tasks: Vec<Task> = rows.collect();
    tasks.sort_by(|a, b| (a.task_date, a.task_time).cmp(&(b.task_date, b.task_time)));
    tasks
}

#[async_trait]
impl TeamExt for MemoryStore {
    async fn create_team(
        &self,
        owner_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Team, sqlx::Error> {
        self.with(|t| {
            let now = Utc::now();
            let team = Team {
                id: Uuid::new_v4(),
                owner_id,
                name: name.to_string(),
                description: description.map(str::to_string),
                created_at: now,
                updated_at: now,
            };
            t.teams.push(team.clone());
            team
        })
    }

    async fn get_team(&self, team_id: Uuid) -> Result<Option<Team>, sqlx::Error> {
        self.with(|t| t.teams.iter().find(|team| team.id == team_id).cloned())
    }

    async fn get_user_teams(&self, owner_id: Uuid) -> Result<Vec<Team>, sqlx::Error> {
        self.with(|t| {
            newest_first(
                t.teams.iter().filter(|team| team.owner_id == owner_id).cloned(),
                |team| team.created_at,
            )
        })
    }

    async fn add_team_member(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        role: TeamRole,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        self.with(|t| {
            if t.team_members
                .iter()
                .any(|m| m.team_id == team_id && m.user_id == user_id)
            {
                return None;
            }
            let now = Utc::now();
            let member = TeamMember {
                id: Uuid::new_v4(),
                team_id,
                user_id,
                role,
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            t.team_members.push(member.clone());
            Some(member)
        })
    }

    async fn get_team_members(&self, team_id: Uuid) -> Result<Vec<TeamMember>, sqlx::Error> {
        self.with(|t| {
            t.team_members
                .iter()
                .filter(|m| m.team_id == team_id)
                .cloned()
                .collect()
        })
    }
}

#[async_trait]
impl JobApplicationExt for MemoryStore {
    async fn create_application_if_absent(
        &self,
        worker_id: Uuid,
        project_id: Uuid,
        cover_letter: Option<&str>,
    ) -> Result<(JobApplication, bool), sqlx::Error> {
        self.with(|t| {
            if let Some(existing) = t
                .applications
                .iter()
                .find(|a| a.worker_id == worker_id && a.project_id == project_id)
            {
                return (existing.clone(), false);
            }
            let now = Utc::now();
            let application = JobApplication {
                id: Uuid::new_v4(),
                worker_id,
                project_id,
                status: ApplicationStatus::Applied,
                applied_at: now,
                responded_at: None,
                cover_letter: cover_letter.map(str::to_string),
                notes: None,
                created_at: now,
                updated_at: now,
            };
            t.applications.push(application.clone());
            (application, true)
        })
    }

    async fn get_application(
        &self,
        application_id: Uuid,
    ) -> Result<Option<JobApplication>, sqlx::Error> {
        self.with(|t| t.applications.iter().find(|a| a.id == application_id).cloned())
    }

    async fn get_project_owner_applications(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<JobApplication>, sqlx::Error> {
        self.with(|t| {
            let owned: Vec<Uuid> = t
                .projects
                .iter()
                .filter(|p| p.user_id == owner_id)
                .map(|p| p.id)
                .collect();
            newest_first(
                t.applications
                    .iter()
                    .filter(|a| owned.contains(&a.project_id))
                    .cloned(),
                |a| a.applied_at,
            )
        })
    }

    async fn get_worker_applications(
        &self,
        worker_id: Uuid,
    ) -> Result<Vec<JobApplication>, sqlx::Error> {
        self.with(|t| {
            newest_first(
                t.applications.iter().filter(|a| a.worker_id == worker_id).cloned(),
                |a| a.applied_at,
            )
        })
    }

    async fn update_application_status(
        &self,
        application_id: Uuid,
        from: ApplicationStatus,
        to: ApplicationStatus,
        notes: Option<&str>,
        responded_at: Option<DateTime<Utc>>,
    ) -> Result<Option<JobApplication>, sqlx::Error> {
        self.with(|t| {
            let application = t
                .applications
                .iter_mut()
                .find(|a| a.id == application_id && a.status == from)?;
            application.status = to;
            if let Some(notes) = notes {
                application.notes = Some(notes.to_string());
            }
            if responded_at.is_some() {
                application.responded_at = responded_at;
            }
            application.updated_at = Utc::now();
            Some(application.clone())
        })
    }
}

#[async_trait]
impl TimeLogExt for MemoryStore {
    async fn create_time_log(
        &self,
        worker_id: Uuid,
        project_id: Option<Uuid>,
        log_date: NaiveDate,
        clock_in_time: DateTime<Utc>,
    ) -> Result<Option<TimeLog>, sqlx::Error> {
        self.with(|t| {
            if t.time_logs
                .iter()
                .any(|l| l.worker_id == worker_id && l.log_date == log_date && l.is_open())
            {
                return None;
            }
            let log = TimeLog {
                id: Uuid::new_v4(),
                worker_id,
                project_id,
                log_date,
                clock_in_time,
                clock_out_time: None,
                hours_worked: None,
                notes: None,
                created_at: clock_in_time,
                updated_at: clock_in_time,
            };
            t.time_logs.push(log.clone());
            Some(log)
        })
    }

    async fn get_open_time_logs(&self, worker_id: Uuid) -> Result<Vec<TimeLog>, sqlx::Error> {
        self.with(|t| {
            let mut logs: Vec<TimeLog> = t
                .time_logs
                .iter()
                .filter(|l| l.worker_id == worker_id && l.is_open())
                .cloned()
                .collect();
            logs.sort_by(|a, b| {
                (a.log_date, a.clock_in_time).cmp(&(b.log_date, b.clock_in_time))
            });
            logs
        })
    }

    async fn save_clock_out(&self, log: &TimeLog) -> Result<Option<TimeLog>, sqlx::Error> {
        self.with(|t| {
            let stored = t
                .time_logs
                .iter_mut()
                .find(|stored| stored.id == log.id && stored.is_open())?;
            stored.clock_out_time = log.clock_out_time;
            stored.hours_worked = log.hours_worked.clone();
            stored.notes = log.notes.clone();
            stored.updated_at = log.updated_at;
            Some(stored.clone())
        })
    }

    async fn get_worker_time_logs(
        &self,
        worker_id: Uuid,
        limit: i64,
    ) -> Result<Vec<TimeLog>, sqlx::Error> {
        self.with(|t| {
            let mut logs: Vec<TimeLog> = t
                .time_logs
                .iter()
                .filter(|l| l.worker_id == worker_id)
                .cloned()
                .collect();
            logs.sort_by(|a, b| {
                (b.log_date, b.clock_in_time).cmp(&(a.log_date, a.clock_in_time))
            });
            logs.truncate(limit.max(0) as usize);
            logs
        })
    }
}
