use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    db::{ProjectExt, SiteStore, TimeLogExt, WorkerExt},
    models::{timelogmodel::TimeLog, workermodel::Worker},
    service::{error::ServiceError, locks::KeyedLocks},
};

#[derive(Debug, Clone)]
pub enum ClockInOutcome {
    ClockedIn(TimeLog),
    AlreadyClockedIn(TimeLog),
}

#[derive(Debug, Clone)]
pub enum ClockOutOutcome {
    ClockedOut(TimeLog),
    NoActiveClockIn,
}

pub const RECENT_TIME_LOGS: i64 = 30;

#[derive(Clone)]
pub struct TimeService {
    db_client: Arc<dyn SiteStore>,
    worker_locks: Arc<KeyedLocks>,
}

impl TimeService {
    pub fn new(db_client: Arc<dyn SiteStore>) -> Self {
        Self {
            db_client,
            worker_locks: Arc::new(KeyedLocks::new()),
        }
    }

    pub async fn clock_in(
        &self,
        user_id: Uuid,
        project_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<ClockInOutcome, ServiceError> {
        let worker = self.worker(user_id).await?;
        let _guard = self.worker_locks.lock(worker.id).await;
        let today = now.date_naive();

        let open = self.close_stale_logs(&worker, now).await?;
        if let Some(existing) = open.into_iter().find(|log| log.log_date == today) {
            return Ok(ClockInOutcome::AlreadyClockedIn(existing));
        }

        // unknown projects are dropped rather than rejected
        let project_id = match project_id {
            Some(id) => self.db_client.get_project(id).await?.map(|project| project.id),
            None => None,
        };

        match self
            .db_client
            .create_time_log(worker.id, project_id, today, now)
            .await?
        {
            Some(log) => {
                tracing::info!(worker_id = %worker.id, time_log_id = %log.id, "clocked in");
                Ok(ClockInOutcome::ClockedIn(log))
            }
            None => {
                // another process opened today's session between our read and insert
                let existing = self
                    .db_client
                    .get_open_time_logs(worker.id)
                    .await?
                    .into_iter()
                    .find(|log| log.log_date == today)
                    .ok_or(ServiceError::ConcurrentUpdate(worker.id))?;
                Ok(ClockInOutcome::AlreadyClockedIn(existing))
            }
        }
    }

    pub async fn clock_out(
        &self,
        user_id: Uuid,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<ClockOutOutcome, ServiceError> {
        let worker = self.worker(user_id).await?;
        let _guard = self.worker_locks.lock(worker.id).await;
        let today = now.date_naive();

        let open = self.close_stale_logs(&worker, now).await?;
        let Some(mut log) = open.into_iter().find(|log| log.log_date == today) else {
            return Ok(ClockOutOutcome::NoActiveClockIn);
        };

        log.clock_out(now, notes);
        match self.db_client.save_clock_out(&log).await? {
            Some(saved) => {
                tracing::info!(
                    worker_id = %worker.id,
                    time_log_id = %saved.id,
                    hours = saved.hours_as_f64(),
                    "clocked out"
                );
                Ok(ClockOutOutcome::ClockedOut(saved))
            }
            None => Ok(ClockOutOutcome::NoActiveClockIn),
        }
    }

    /// Most recent sessions for the caller's profile.
    pub async fn time_logs(&self, user_id: Uuid) -> Result<Vec<TimeLog>, ServiceError> {
        let worker = self.worker(user_id).await?;
        Ok(self
            .db_client
            .get_worker_time_logs(worker.id, RECENT_TIME_LOGS)
            .await?)
    }

    async fn worker(&self, user_id: Uuid) -> Result<Worker, ServiceError> {
        self.db_client
            .get_worker_profile(user_id)
            .await?
            .ok_or(ServiceError::WorkerProfileNotFound(user_id))
    }

    /// Closes sessions left open on earlier days and returns the ones still open.
    async fn close_stale_logs(
        &self,
        worker: &Worker,
        now: DateTime<Utc>,
    ) -> Result<Vec<TimeLog>, ServiceError> {
        let today = now.date_naive();
        let mut still_open = Vec::new();

        for mut log in self.db_client.get_open_time_logs(worker.id).await? {
            if !log.is_stale(today) {
                still_open.push(log);
                continue;
            }

            log.close_at_day_boundary(now);
            if self.db_client.save_clock_out(&log).await?.is_some() {
                tracing::warn!(
                    worker_id = %worker.id,
                    time_log_id = %log.id,
                    log_date = %log.log_date,
                    "auto-closed time log left open on a previous day"
                );
            }
        }

        Ok(still_open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::memory::MemoryStore,
        models::{projectmodel::ProjectStatus, timelogmodel::AUTO_CLOSE_NOTE},
        service::job_service::tests::{project_for, user, worker_for},
    };
    use chrono::{Duration, TimeZone};
    use sqlx::types::BigDecimal;
    use std::str::FromStr;

    async fn setup() -> (Arc<MemoryStore>, TimeService, Uuid, Worker) {
        let store = Arc::new(MemoryStore::new());
        let staff = user(&store, "fundi", true).await;
        let worker = worker_for(&store, &staff).await;
        let service = TimeService::new(store.clone());
        (store, service, staff.id, worker)
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, hour, minute, 0).unwrap()
    }

    #[tokio::test]
    async fn test_clock_in_twice_keeps_one_open_log() {
        let (store, service, user_id, worker) = setup().await;

        let first = service.clock_in(user_id, None, at(7, 0)).await.unwrap();
        let second = service.clock_in(user_id, None, at(7, 5)).await.unwrap();

        let ClockInOutcome::ClockedIn(opened) = first else {
            panic!("expected a new session");
        };
        let ClockInOutcome::AlreadyClockedIn(existing) = second else {
            panic!("expected the existing session");
        };
        assert_eq!(opened.id, existing.id);

        let open: Vec<_> = store
            .time_logs_for(worker.id)
            .into_iter()
            .filter(TimeLog::is_open)
            .collect();
        assert_eq!(open.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_clock_ins_open_one_session() {
        let (store, service, user_id, worker) = setup().await;

        let attempts = (0..8).map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.clock_in(user_id, None, at(7, 0)).await })
        });
        let mut created = 0;
        for attempt in attempts.collect::<Vec<_>>() {
            if let ClockInOutcome::ClockedIn(_) = attempt.await.unwrap().unwrap() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.time_logs_for(worker.id).len(), 1);
    }

    #[tokio::test]
    async fn test_clock_out_records_hours_and_notes() {
        let (_store, service, user_id, _worker) = setup().await;

        service.clock_in(user_id, None, at(7, 45)).await.unwrap();
        let outcome = service
            .clock_out(user_id, Some("Plastered east wall".to_string()), at(16, 5))
            .await
            .unwrap();

        let ClockOutOutcome::ClockedOut(log) = outcome else {
            panic!("expected a closed session");
        };
        assert_eq!(log.hours_worked, Some(BigDecimal::from_str("8.33").unwrap()));
        assert_eq!(log.notes.as_deref(), Some("Plastered east wall"));

        let again = service.clock_out(user_id, None, at(16, 10)).await.unwrap();
        assert!(matches!(again, ClockOutOutcome::NoActiveClockIn));
    }

    #[tokio::test]
    async fn test_clock_out_without_clock_in() {
        let (_store, service, user_id, _worker) = setup().await;
        let outcome = service.clock_out(user_id, None, at(17, 0)).await.unwrap();
        assert!(matches!(outcome, ClockOutOutcome::NoActiveClockIn));
    }

    #[tokio::test]
    async fn test_forgotten_clock_out_is_closed_at_midnight() {
        let (store, service, user_id, worker) = setup().await;
        let yesterday_evening = at(18, 0) - Duration::days(1);

        service.clock_in(user_id, None, yesterday_evening).await.unwrap();
        let outcome = service.clock_in(user_id, None, at(7, 0)).await.unwrap();
        assert!(matches!(outcome, ClockInOutcome::ClockedIn(_)));

        let logs = store.time_logs_for(worker.id);
        assert_eq!(logs.len(), 2);

        let stale = &logs[0];
        assert_eq!(stale.clock_out_time, Some(at(0, 0)));
        assert_eq!(stale.hours_worked, Some(BigDecimal::from(6)));
        assert_eq!(stale.notes.as_deref(), Some(AUTO_CLOSE_NOTE));
        assert!(logs[1].is_open());
    }

    #[tokio::test]
    async fn test_unknown_project_is_ignored() {
        let (store, service, user_id, _worker) = setup().await;
        let owner = user(&store, "client", false).await;
        let project = project_for(&store, &owner, 1000, ProjectStatus::Active).await;

        let ClockInOutcome::ClockedIn(log) =
            service.clock_in(user_id, Some(Uuid::new_v4()), at(7, 0)).await.unwrap()
        else {
            panic!("expected a new session");
        };
        assert_eq!(log.project_id, None);

        service.clock_out(user_id, None, at(12, 0)).await.unwrap();
        let ClockInOutcome::ClockedIn(log) =
            service.clock_in(user_id, Some(project.id), at(13, 0)).await.unwrap()
        else {
            panic!("expected a new session");
        };
        assert_eq!(log.project_id, Some(project.id));
    }

    #[tokio::test]
    async fn test_clock_in_requires_profile() {
        let store = Arc::new(MemoryStore::new());
        let service = TimeService::new(store.clone());
        let staff = user(&store, "no_profile", true).await;

        let err = service.clock_in(staff.id, None, at(7, 0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::WorkerProfileNotFound(_)));
    }
}
