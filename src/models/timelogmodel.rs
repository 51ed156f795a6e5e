use chrono::{DateTime, Duration, NaiveDate, Utc};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;

pub const AUTO_CLOSE_NOTE: &str = "Auto-closed at day boundary (no clock out recorded)";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TimeLog {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub project_id: Option<Uuid>,
    pub log_date: NaiveDate,
    pub clock_in_time: DateTime<Utc>,
    pub clock_out_time: Option<DateTime<Utc>>,
    pub hours_worked: Option<BigDecimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Elapsed time between two instants in hours, rounded to two decimals.
///
/// The hour count is taken as an `f64` first and that binary value is rounded
/// exactly, ties to even, so 54s (0.015 as a float, just below the tie) gives
/// 0.01.
pub fn compute_hours(clock_in: DateTime<Utc>, clock_out: DateTime<Utc>) -> BigDecimal {
    let elapsed = clock_out - clock_in;
    let seconds = match elapsed.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => elapsed.num_seconds() as f64,
    };
    BigDecimal::new(round_hundredths(seconds / 3600.0).into(), 2)
}

/// `value * 100` rounded half-to-even, compared against the exact binary value.
fn round_hundredths(value: f64) -> i64 {
    // mul_add rounds once, so the sign of each residual is exact.
    let mut floor = (value * 100.0).floor();
    if 100.0f64.mul_add(value, -floor) < 0.0 {
        floor -= 1.0;
    } else if 100.0f64.mul_add(value, -(floor + 1.0)) >= 0.0 {
        floor += 1.0;
    }

    let above_tie = 200.0f64.mul_add(value, -(2.0 * floor + 1.0));
    let rounded = if above_tie > 0.0 || (above_tie == 0.0 && floor % 2.0 != 0.0) {
        floor + 1.0
    } else {
        floor
    };
    rounded as i64
}

impl TimeLog {
    pub fn is_open(&self) -> bool {
        self.clock_out_time.is_none()
    }

    /// Open and started on an earlier day than `today`.
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.is_open() && self.log_date < today
    }

    pub fn recompute_hours(&mut self) {
        if let Some(clock_out) = self.clock_out_time {
            self.hours_worked = Some(compute_hours(self.clock_in_time, clock_out));
        }
    }

    pub fn clock_out(&mut self, at: DateTime<Utc>, notes: Option<String>) {
        self.clock_out_time = Some(at);
        self.notes = notes;
        self.updated_at = at;
        self.recompute_hours();
    }

    /// Midnight (UTC) at the end of `log_date`.
    pub fn day_boundary(&self) -> DateTime<Utc> {
        (self.log_date + Duration::days(1))
            .and_hms_opt(0, 0, 0)
            .map(|boundary| boundary.and_utc())
            .unwrap_or(self.clock_in_time)
    }

    /// Closes a forgotten session at the end of the day it was opened.
    pub fn close_at_day_boundary(&mut self, now: DateTime<Utc>) {
        let boundary = self.day_boundary().max(self.clock_in_time);
        let notes = match self.notes.take() {
            Some(existing) if !existing.is_empty() => format!("{}\n{}", existing, AUTO_CLOSE_NOTE),
            _ => AUTO_CLOSE_NOTE.to_string(),
        };
        self.clock_out_time = Some(boundary);
        self.notes = Some(notes);
        self.updated_at = now;
        self.recompute_hours();
    }

    pub fn hours_as_f64(&self) -> f64 {
        self.hours_worked
            .as_ref()
            .and_then(|hours| hours.to_f64())
            .unwrap_or(0.0)
    }
}
