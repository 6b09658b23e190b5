use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::domain::RunTrigger;
use crate::runner::{RunRequest, RunStats, Runner};
use crate::{Error, Result};

/// Parse a five-field cron expression (`minute hour day month weekday`).
///
/// The `cron` crate expects a leading seconds field, so one is added.
/// Weekday names (`MON`, `SUN`) are portable; numeric weekdays follow the
/// `cron` crate's 1 = Sunday numbering.
pub fn parse_cron(expression: &str) -> Result<cron::Schedule> {
    let fields = expression.split_whitespace().count();
    if fields != 5 {
        return Err(Error::config(format!(
            "Invalid cron expression '{}': expected 5 fields, got {}",
            expression, fields
        )));
    }
    cron::Schedule::from_str(&format!("0 {}", expression.trim()))
        .map_err(|e| Error::config(format!("Invalid cron expression '{}': {}", expression, e)))
}

/// A cron expression evaluated in an IANA timezone.
#[derive(Debug, Clone)]
pub struct CronSchedule {
    expression: String,
    schedule: cron::Schedule,
    timezone: Tz,
}

impl CronSchedule {
    pub fn parse(expression: &str, timezone: &str) -> Result<Self> {
        let schedule = parse_cron(expression)?;
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| Error::config(format!("'{}' is not a valid IANA timezone", timezone)))?;
        Ok(Self {
            expression: expression.to_string(),
            schedule,
            timezone,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// First fire time strictly after `after`.
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule
            .after(&after.with_timezone(&self.timezone))
            .next()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Calendar date of an instant in the schedule's timezone.
    pub fn local_date(&self, instant: DateTime<Utc>) -> chrono::NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }
}

/// Sleeps until each cron fire time and performs a scheduled run.
pub struct Scheduler {
    runner: Arc<Runner>,
    schedule: CronSchedule,
    cancel: CancellationToken,
}

impl Scheduler {
    pub fn new(runner: Arc<Runner>, schedule: CronSchedule, cancel: CancellationToken) -> Self {
        Self {
            runner,
            schedule,
            cancel,
        }
    }

    /// A manual run, gate bypassed.
    pub async fn run_now(&self) -> RunStats {
        let today = self.schedule.local_date(Utc::now());
        self.runner
            .run(&RunRequest::new(RunTrigger::Manual, today))
            .await
    }

    /// Loop until cancelled. Cancellation is observed between runs.
    pub async fn run(&self) {
        info!(
            cron = %self.schedule.expression(),
            timezone = %self.schedule.timezone(),
            "Scheduler started"
        );

        loop {
            let now = Utc::now();
            let Some(next) = self.schedule.next_after(now) else {
                warn!(cron = %self.schedule.expression(), "Cron expression has no upcoming fire time");
                break;
            };
            info!(
                next_run = %next.with_timezone(&self.schedule.timezone()),
                "Next scheduled run"
            );

            let wait = (next - now).to_std().unwrap_or_default();
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("Scheduler cancelled");
                    break;
                }
                _ = tokio::time::sleep(wait) => {}
            }

            let today = self.schedule.local_date(next);
            let stats = self
                .runner
                .run(&RunRequest::new(RunTrigger::Scheduled, today))
                .await;
            if !stats.is_success() {
                warn!(errors = stats.errors, "Scheduled run finished with errors");
            }

            if self.cancel.is_cancelled() {
                info!("Scheduler cancelled");
                break;
            }
        }
    }
}
