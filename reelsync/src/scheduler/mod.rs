//! Cron-driven daemon mode.

pub mod service;

pub use service::{CronSchedule, Scheduler, parse_cron};
