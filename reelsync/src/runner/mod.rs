//! One end-to-end run over the configured libraries.

pub mod service;
pub mod stats;

pub use service::{CollectionOutcome, CollectionPipeline, RunRequest, Runner};
pub use stats::RunStats;
