mod charts;
mod client;
mod error;
mod lists;
pub mod models;

pub use charts::ChartPeriod;
pub use client::TraktClient;
pub use error::TraktError;
pub use models::{ListEntry, TraktIds, TraktMovie, TraktShow};

pub type Result<T> = std::result::Result<T, TraktError>;
