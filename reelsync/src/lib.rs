//! reelsync library crate.
//!
//! Keeps named collections in a Jellyfin server in step with catalog feeds
//! from TMDb and Trakt, and asks Radarr/Sonarr for titles that are missing.

pub mod acquisition;
pub mod catalog;
pub mod collection;
pub mod config;
pub mod domain;
pub mod error;
pub mod library;
pub mod logging;
pub mod notification;
pub mod runner;
pub mod scheduler;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
