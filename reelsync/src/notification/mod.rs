//! Run notifications.
//!
//! The runner talks to a [`Notifier`]. [`NotificationService`] implements it
//! by fanning each event out to the configured channels. Delivery is
//! best-effort: failures are logged and never retried.

pub mod channels;
pub mod events;
pub mod service;

use async_trait::async_trait;

use crate::domain::{MediaKind, RunTrigger};
use crate::runner::RunStats;

pub use channels::{ChannelConfig, DiscordConfig, NotificationChannel, WebhookConfig};
pub use events::{NotificationEvent, NotificationPriority};
pub use service::{NotificationService, NotificationServiceConfig};

/// A title handed to an acquisition manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub title: String,
    pub year: Option<i32>,
    pub kind: MediaKind,
    pub manager: String,
    pub collection: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_run_start(&self, libraries: &[String], trigger: RunTrigger);

    async fn send_run_end(&self, stats: &RunStats);

    async fn send_collection_change(
        &self,
        collection: &str,
        library: &str,
        added: &[String],
        removed: &[String],
    );

    async fn send_error(&self, title: &str, message: &str);

    async fn send_media_requested(&self, request: &MediaRequest);
}

/// Notifier that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_run_start(&self, _libraries: &[String], _trigger: RunTrigger) {}

    async fn send_run_end(&self, _stats: &RunStats) {}

    async fn send_collection_change(
        &self,
        _collection: &str,
        _library: &str,
        _added: &[String],
        _removed: &[String],
    ) {
    }

    async fn send_error(&self, _title: &str, _message: &str) {}

    async fn send_media_requested(&self, _request: &MediaRequest) {}
}
