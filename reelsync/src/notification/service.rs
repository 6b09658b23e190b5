use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::channels::{ChannelConfig, NotificationChannel};
use super::events::NotificationEvent;
use super::{MediaRequest, Notifier};
use crate::domain::RunTrigger;
use crate::runner::RunStats;

/// `[notifications]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationServiceConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub channels: Vec<ChannelConfig>,
}

fn default_enabled() -> bool {
    true
}

impl Default for NotificationServiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            channels: Vec::new(),
        }
    }
}

/// Outcome of a channel test.
#[derive(Debug)]
pub struct ChannelTestResult {
    pub channel: String,
    pub result: crate::Result<()>,
}

/// Fans events out to every enabled channel concurrently.
pub struct NotificationService {
    enabled: bool,
    channels: Vec<(String, Box<dyn NotificationChannel>)>,
}

impl NotificationService {
    /// Build every enabled channel. Fails on a channel that cannot be built.
    pub fn with_config(config: &NotificationServiceConfig) -> crate::Result<Self> {
        let mut channels = Vec::new();
        for (index, c) in config.channels.iter().filter(|c| c.is_enabled()).enumerate() {
            let label = c
                .display_name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}#{}", c.channel_type(), index));
            channels.push((label, c.build()?));
        }

        info!(
            enabled = config.enabled,
            channels = channels.len(),
            "Notification service configured"
        );

        Ok(Self {
            enabled: config.enabled,
            channels,
        })
    }

    /// Build from ready channels.
    pub fn with_channels(channels: Vec<(String, Box<dyn NotificationChannel>)>) -> Self {
        Self {
            enabled: true,
            channels,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Send an event to all channels, logging failures.
    pub async fn notify(&self, event: NotificationEvent) {
        if !self.enabled || self.channels.is_empty() {
            return;
        }

        let sends = self.channels.iter().map(|(label, channel)| {
            let event = &event;
            async move { (label, channel.send(event).await) }
        });

        for (label, result) in join_all(sends).await {
            match result {
                Ok(()) => debug!(channel = %label, event = event.event_type(), "Notification delivered"),
                Err(e) => warn!(
                    channel = %label,
                    event = event.event_type(),
                    error = %e,
                    "Failed to deliver notification"
                ),
            }
        }
    }

    /// Send a test event through every channel, reporting each result.
    pub async fn test_channels(&self) -> Vec<ChannelTestResult> {
        let tests = self.channels.iter().map(|(label, channel)| async move {
            ChannelTestResult {
                channel: label.clone(),
                result: channel.test().await,
            }
        });
        join_all(tests).await
    }
}

#[async_trait]
impl Notifier for NotificationService {
    async fn send_run_start(&self, libraries: &[String], trigger: RunTrigger) {
        self.notify(NotificationEvent::RunStarted {
            libraries: libraries.to_vec(),
            trigger,
            timestamp: Utc::now(),
        })
        .await;
    }

    async fn send_run_end(&self, stats: &RunStats) {
        self.notify(NotificationEvent::run_completed(stats)).await;
    }

    async fn send_collection_change(
        &self,
        collection: &str,
        library: &str,
        added: &[String],
        removed: &[String],
    ) {
        if added.is_empty() && removed.is_empty() {
            return;
        }
        self.notify(NotificationEvent::CollectionChanged {
            collection: collection.to_string(),
            library: library.to_string(),
            added: added.to_vec(),
            removed: removed.to_vec(),
            timestamp: Utc::now(),
        })
        .await;
    }

    async fn send_error(&self, title: &str, message: &str) {
        self.notify(NotificationEvent::Error {
            title: title.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        })
        .await;
    }

    async fn send_media_requested(&self, request: &MediaRequest) {
        self.notify(NotificationEvent::MediaRequested {
            title: request.title.clone(),
            year: request.year,
            kind: request.kind,
            manager: request.manager.clone(),
            collection: request.collection.clone(),
            timestamp: Utc::now(),
        })
        .await;
    }
}
