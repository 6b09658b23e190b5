//! Notification channels.
//!
//! - Discord webhooks
//! - Generic webhooks (HTTP POST/PUT)

mod discord;
mod webhook;

pub use discord::{DiscordChannel, DiscordConfig};
pub use webhook::{WebhookAuth, WebhookChannel, WebhookConfig, WebhookMethod};

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::events::{NotificationEvent, canonicalize_subscription_event_name};
use crate::Result;

/// Trait for notification channels.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Get the channel type name.
    fn channel_type(&self) -> &'static str;

    /// Check if the channel is enabled.
    fn is_enabled(&self) -> bool;

    /// Send a notification through this channel.
    async fn send(&self, event: &NotificationEvent) -> Result<()>;

    /// Test the channel configuration.
    async fn test(&self) -> Result<()> {
        let event = NotificationEvent::Test {
            timestamp: chrono::Utc::now(),
        };
        self.send(&event).await
    }
}

/// Channel configuration wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChannelConfig {
    /// Discord webhook channel.
    #[serde(alias = "Discord")]
    Discord(DiscordConfig),
    /// Generic webhook channel.
    #[serde(alias = "Webhook")]
    Webhook(WebhookConfig),
}

impl ChannelConfig {
    /// Get the channel type name.
    pub fn channel_type(&self) -> &'static str {
        match self {
            Self::Discord(_) => "discord",
            Self::Webhook(_) => "webhook",
        }
    }

    /// Check if the channel is enabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Discord(c) => c.enabled,
            Self::Webhook(c) => c.enabled,
        }
    }

    /// Optional human-friendly display name.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Discord(c) => c.name.as_deref(),
            Self::Webhook(c) => c.name.as_deref(),
        }
    }

    /// Subscribed event names as written in the configuration.
    pub fn events(&self) -> &[String] {
        match self {
            Self::Discord(c) => &c.events,
            Self::Webhook(c) => &c.events,
        }
    }

    /// Request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        match self {
            Self::Discord(c) => c.timeout_secs,
            Self::Webhook(c) => c.timeout_secs,
        }
    }

    /// Build the runtime channel.
    pub fn build(&self) -> Result<Box<dyn NotificationChannel>> {
        Ok(match self {
            Self::Discord(c) => Box::new(DiscordChannel::new(c.clone())?),
            Self::Webhook(c) => Box::new(WebhookChannel::new(c.clone())?),
        })
    }
}

/// Event types a channel delivers. Empty means every event.
#[derive(Debug, Clone, Default)]
pub(crate) struct Subscriptions {
    events: Option<HashSet<&'static str>>,
}

impl Subscriptions {
    pub(crate) fn from_names(names: &[String]) -> Self {
        if names.is_empty() {
            return Self::default();
        }
        let events = names
            .iter()
            .filter_map(|name| {
                let canonical = canonicalize_subscription_event_name(name);
                if canonical.is_none() {
                    warn!(event = %name, "Ignoring unknown notification event subscription");
                }
                canonical
            })
            .collect();
        Self {
            events: Some(events),
        }
    }

    /// Test events bypass subscriptions.
    pub(crate) fn accepts(&self, event: &NotificationEvent) -> bool {
        if matches!(event, NotificationEvent::Test { .. }) {
            return true;
        }
        self.events
            .as_ref()
            .is_none_or(|events| events.contains(event.event_type()))
    }
}
