//! Discord webhook notification channel.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::{NotificationChannel, Subscriptions};
use crate::notification::events::{NotificationEvent, NotificationPriority};
use crate::utils::http_client::build_client;
use crate::{Error, Result};

const COLOR_BLUE: u32 = 3447003;
const COLOR_GREEN: u32 = 3066993;
const COLOR_RED: u32 = 15158332;
const COLOR_YELLOW: u32 = 16776960;
const COLOR_PURPLE: u32 = 10181046;

/// Discord channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Optional display name for this channel instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the channel is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Discord webhook URL.
    pub webhook_url: String,
    /// Optional username for the webhook.
    #[serde(default = "default_username")]
    pub username: Option<String>,
    /// Optional avatar URL for the webhook.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Minimum priority level to send (default: Normal).
    #[serde(default)]
    pub min_priority: NotificationPriority,
    /// Event types to deliver. Empty delivers everything.
    #[serde(default)]
    pub events: Vec<String>,
    /// Request timeout in seconds. Runs wait on each send, so this bounds
    /// how long a stalled webhook can hold a run.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_timeout() -> u64 {
    10
}

fn default_username() -> Option<String> {
    Some("Jellyfin Collection".to_string())
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            name: None,
            enabled: false,
            webhook_url: String::new(),
            username: default_username(),
            avatar_url: None,
            min_priority: NotificationPriority::Normal,
            events: Vec::new(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Discord notification channel.
pub struct DiscordChannel {
    config: DiscordConfig,
    subscriptions: Subscriptions,
    client: Client,
}

impl DiscordChannel {
    /// Create a new Discord channel.
    pub fn new(config: DiscordConfig) -> Result<Self> {
        let client = build_client(Duration::from_secs(config.timeout_secs))?;
        let subscriptions = Subscriptions::from_names(&config.events);
        Ok(Self {
            config,
            subscriptions,
            client,
        })
    }

    /// Embed color per event.
    fn get_color(event: &NotificationEvent) -> u32 {
        match event {
            NotificationEvent::RunStarted { .. } | NotificationEvent::Test { .. } => COLOR_BLUE,
            NotificationEvent::RunCompleted { errors, .. } => {
                if *errors > 0 {
                    COLOR_RED
                } else {
                    COLOR_GREEN
                }
            }
            NotificationEvent::CollectionChanged { .. } => COLOR_YELLOW,
            NotificationEvent::MediaRequested { .. } => COLOR_PURPLE,
            NotificationEvent::Error { .. } => COLOR_RED,
        }
    }

    /// Build the webhook payload for an event.
    fn build_payload(&self, event: &NotificationEvent) -> serde_json::Value {
        let mut embed = json!({
            "title": event.title(),
            "color": Self::get_color(event),
            "timestamp": event.timestamp().to_rfc3339(),
        });

        // Completion embeds carry only fields.
        if !matches!(event, NotificationEvent::RunCompleted { .. }) {
            embed["description"] = json!(event.description());
        }

        let fields = event.fields();
        if !fields.is_empty() {
            embed["fields"] = json!(fields);
        }

        let mut payload = json!({
            "embeds": [embed]
        });

        if let Some(username) = &self.config.username {
            payload["username"] = json!(username);
        }
        if let Some(avatar_url) = &self.config.avatar_url {
            payload["avatar_url"] = json!(avatar_url);
        }

        payload
    }
}

#[async_trait]
impl NotificationChannel for DiscordChannel {
    fn channel_type(&self) -> &'static str {
        "discord"
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled && !self.config.webhook_url.is_empty()
    }

    async fn send(&self, event: &NotificationEvent) -> Result<()> {
        if !self.is_enabled() || !self.subscriptions.accepts(event) {
            return Ok(());
        }

        if event.priority() < self.config.min_priority {
            debug!(
                "Skipping Discord notification for {} (priority {} < {})",
                event.event_type(),
                event.priority(),
                self.config.min_priority
            );
            return Ok(());
        }

        let payload = self.build_payload(event);
        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Notification(format!("Discord request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Discord webhook failed: {} - {}", status, body);
            return Err(Error::Notification(format!(
                "Discord webhook failed: {} - {}",
                status, body
            )));
        }

        debug!("Discord notification sent: {}", event.event_type());
        Ok(())
    }
}
