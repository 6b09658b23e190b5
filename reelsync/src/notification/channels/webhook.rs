//! Generic JSON webhook channel.
//!
//! Posts one JSON document per event:
//!
//! ```json
//! { "event": "collection_changed", "priority": "normal",
//!   "title": "...", "description": "...", "fields": [...],
//!   "timestamp": "...", "data": { "CollectionChanged": { ... } } }
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::{NotificationChannel, Subscriptions};
use crate::notification::events::{NotificationEvent, NotificationPriority};
use crate::utils::http_client::build_client;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WebhookMethod {
    #[default]
    Post,
    Put,
}

/// `type = "webhook"` channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub url: String,
    #[serde(default)]
    pub method: WebhookMethod,
    /// Extra request headers, e.g. `headers = { X-Source = "reelsync" }`.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub auth: Option<WebhookAuth>,
    #[serde(default)]
    pub min_priority: NotificationPriority,
    /// Event types to deliver. Empty delivers everything.
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_timeout() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookAuth {
    Bearer { token: String },
    Basic { username: String, password: String },
    Header { name: String, value: String },
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            name: None,
            enabled: false,
            url: String::new(),
            method: WebhookMethod::Post,
            headers: BTreeMap::new(),
            auth: None,
            min_priority: NotificationPriority::Normal,
            events: Vec::new(),
            timeout_secs: default_timeout(),
        }
    }
}

pub struct WebhookChannel {
    config: WebhookConfig,
    subscriptions: Subscriptions,
    headers: HeaderMap,
    client: Client,
}

impl WebhookChannel {
    /// Fails on header names or values HTTP cannot carry.
    pub fn new(config: WebhookConfig) -> Result<Self> {
        let headers = request_headers(&config)?;
        let client = build_client(Duration::from_secs(config.timeout_secs))?;
        let subscriptions = Subscriptions::from_names(&config.events);
        Ok(Self {
            config,
            subscriptions,
            headers,
            client,
        })
    }

    fn build_payload(&self, event: &NotificationEvent) -> serde_json::Value {
        json!({
            "event": event.event_type(),
            "priority": event.priority().to_string(),
            "title": event.title(),
            "description": event.description(),
            "fields": event.fields(),
            "timestamp": event.timestamp().to_rfc3339(),
            "data": event,
        })
    }
}

/// Static headers plus bearer/header auth. Basic auth is applied per request.
fn request_headers(config: &WebhookConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        insert_header(&mut headers, name, value)?;
    }
    match &config.auth {
        Some(WebhookAuth::Bearer { token }) => {
            insert_header(&mut headers, AUTHORIZATION.as_str(), &format!("Bearer {token}"))?;
        }
        Some(WebhookAuth::Header { name, value }) => insert_header(&mut headers, name, value)?,
        Some(WebhookAuth::Basic { .. }) | None => {}
    }
    Ok(headers)
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<()> {
    let name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::config(format!("Invalid webhook header name '{name}': {e}")))?;
    let value = HeaderValue::from_str(value)
        .map_err(|e| Error::config(format!("Invalid value for webhook header '{name}': {e}")))?;
    headers.insert(name, value);
    Ok(())
}

#[async_trait]
impl NotificationChannel for WebhookChannel {
    fn channel_type(&self) -> &'static str {
        "webhook"
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled && !self.config.url.is_empty()
    }

    async fn send(&self, event: &NotificationEvent) -> Result<()> {
        if !self.is_enabled() || !self.subscriptions.accepts(event) {
            return Ok(());
        }
        if event.priority() < self.config.min_priority {
            debug!(event = event.event_type(), "Below webhook min_priority, skipping");
            return Ok(());
        }

        let request = match self.config.method {
            WebhookMethod::Post => self.client.post(&self.config.url),
            WebhookMethod::Put => self.client.put(&self.config.url),
        };
        let mut request = request
            .headers(self.headers.clone())
            .json(&self.build_payload(event));
        if let Some(WebhookAuth::Basic { username, password }) = &self.config.auth {
            request = request.basic_auth(username, Some(password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Notification(format!("Webhook request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, event = event.event_type(), "Webhook rejected notification");
            return Err(Error::Notification(format!("Webhook returned {}: {}", status, body)));
        }

        debug!(event = event.event_type(), "Webhook notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn enabled(url: &str) -> WebhookConfig {
        WebhookConfig {
            enabled: true,
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_config_from_toml() {
        let config: WebhookConfig = toml::from_str(
            r#"
            url = "https://hooks.example.com/reelsync"
            method = "PUT"
            events = ["changes", "errors"]
            headers = { X-Source = "reelsync" }
            auth = { type = "bearer", token = "secret" }
            "#,
        )
        .unwrap();

        assert!(config.enabled);
        assert_eq!(config.method, WebhookMethod::Put);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.headers["X-Source"], "reelsync");
        assert!(matches!(config.auth, Some(WebhookAuth::Bearer { .. })));
    }

    #[test]
    fn test_collection_change_payload() {
        let channel = WebhookChannel::new(enabled("https://hooks.example.com")).unwrap();
        let event = NotificationEvent::CollectionChanged {
            collection: "Trending Movies".to_string(),
            library: "Films".to_string(),
            added: vec!["Dune (2021)".to_string()],
            removed: Vec::new(),
            timestamp: Utc::now(),
        };

        let payload = channel.build_payload(&event);
        assert_eq!(payload["event"], "collection_changed");
        assert_eq!(payload["priority"], "normal");
        assert_eq!(payload["title"], "Collection Updated: Trending Movies");
        assert_eq!(payload["fields"][0]["name"], "Added (1)");
        assert_eq!(
            payload["data"]["CollectionChanged"]["library"],
            "Films"
        );
    }

    #[test]
    fn test_auth_and_static_headers() {
        let mut config = enabled("https://hooks.example.com");
        config.headers.insert("X-Source".to_string(), "reelsync".to_string());
        config.auth = Some(WebhookAuth::Bearer {
            token: "secret".to_string(),
        });

        let headers = request_headers(&config).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer secret");
        assert_eq!(headers["x-source"], "reelsync");

        config.auth = Some(WebhookAuth::Basic {
            username: "u".to_string(),
            password: "p".to_string(),
        });
        assert!(!request_headers(&config).unwrap().contains_key(AUTHORIZATION));
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let mut config = enabled("https://hooks.example.com");
        config.headers.insert("Bad Header".to_string(), "x".to_string());

        assert!(matches!(
            WebhookChannel::new(config),
            Err(Error::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_unsubscribed_event_is_not_sent() {
        // Nothing listens on this port; a send attempt would fail.
        let mut config = enabled("http://127.0.0.1:9/hook");
        config.events = vec!["errors".to_string()];
        let channel = WebhookChannel::new(config).unwrap();

        let event = NotificationEvent::RunStarted {
            libraries: vec!["Films".to_string()],
            trigger: crate::domain::RunTrigger::Scheduled,
            timestamp: Utc::now(),
        };
        assert!(channel.send(&event).await.is_ok());
    }
}
