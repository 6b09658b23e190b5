use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::acquisition::ArrSettings;
use crate::domain::{LibraryDefinition, ProviderKind};
use crate::logging::LoggingSettings;
use crate::notification::NotificationServiceConfig;
use crate::notification::events::canonicalize_subscription_event_name;
use crate::scheduler::CronSchedule;
use crate::{Error, Result};

/// Whole configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub jellyfin: JellyfinSettings,
    pub tmdb: TmdbSettings,
    #[serde(default)]
    pub trakt: Option<TraktSettings>,
    #[serde(default)]
    pub radarr: Option<ArrSettings>,
    #[serde(default)]
    pub sonarr: Option<ArrSettings>,
    #[serde(default)]
    pub runner: RunnerSettings,
    #[serde(default)]
    pub scheduler: SchedulerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub notifications: NotificationServiceConfig,
    #[serde(default)]
    pub libraries: Vec<LibraryDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JellyfinSettings {
    pub url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbSettings {
    pub api_key: String,
    #[serde(default = "default_language")]
    pub language: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

fn default_language() -> Option<String> {
    Some("en-US".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraktSettings {
    pub client_id: String,
    /// OAuth token for private lists. Public feeds only need the client id.
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerSettings {
    /// Compute everything, write nothing.
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "default_one")]
    pub max_concurrent_collections: usize,
    #[serde(default = "default_fetches")]
    pub max_concurrent_fetches: usize,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

fn default_one() -> usize {
    1
}

fn default_fetches() -> usize {
    4
}

fn default_http_timeout() -> u64 {
    30
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            dry_run: false,
            max_concurrent_collections: default_one(),
            max_concurrent_fetches: default_fetches(),
            http_timeout_secs: default_http_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerSettings {
    /// Five-field cron expression.
    #[serde(default = "default_cron")]
    pub cron: String,
    /// IANA timezone the expression is evaluated in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_cron() -> String {
    "0 3 * * *".to_string()
}

fn default_timezone() -> String {
    "Europe/Paris".to_string()
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            cron: default_cron(),
            timezone: default_timezone(),
        }
    }
}

impl SchedulerSettings {
    pub fn schedule(&self) -> Result<CronSchedule> {
        CronSchedule::parse(&self.cron, &self.timezone)
    }
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reject configurations that cannot run. Returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        check_url("jellyfin.url", &self.jellyfin.url)?;
        if self.jellyfin.api_key.trim().is_empty() {
            return Err(Error::validation("jellyfin.api_key is empty"));
        }
        if self.tmdb.api_key.trim().is_empty() {
            return Err(Error::validation("tmdb.api_key is empty"));
        }
        if let Some(radarr) = &self.radarr {
            check_url("radarr.url", &radarr.url)?;
        }
        if let Some(sonarr) = &self.sonarr {
            check_url("sonarr.url", &sonarr.url)?;
        }

        if self.runner.max_concurrent_collections == 0 || self.runner.max_concurrent_fetches == 0 {
            return Err(Error::validation("runner concurrency limits must be at least 1"));
        }

        self.scheduler.schedule()?;

        for channel in &self.notifications.channels {
            if channel.timeout_secs() == 0 {
                return Err(Error::validation(format!(
                    "{} channel timeout_secs must be at least 1",
                    channel.channel_type()
                )));
            }
            for event in channel.events() {
                if canonicalize_subscription_event_name(event).is_none() {
                    return Err(Error::validation(format!(
                        "Unknown notification event '{}' on {} channel",
                        event,
                        channel.channel_type()
                    )));
                }
            }
        }

        let mut library_names = HashSet::new();
        // Box sets are server-wide, so a name may only be used by one library.
        let mut collection_owners: HashMap<&str, &str> = HashMap::new();
        for library in &self.libraries {
            if library.name.trim().is_empty() {
                return Err(Error::validation("Library name is empty"));
            }
            if !library_names.insert(library.name.as_str()) {
                return Err(Error::validation(format!(
                    "Duplicate library '{}'",
                    library.name
                )));
            }
            self.validate_library(library)?;
            for collection in &library.collections {
                if let Some(owner) =
                    collection_owners.insert(collection.name.as_str(), library.name.as_str())
                {
                    return Err(Error::validation(format!(
                        "Collection '{}' is defined in both '{}' and '{}'; collection names must be unique across libraries",
                        collection.name, owner, library.name
                    )));
                }
            }
        }
        Ok(())
    }

    fn validate_library(&self, library: &LibraryDefinition) -> Result<()> {
        let mut names = HashSet::new();
        for collection in &library.collections {
            if collection.name.trim().is_empty() {
                return Err(Error::validation(format!(
                    "Collection with empty name in library '{}'",
                    library.name
                )));
            }
            if !names.insert(collection.name.as_str()) {
                return Err(Error::validation(format!(
                    "Duplicate collection '{}' in library '{}'",
                    collection.name, library.name
                )));
            }
            if collection.limit == Some(0) {
                return Err(Error::validation(format!(
                    "Collection '{}' has limit 0",
                    collection.name
                )));
            }
            for source in &collection.sources {
                if source.feed.limit() == Some(0) {
                    return Err(Error::validation(format!(
                        "Source {} {} of collection '{}' has limit 0",
                        source.provider,
                        source.feed.name(),
                        collection.name
                    )));
                }
                if source.provider == ProviderKind::Trakt && self.trakt.is_none() {
                    warn!(
                        collection = %collection.name,
                        "Collection uses Trakt but [trakt] is not configured; source will be skipped"
                    );
                }
            }
        }
        Ok(())
    }
}

fn check_url(field: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| Error::validation(format!("{} '{}' is not a valid URL: {}", field, value, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::validation(format!(
            "{} must be an http(s) URL, got '{}'",
            field, value
        )));
    }
    Ok(())
}
