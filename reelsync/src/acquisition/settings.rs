//! Radarr/Sonarr settings and the values resolved from them at startup.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use arr_api::{ArrClient, find_profile, pick_root_folder};

use crate::{Error, Result};

/// `[radarr]` / `[sonarr]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrSettings {
    pub url: String,
    pub api_key: String,
    /// Preferred root folder; defaults to `/movies` or `/tv`.
    #[serde(default)]
    pub root_folder: Option<String>,
    #[serde(default = "default_quality_profile")]
    pub quality_profile: String,
    #[serde(default = "default_tag")]
    pub default_tag: String,
    #[serde(default = "default_true")]
    pub monitored: bool,
    #[serde(default = "default_true")]
    pub search_on_add: bool,
    /// Radarr only.
    #[serde(default = "default_minimum_availability")]
    pub minimum_availability: String,
    /// Sonarr only.
    #[serde(default = "default_true")]
    pub season_folder: bool,
    /// Sonarr only.
    #[serde(default = "default_monitor")]
    pub monitor: String,
    /// Sonarr only.
    #[serde(default = "default_series_type")]
    pub series_type: String,
}

fn default_quality_profile() -> String {
    "HD-1080p".to_string()
}

fn default_tag() -> String {
    "jfc".to_string()
}

fn default_true() -> bool {
    true
}

fn default_minimum_availability() -> String {
    "announced".to_string()
}

fn default_monitor() -> String {
    "all".to_string()
}

fn default_series_type() -> String {
    "standard".to_string()
}

impl ArrSettings {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            root_folder: None,
            quality_profile: default_quality_profile(),
            default_tag: default_tag(),
            monitored: true,
            search_on_add: true,
            minimum_availability: default_minimum_availability(),
            season_folder: true,
            monitor: default_monitor(),
            series_type: default_series_type(),
        }
    }
}

/// Server-side ids and paths, looked up once and then passed by value.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArrSettings {
    pub root_folder: String,
    pub quality_profile_id: i64,
    pub default_tag: String,
    pub monitored: bool,
    pub search_on_add: bool,
    pub minimum_availability: String,
    pub season_folder: bool,
    pub monitor: String,
    pub series_type: String,
}

impl ResolvedArrSettings {
    /// Resolve the quality profile id and root folder against the server.
    pub async fn resolve(
        client: &ArrClient,
        settings: &ArrSettings,
        default_root: &str,
    ) -> Result<Self> {
        let service = client.service();
        let profiles = client
            .quality_profiles()
            .await
            .map_err(|e| Error::acquisition(service, e))?;
        let profile = find_profile(&profiles, &settings.quality_profile).ok_or_else(|| {
            Error::config(format!(
                "{} quality profile '{}' not found",
                service, settings.quality_profile
            ))
        })?;

        let folders = client
            .root_folders()
            .await
            .map_err(|e| Error::acquisition(service, e))?;
        let preferred = settings.root_folder.as_deref().unwrap_or(default_root);
        let root_folder = pick_root_folder(&folders, preferred)
            .ok_or_else(|| Error::config(format!("No root folder configured in {}", service)))?
            .to_string();

        info!(
            service,
            quality_profile = %profile.name,
            quality_profile_id = profile.id,
            %root_folder,
            "Resolved acquisition settings"
        );

        Ok(Self {
            root_folder,
            quality_profile_id: profile.id,
            default_tag: settings.default_tag.clone(),
            monitored: settings.monitored,
            search_on_add: settings.search_on_add,
            minimum_availability: settings.minimum_availability.clone(),
            season_folder: settings.season_folder,
            monitor: settings.monitor.clone(),
            series_type: settings.series_type.clone(),
        })
    }
}

/// Tag label to server tag id. Labels compare case-insensitively.
#[derive(Debug, Default)]
pub struct TagCache {
    ids: DashMap<String, i64>,
}

impl TagCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<i64> {
        self.ids.get(&label.to_lowercase()).map(|id| *id)
    }

    pub fn insert(&self, label: &str, id: i64) {
        self.ids.insert(label.to_lowercase(), id);
    }

    /// Cached id, else an existing server tag, else a newly created one.
    pub async fn get_or_create(&self, client: &ArrClient, label: &str) -> arr_api::Result<i64> {
        if let Some(id) = self.get(label) {
            return Ok(id);
        }

        let existing = client.tags().await?;
        if let Some(tag) = existing
            .iter()
            .find(|t| t.label.eq_ignore_ascii_case(label))
        {
            debug!(service = client.service(), label, id = tag.id, "Found tag");
            self.insert(label, tag.id);
            return Ok(tag.id);
        }

        let created = client.create_tag(label).await?;
        info!(service = client.service(), label, id = created.id, "Created tag");
        self.insert(label, created.id);
        Ok(created.id)
    }

    /// Ids for every label, in order.
    pub async fn ids_for(&self, client: &ArrClient, labels: &[String]) -> arr_api::Result<Vec<i64>> {
        let mut ids = Vec::with_capacity(labels.len());
        for label in labels {
            ids.push(self.get_or_create(client, label).await?);
        }
        Ok(ids)
    }
}
