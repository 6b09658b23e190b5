use async_trait::async_trait;
use tracing::debug;

use arr_api::{SeriesAddOptions, SonarrClient};

use super::settings::{ResolvedArrSettings, TagCache};
use super::{AcquisitionManager, AddedRecord};
use crate::domain::{ExternalId, ExternalIds, MediaKind};
use crate::{Error, Result};

/// Series, keyed by TVDB id.
pub struct SonarrManager {
    client: SonarrClient,
    settings: ResolvedArrSettings,
    tags: TagCache,
}

impl SonarrManager {
    pub fn new(client: SonarrClient, settings: ResolvedArrSettings, tags: TagCache) -> Self {
        Self {
            client,
            settings,
            tags,
        }
    }

    fn tvdb_id(&self, id: &ExternalId) -> Result<i64> {
        match id {
            ExternalId::Tvdb(id) => Ok(*id),
            other => Err(Error::acquisition(
                self.name(),
                format!("series are keyed by TVDB id, got {}", other),
            )),
        }
    }
}

#[async_trait]
impl AcquisitionManager for SonarrManager {
    fn name(&self) -> &'static str {
        "Sonarr"
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Series
    }

    fn lookup_key(&self, ids: &ExternalIds) -> Option<ExternalId> {
        ids.tvdb.map(ExternalId::Tvdb)
    }

    async fn exists(&self, id: &ExternalId) -> Result<bool> {
        let tvdb_id = self.tvdb_id(id)?;
        let record = self
            .client
            .series_by_tvdb_id(tvdb_id)
            .await
            .map_err(|e| Error::acquisition(self.name(), e))?;
        Ok(record.is_some())
    }

    async fn add(&self, id: &ExternalId, tags: &[String]) -> Result<Option<AddedRecord>> {
        let tvdb_id = self.tvdb_id(id)?;
        let Some(lookup) = self
            .client
            .lookup_series(tvdb_id)
            .await
            .map_err(|e| Error::acquisition(self.name(), e))?
        else {
            debug!(tvdb_id, "Series not found in Sonarr lookup");
            return Ok(None);
        };

        let labels = if tags.is_empty() {
            vec![self.settings.default_tag.clone()]
        } else {
            tags.to_vec()
        };
        let tag_ids = self
            .tags
            .ids_for(&self.client, &labels)
            .await
            .map_err(|e| Error::acquisition(self.name(), e))?;

        let options = SeriesAddOptions {
            root_folder_path: self.settings.root_folder.clone(),
            quality_profile_id: self.settings.quality_profile_id,
            monitored: self.settings.monitored,
            season_folder: self.settings.season_folder,
            series_type: self.settings.series_type.clone(),
            monitor: self.settings.monitor.clone(),
            tags: tag_ids,
            search_for_missing_episodes: self.settings.search_on_add,
        };
        let record = self
            .client
            .add_series(lookup, &options)
            .await
            .map_err(|e| Error::acquisition(self.name(), e))?;

        Ok(Some(AddedRecord {
            title: record.title,
            year: record.year,
        }))
    }
}
