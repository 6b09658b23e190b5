use async_trait::async_trait;
use tracing::debug;

use arr_api::{MovieAddOptions, RadarrClient};

use super::settings::{ResolvedArrSettings, TagCache};
use super::{AcquisitionManager, AddedRecord};
use crate::domain::{ExternalId, ExternalIds, MediaKind};
use crate::{Error, Result};

/// Movies, keyed by TMDb id.
pub struct RadarrManager {
    client: RadarrClient,
    settings: ResolvedArrSettings,
    tags: TagCache,
}

impl RadarrManager {
    pub fn new(client: RadarrClient, settings: ResolvedArrSettings, tags: TagCache) -> Self {
        Self {
            client,
            settings,
            tags,
        }
    }

    fn tmdb_id(&self, id: &ExternalId) -> Result<i64> {
        match id {
            ExternalId::Tmdb(id) => Ok(*id),
            other => Err(Error::acquisition(
                self.name(),
                format!("movies are keyed by TMDb id, got {}", other),
            )),
        }
    }
}

#[async_trait]
impl AcquisitionManager for RadarrManager {
    fn name(&self) -> &'static str {
        "Radarr"
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Movie
    }

    fn lookup_key(&self, ids: &ExternalIds) -> Option<ExternalId> {
        ids.tmdb.map(ExternalId::Tmdb)
    }

    async fn exists(&self, id: &ExternalId) -> Result<bool> {
        let tmdb_id = self.tmdb_id(id)?;
        let record = self
            .client
            .movie_by_tmdb_id(tmdb_id)
            .await
            .map_err(|e| Error::acquisition(self.name(), e))?;
        Ok(record.is_some())
    }

    async fn add(&self, id: &ExternalId, tags: &[String]) -> Result<Option<AddedRecord>> {
        let tmdb_id = self.tmdb_id(id)?;
        let Some(lookup) = self
            .client
            .lookup_movie(tmdb_id)
            .await
            .map_err(|e| Error::acquisition(self.name(), e))?
        else {
            debug!(tmdb_id, "Movie not found in Radarr lookup");
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

        let options = MovieAddOptions {
            root_folder_path: self.settings.root_folder.clone(),
            quality_profile_id: self.settings.quality_profile_id,
            monitored: self.settings.monitored,
            minimum_availability: self.settings.minimum_availability.clone(),
            tags: tag_ids,
            search_for_movie: self.settings.search_on_add,
        };
        let record = self
            .client
            .add_movie(lookup, &options)
            .await
            .map_err(|e| Error::acquisition(self.name(), e))?;

        Ok(Some(AddedRecord {
            title: record.title,
            year: record.year,
        }))
    }
}
