use std::ops::Deref;

use reqwest::Client;
use serde_json::Value;
use tracing::info;

use crate::client::ArrClient;
use crate::models::{MediaRecord, SeriesAddOptions};

pub struct SonarrClient {
    inner: ArrClient,
}

impl SonarrClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            inner: ArrClient::new(client, base_url, api_key, "Sonarr"),
        }
    }

    /// GET /api/v3/series?tvdbId=
    pub async fn series_by_tvdb_id(&self, tvdb_id: i64) -> crate::Result<Option<MediaRecord>> {
        let series: Vec<MediaRecord> = self
            .get_json("/series", &[("tvdbId", tvdb_id.to_string())])
            .await?;
        Ok(series.into_iter().next())
    }

    /// GET /api/v3/series/lookup?term=tvdb:{id}
    pub async fn lookup_series(&self, tvdb_id: i64) -> crate::Result<Option<Value>> {
        let results: Vec<Value> = self
            .get_json("/series/lookup", &[("term", format!("tvdb:{tvdb_id}"))])
            .await?;
        Ok(results.into_iter().next())
    }

    /// POST /api/v3/series
    pub async fn add_series(
        &self,
        mut lookup: Value,
        options: &SeriesAddOptions,
    ) -> crate::Result<MediaRecord> {
        options.apply_to(&mut lookup);
        let record: MediaRecord = self.post_json("/series", &lookup).await?;
        info!(title = %record.title, year = ?record.year, "Added series to Sonarr");
        Ok(record)
    }
}

impl Deref for SonarrClient {
    type Target = ArrClient;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
