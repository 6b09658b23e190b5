use std::ops::Deref;

use reqwest::Client;
use serde_json::Value;
use tracing::info;

use crate::client::ArrClient;
use crate::models::{MediaRecord, MovieAddOptions};

pub struct RadarrClient {
    inner: ArrClient,
}

impl RadarrClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            inner: ArrClient::new(client, base_url, api_key, "Radarr"),
        }
    }

    /// GET /api/v3/movie?tmdbId=
    pub async fn movie_by_tmdb_id(&self, tmdb_id: i64) -> crate::Result<Option<MediaRecord>> {
        let movies: Vec<MediaRecord> = self
            .get_json("/movie", &[("tmdbId", tmdb_id.to_string())])
            .await?;
        Ok(movies.into_iter().next())
    }

    /// GET /api/v3/movie/lookup/tmdb?tmdbId=; `None` when TMDb does not know the id.
    pub async fn lookup_movie(&self, tmdb_id: i64) -> crate::Result<Option<Value>> {
        match self
            .get_json("/movie/lookup/tmdb", &[("tmdbId", tmdb_id.to_string())])
            .await
        {
            Ok(movie) => Ok(Some(movie)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// POST /api/v3/movie
    pub async fn add_movie(
        &self,
        mut lookup: Value,
        options: &MovieAddOptions,
    ) -> crate::Result<MediaRecord> {
        options.apply_to(&mut lookup);
        let record: MediaRecord = self.post_json("/movie", &lookup).await?;
        info!(title = %record.title, year = ?record.year, "Added movie to Radarr");
        Ok(record)
    }
}

impl Deref for RadarrClient {
    type Target = ArrClient;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
