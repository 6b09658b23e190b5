//! TMDb adapter: trending, popular, discover and user lists.

use async_trait::async_trait;
use futures::{StreamExt, future, stream};
use tmdb_api::{ListItem, Movie, TimeWindow, TmdbClient, TvShow, genres};
use tracing::warn;

use super::CatalogProvider;
use crate::domain::{ChartSpec, DiscoverParams, ListRef, MediaItem, MediaKind, TrendingPeriod};
use crate::{Error, Result};

const PROVIDER: &str = "tmdb";

pub struct TmdbProvider {
    client: TmdbClient,
    enrich_concurrency: usize,
}

impl TmdbProvider {
    pub fn new(client: TmdbClient, enrich_concurrency: usize) -> Self {
        Self {
            client,
            enrich_concurrency: enrich_concurrency.max(1),
        }
    }

    /// Series feeds do not carry TVDB ids, which Sonarr needs. Fetch them per
    /// show; a failed lookup keeps the item without them.
    async fn show_with_ids(&self, show: TvShow) -> MediaItem {
        let mut item = show_to_item(&show);
        match self.client.tv_external_ids(show.id).await {
            Ok(ids) => {
                item.ids.tvdb = ids.tvdb_id;
                item.ids.imdb = ids.imdb_id.filter(|s| !s.is_empty());
            }
            Err(e) => warn!(tmdb_id = show.id, error = %e, "Failed to fetch external ids"),
        }
        item
    }

    async fn with_external_ids(&self, shows: Vec<TvShow>) -> Vec<MediaItem> {
        stream::iter(shows)
            .map(|show| self.show_with_ids(show))
            .buffered(self.enrich_concurrency)
            .collect()
            .await
    }
}

#[async_trait]
impl CatalogProvider for TmdbProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_trending(
        &self,
        kind: MediaKind,
        period: TrendingPeriod,
        limit: usize,
    ) -> Result<Vec<MediaItem>> {
        let window = match period {
            TrendingPeriod::Day => TimeWindow::Day,
            TrendingPeriod::Week => TimeWindow::Week,
        };
        match kind {
            MediaKind::Movie => {
                let movies = self
                    .client
                    .trending_movies(window, limit)
                    .await
                    .map_err(|e| Error::provider(PROVIDER, e))?;
                Ok(movies.iter().map(movie_to_item).collect())
            }
            MediaKind::Series => {
                let shows = self
                    .client
                    .trending_tv(window, limit)
                    .await
                    .map_err(|e| Error::provider(PROVIDER, e))?;
                Ok(self.with_external_ids(shows).await)
            }
        }
    }

    async fn fetch_popular(&self, kind: MediaKind, limit: usize) -> Result<Vec<MediaItem>> {
        match kind {
            MediaKind::Movie => {
                let movies = self
                    .client
                    .popular_movies(limit)
                    .await
                    .map_err(|e| Error::provider(PROVIDER, e))?;
                Ok(movies.iter().map(movie_to_item).collect())
            }
            MediaKind::Series => {
                let shows = self
                    .client
                    .popular_tv(limit)
                    .await
                    .map_err(|e| Error::provider(PROVIDER, e))?;
                Ok(self.with_external_ids(shows).await)
            }
        }
    }

    async fn discover(
        &self,
        kind: MediaKind,
        params: &DiscoverParams,
        limit: usize,
    ) -> Result<Vec<MediaItem>> {
        let params = to_client_params(params);
        match kind {
            MediaKind::Movie => {
                let movies = self
                    .client
                    .discover_movies(&params, limit)
                    .await
                    .map_err(|e| Error::provider(PROVIDER, e))?;
                Ok(movies.iter().map(movie_to_item).collect())
            }
            MediaKind::Series => {
                let shows = self
                    .client
                    .discover_tv(&params, limit)
                    .await
                    .map_err(|e| Error::provider(PROVIDER, e))?;
                Ok(self.with_external_ids(shows).await)
            }
        }
    }

    async fn fetch_chart(&self, _kind: MediaKind, _chart: &ChartSpec) -> Result<Vec<MediaItem>> {
        Err(Error::unsupported(PROVIDER, "chart"))
    }

    async fn fetch_list(&self, list: &ListRef, kind: Option<MediaKind>) -> Result<Vec<MediaItem>> {
        let ListRef::Id { id } = list else {
            return Err(Error::provider(
                PROVIDER,
                format!("list '{list}' is not a TMDb list id"),
            ));
        };
        let entries = self
            .client
            .list_items(id)
            .await
            .map_err(|e| Error::provider(PROVIDER, e))?;

        // Keep list order; shows are enriched in place.
        let items: Vec<MediaItem> = stream::iter(entries)
            .map(|entry| async move {
                match entry {
                    ListItem::Movie(movie) if kind != Some(MediaKind::Series) => {
                        Some(movie_to_item(&movie))
                    }
                    ListItem::Tv(show) if kind != Some(MediaKind::Movie) => {
                        Some(self.show_with_ids(show).await)
                    }
                    _ => None,
                }
            })
            .buffered(self.enrich_concurrency)
            .filter_map(future::ready)
            .collect()
            .await;
        Ok(items)
    }
}

fn to_client_params(params: &DiscoverParams) -> tmdb_api::DiscoverParams {
    tmdb_api::DiscoverParams {
        sort_by: params.sort_by.clone(),
        with_genres: params.with_genres.clone(),
        without_genres: params.without_genres.clone(),
        vote_average_gte: params.vote_average_gte,
        vote_average_lte: params.vote_average_lte,
        vote_count_gte: params.vote_count_gte,
        vote_count_lte: params.vote_count_lte,
        date_gte: params.date_gte.clone(),
        date_lte: params.date_lte.clone(),
        with_watch_providers: params.with_watch_providers.clone(),
        watch_region: params.watch_region.clone(),
        with_original_language: params.with_original_language.clone(),
        with_release_type: params.with_release_type.clone(),
        region: params.region.clone(),
        with_status: params.with_status.clone(),
    }
}

fn movie_to_item(movie: &Movie) -> MediaItem {
    let mut item = MediaItem::new(movie.title.clone(), MediaKind::Movie);
    item.year = movie.year();
    item.ids.tmdb = Some(movie.id);
    item.vote_average = movie.vote_average;
    item.vote_count = movie.vote_count;
    item.genres = movie
        .genre_ids
        .iter()
        .filter_map(|id| genres::movie_genre(*id))
        .map(str::to_string)
        .collect();
    item.original_country = movie.origin_country.first().map(|c| c.to_uppercase());
    item
}

fn show_to_item(show: &TvShow) -> MediaItem {
    let mut item = MediaItem::new(show.name.clone(), MediaKind::Series);
    item.year = show.year();
    item.ids.tmdb = Some(show.id);
    item.vote_average = show.vote_average;
    item.vote_count = show.vote_count;
    item.genres = show
        .genre_ids
        .iter()
        .filter_map(|id| genres::tv_genre(*id))
        .map(str::to_string)
        .collect();
    item.original_country = show.origin_country.first().map(|c| c.to_uppercase());
    item
}
