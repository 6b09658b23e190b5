//! Trakt adapter: trending, popular, watched charts and user lists.

use async_trait::async_trait;
use tracing::debug;
use trakt_api::{TraktClient, TraktMovie, TraktShow};

use super::CatalogProvider;
use crate::domain::{
    ChartKind, ChartPeriod, ChartSpec, DiscoverParams, ListRef, MediaItem, MediaKind,
    TrendingPeriod,
};
use crate::{Error, Result};

const PROVIDER: &str = "trakt";

pub struct TraktProvider {
    client: TraktClient,
}

impl TraktProvider {
    pub fn new(client: TraktClient) -> Self {
        Self { client }
    }

    async fn trending(&self, kind: MediaKind, limit: usize) -> Result<Vec<MediaItem>> {
        let items: trakt_api::Result<Vec<MediaItem>> = match kind {
            MediaKind::Movie => self
                .client
                .trending_movies(limit)
                .await
                .map(|m| m.iter().map(movie_to_item).collect()),
            MediaKind::Series => self
                .client
                .trending_shows(limit)
                .await
                .map(|s| s.iter().map(show_to_item).collect()),
        };
        items.map_err(|e| Error::provider(PROVIDER, e))
    }

    async fn popular(&self, kind: MediaKind, limit: usize) -> Result<Vec<MediaItem>> {
        let items: trakt_api::Result<Vec<MediaItem>> = match kind {
            MediaKind::Movie => self
                .client
                .popular_movies(limit)
                .await
                .map(|m| m.iter().map(movie_to_item).collect()),
            MediaKind::Series => self
                .client
                .popular_shows(limit)
                .await
                .map(|s| s.iter().map(show_to_item).collect()),
        };
        items.map_err(|e| Error::provider(PROVIDER, e))
    }

    async fn watched(&self, kind: MediaKind, period: ChartPeriod, limit: usize) -> Result<Vec<MediaItem>> {
        let period = match period {
            ChartPeriod::Daily => trakt_api::ChartPeriod::Daily,
            ChartPeriod::Weekly => trakt_api::ChartPeriod::Weekly,
            ChartPeriod::Monthly => trakt_api::ChartPeriod::Monthly,
            ChartPeriod::Yearly => trakt_api::ChartPeriod::Yearly,
            ChartPeriod::All => trakt_api::ChartPeriod::All,
        };
        let items: trakt_api::Result<Vec<MediaItem>> = match kind {
            MediaKind::Movie => self
                .client
                .watched_movies(period, limit)
                .await
                .map(|m| m.iter().map(movie_to_item).collect()),
            MediaKind::Series => self
                .client
                .watched_shows(period, limit)
                .await
                .map(|s| s.iter().map(show_to_item).collect()),
        };
        items.map_err(|e| Error::provider(PROVIDER, e))
    }
}

#[async_trait]
impl CatalogProvider for TraktProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_trending(
        &self,
        kind: MediaKind,
        period: TrendingPeriod,
        limit: usize,
    ) -> Result<Vec<MediaItem>> {
        debug!(?period, "Trakt trending has no period, ignoring it");
        self.trending(kind, limit).await
    }

    async fn fetch_popular(&self, kind: MediaKind, limit: usize) -> Result<Vec<MediaItem>> {
        self.popular(kind, limit).await
    }

    async fn discover(
        &self,
        _kind: MediaKind,
        _params: &DiscoverParams,
        _limit: usize,
    ) -> Result<Vec<MediaItem>> {
        Err(Error::unsupported(PROVIDER, "discover"))
    }

    async fn fetch_chart(&self, kind: MediaKind, chart: &ChartSpec) -> Result<Vec<MediaItem>> {
        match chart.chart {
            ChartKind::Watched => self.watched(kind, chart.period, chart.limit).await,
            ChartKind::Trending => self.trending(kind, chart.limit).await,
            ChartKind::Popular => self.popular(kind, chart.limit).await,
        }
    }

    async fn fetch_list(&self, list: &ListRef, kind: Option<MediaKind>) -> Result<Vec<MediaItem>> {
        let ListRef::User { user, slug } = list else {
            return Err(Error::provider(
                PROVIDER,
                format!("list '{list}' needs a user and a slug"),
            ));
        };
        let entries = self
            .client
            .list_items(user, slug)
            .await
            .map_err(|e| Error::provider(PROVIDER, e))?;

        Ok(entries
            .iter()
            .filter_map(|entry| match entry.entry_type.as_str() {
                "movie" if kind != Some(MediaKind::Series) => entry.movie.as_ref().map(movie_to_item),
                "show" if kind != Some(MediaKind::Movie) => entry.show.as_ref().map(show_to_item),
                _ => None,
            })
            .collect())
    }
}

fn movie_to_item(movie: &TraktMovie) -> MediaItem {
    let mut item = MediaItem::new(movie.title.clone(), MediaKind::Movie);
    item.year = movie.year;
    item.ids.tmdb = movie.ids.tmdb;
    item.ids.imdb = movie.ids.imdb.clone();
    item.vote_average = movie.rating;
    item.vote_count = movie.votes;
    item.genres = movie.genres.clone();
    item.original_country = movie.country.as_deref().map(str::to_uppercase);
    item
}

fn show_to_item(show: &TraktShow) -> MediaItem {
    let mut item = MediaItem::new(show.title.clone(), MediaKind::Series);
    item.year = show.year;
    item.ids.tmdb = show.ids.tmdb;
    item.ids.imdb = show.ids.imdb.clone();
    item.ids.tvdb = show.ids.tvdb;
    item.vote_average = show.rating;
    item.vote_count = show.votes;
    item.genres = show.genres.clone();
    item.original_country = show.country.as_deref().map(str::to_uppercase);
    item
}
