use crate::TmdbClient;
use crate::models::{Movie, TvShow};

/// Which discover endpoint a parameter set is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverTarget {
    Movie,
    Tv,
}

/// Filters for `/discover/movie` and `/discover/tv`.
///
/// `date_gte`/`date_lte` map to `primary_release_date` for movies and to
/// `first_air_date` for series. Release type and region only apply to movies,
/// status only to series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoverParams {
    pub sort_by: Option<String>,
    pub with_genres: Option<String>,
    pub without_genres: Option<String>,
    pub vote_average_gte: Option<f64>,
    pub vote_average_lte: Option<f64>,
    pub vote_count_gte: Option<i64>,
    pub vote_count_lte: Option<i64>,
    pub date_gte: Option<String>,
    pub date_lte: Option<String>,
    pub with_watch_providers: Option<String>,
    pub watch_region: Option<String>,
    pub with_original_language: Option<String>,
    pub with_release_type: Option<String>,
    pub region: Option<String>,
    pub with_status: Option<String>,
}

impl DiscoverParams {
    pub fn query_pairs(&self, target: DiscoverTarget) -> Vec<(&'static str, String)> {
        let mut query = vec![(
            "sort_by",
            self.sort_by
                .clone()
                .unwrap_or_else(|| "popularity.desc".to_string()),
        )];

        let (date_gte_key, date_lte_key) = match target {
            DiscoverTarget::Movie => ("primary_release_date.gte", "primary_release_date.lte"),
            DiscoverTarget::Tv => ("first_air_date.gte", "first_air_date.lte"),
        };

        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value {
                query.push((key, value));
            }
        };

        push("with_genres", self.with_genres.clone());
        push("without_genres", self.without_genres.clone());
        push("vote_average.gte", self.vote_average_gte.map(|v| v.to_string()));
        push("vote_average.lte", self.vote_average_lte.map(|v| v.to_string()));
        push("vote_count.gte", self.vote_count_gte.map(|v| v.to_string()));
        push("vote_count.lte", self.vote_count_lte.map(|v| v.to_string()));
        push(date_gte_key, self.date_gte.clone());
        push(date_lte_key, self.date_lte.clone());
        push("with_watch_providers", self.with_watch_providers.clone());
        push("watch_region", self.watch_region.clone());
        push("with_original_language", self.with_original_language.clone());

        match target {
            DiscoverTarget::Movie => {
                push("with_release_type", self.with_release_type.clone());
                push("region", self.region.clone());
            }
            DiscoverTarget::Tv => {
                push("with_status", self.with_status.clone());
            }
        }

        query
    }
}

impl TmdbClient {
    /// GET /discover/movie
    pub async fn discover_movies(
        &self,
        params: &DiscoverParams,
        limit: usize,
    ) -> crate::Result<Vec<Movie>> {
        self.paged(
            "/discover/movie",
            params.query_pairs(DiscoverTarget::Movie),
            limit,
        )
        .await
    }

    /// GET /discover/tv
    pub async fn discover_tv(
        &self,
        params: &DiscoverParams,
        limit: usize,
    ) -> crate::Result<Vec<TvShow>> {
        self.paged("/discover/tv", params.query_pairs(DiscoverTarget::Tv), limit)
            .await
    }
}
