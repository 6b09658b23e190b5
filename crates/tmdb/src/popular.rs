use crate::TmdbClient;
use crate::models::{Movie, TvShow};

impl TmdbClient {
    /// GET /movie/popular
    pub async fn popular_movies(&self, limit: usize) -> crate::Result<Vec<Movie>> {
        self.paged("/movie/popular", self.region_query(), limit).await
    }

    /// GET /tv/popular
    pub async fn popular_tv(&self, limit: usize) -> crate::Result<Vec<TvShow>> {
        self.paged("/tv/popular", Vec::new(), limit).await
    }

    fn region_query(&self) -> Vec<(&'static str, String)> {
        self.region
            .iter()
            .map(|region| ("region", region.clone()))
            .collect()
    }
}
