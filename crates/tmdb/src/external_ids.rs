use crate::TmdbClient;
use crate::models::{MovieExternalIds, TvExternalIds};

impl TmdbClient {
    /// GET /tv/{series_id}/external_ids
    pub async fn tv_external_ids(&self, series_id: i64) -> crate::Result<TvExternalIds> {
        self.get(&format!("/tv/{series_id}/external_ids"), &[])
            .await
    }

    /// GET /movie/{movie_id}/external_ids
    pub async fn movie_external_ids(&self, movie_id: i64) -> crate::Result<MovieExternalIds> {
        self.get(&format!("/movie/{movie_id}/external_ids"), &[])
            .await
    }
}
