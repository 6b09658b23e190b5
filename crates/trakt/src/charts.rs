use std::fmt;

use crate::TraktClient;
use crate::models::{MovieEntry, ShowEntry, TraktMovie, TraktShow};

/// Period of the "most watched" charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPeriod {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    All,
}

impl ChartPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::All => "all",
        }
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TraktClient {
    /// GET /movies/trending
    pub async fn trending_movies(&self, limit: usize) -> crate::Result<Vec<TraktMovie>> {
        let rows: Vec<MovieEntry> = self
            .get("/movies/trending", &[("limit", limit.to_string())])
            .await?;
        Ok(rows.into_iter().map(|row| row.movie).collect())
    }

    /// GET /shows/trending
    pub async fn trending_shows(&self, limit: usize) -> crate::Result<Vec<TraktShow>> {
        let rows: Vec<ShowEntry> = self
            .get("/shows/trending", &[("limit", limit.to_string())])
            .await?;
        Ok(rows.into_iter().map(|row| row.show).collect())
    }

    /// GET /movies/popular
    pub async fn popular_movies(&self, limit: usize) -> crate::Result<Vec<TraktMovie>> {
        self.get("/movies/popular", &[("limit", limit.to_string())])
            .await
    }

    /// GET /shows/popular
    pub async fn popular_shows(&self, limit: usize) -> crate::Result<Vec<TraktShow>> {
        self.get("/shows/popular", &[("limit", limit.to_string())])
            .await
    }

    /// GET /movies/watched/{period}
    pub async fn watched_movies(
        &self,
        period: ChartPeriod,
        limit: usize,
    ) -> crate::Result<Vec<TraktMovie>> {
        let rows: Vec<MovieEntry> = self
            .get(
                &format!("/movies/watched/{period}"),
                &[("limit", limit.to_string())],
            )
            .await?;
        Ok(rows.into_iter().map(|row| row.movie).collect())
    }

    /// GET /shows/watched/{period}
    pub async fn watched_shows(
        &self,
        period: ChartPeriod,
        limit: usize,
    ) -> crate::Result<Vec<TraktShow>> {
        let rows: Vec<ShowEntry> = self
            .get(
                &format!("/shows/watched/{period}"),
                &[("limit", limit.to_string())],
            )
            .await?;
        Ok(rows.into_iter().map(|row| row.show).collect())
    }
}
