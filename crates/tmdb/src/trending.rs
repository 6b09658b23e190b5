use std::fmt;

use crate::TmdbClient;
use crate::models::{Movie, TvShow};

/// Window of the trending charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TmdbClient {
    /// GET /trending/movie/{time_window}
    pub async fn trending_movies(
        &self,
        window: TimeWindow,
        limit: usize,
    ) -> crate::Result<Vec<Movie>> {
        self.paged(&format!("/trending/movie/{window}"), Vec::new(), limit)
            .await
    }

    /// GET /trending/tv/{time_window}
    pub async fn trending_tv(&self, window: TimeWindow, limit: usize) -> crate::Result<Vec<TvShow>> {
        self.paged(&format!("/trending/tv/{window}"), Vec::new(), limit)
            .await
    }
}
