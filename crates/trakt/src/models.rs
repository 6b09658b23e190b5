use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraktIds {
    #[serde(default)]
    pub trakt: Option<i64>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub tmdb: Option<i64>,
    #[serde(default)]
    pub imdb: Option<String>,
    #[serde(default)]
    pub tvdb: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraktMovie {
    #[serde(default = "unknown_title")]
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub ids: TraktIds,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub votes: Option<i64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub runtime: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraktShow {
    #[serde(default = "unknown_title")]
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub ids: TraktIds,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub votes: Option<i64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
}

/// Chart rows (trending, watched) wrap the movie with statistics.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MovieEntry {
    pub movie: TraktMovie,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ShowEntry {
    pub show: TraktShow,
}

/// Row of a user list. Seasons, episodes and people carry neither field.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEntry {
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default)]
    pub movie: Option<TraktMovie>,
    #[serde(default)]
    pub show: Option<TraktShow>,
}

fn unknown_title() -> String {
    "Unknown".to_string()
}
