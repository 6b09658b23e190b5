use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of title a library holds and a provider feed returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

/// Library name keywords. Movie keywords win when both match.
const MOVIE_KEYWORDS: &[&str] = &["film", "movie", "cinéma", "cinema"];
const SERIES_KEYWORDS: &[&str] = &["série", "serie", "series", "tv", "show", "cartoon"];

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }

    /// Guess the kind of a library from its display name. Defaults to movies.
    pub fn infer_from_library_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if MOVIE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Self::Movie
        } else if SERIES_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Self::Series
        } else {
            Self::Movie
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIds {
    pub tmdb: Option<i64>,
    pub imdb: Option<String>,
    pub tvdb: Option<i64>,
}

/// A single identifier used for lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExternalId {
    Tmdb(i64),
    Imdb(String),
    Tvdb(i64),
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tmdb(id) => write!(f, "tmdb:{id}"),
            Self::Imdb(id) => write!(f, "imdb:{id}"),
            Self::Tvdb(id) => write!(f, "tvdb:{id}"),
        }
    }
}

/// A title as produced by a catalog provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub title: String,
    pub year: Option<i32>,
    pub kind: MediaKind,
    pub ids: ExternalIds,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub genres: Vec<String>,
    pub original_country: Option<String>,
}

impl MediaItem {
    pub fn new(title: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            title: title.into(),
            year: None,
            kind,
            ids: ExternalIds::default(),
            vote_average: None,
            vote_count: None,
            genres: Vec::new(),
            original_country: None,
        }
    }

    /// The catalog-of-record id used for deduplication and library matching.
    pub fn primary_id(&self) -> Option<i64> {
        self.ids.tmdb
    }

    /// "Title (Year)", or just the title when the year is unknown.
    pub fn display_title(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}

/// A record resolved in the media library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryItem {
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
}
