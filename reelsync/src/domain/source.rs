//! Declarative provider sources of a collection.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Tmdb,
    Trakt,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tmdb => "tmdb",
            Self::Trakt => "trakt",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of `[[libraries.collections.sources]]`.
///
/// ```toml
/// [[libraries.collections.sources]]
/// provider = "tmdb"
/// feed = "trending"
/// period = "week"
/// limit = 20
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub provider: ProviderKind,
    #[serde(flatten)]
    pub feed: FeedSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "feed", rename_all = "snake_case")]
pub enum FeedSpec {
    Trending {
        #[serde(default)]
        period: TrendingPeriod,
        #[serde(default = "default_limit")]
        limit: usize,
    },
    Popular {
        #[serde(default = "default_limit")]
        limit: usize,
    },
    Discover {
        #[serde(default)]
        params: DiscoverParams,
        #[serde(default = "default_limit")]
        limit: usize,
    },
    Chart {
        chart: ChartKind,
        #[serde(default)]
        period: ChartPeriod,
        #[serde(default = "default_limit")]
        limit: usize,
    },
    List {
        list: ListRef,
    },
}

impl FeedSpec {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Trending { .. } => "trending",
            Self::Popular { .. } => "popular",
            Self::Discover { .. } => "discover",
            Self::Chart { .. } => "chart",
            Self::List { .. } => "list",
        }
    }

    /// Requested item count, if the feed has one.
    pub fn limit(&self) -> Option<usize> {
        match self {
            Self::Trending { limit, .. }
            | Self::Popular { limit }
            | Self::Discover { limit, .. }
            | Self::Chart { limit, .. } => Some(*limit),
            Self::List { .. } => None,
        }
    }
}

fn default_limit() -> usize {
    20
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingPeriod {
    Day,
    #[default]
    Week,
}

/// Arguments of a chart fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub chart: ChartKind,
    pub period: ChartPeriod,
    pub limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Watched,
    Trending,
    Popular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartPeriod {
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    All,
}

/// A curated list: `{ id = "8123" }` on TMDb, `{ user = "..", slug = ".." }`
/// on Trakt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListRef {
    User { user: String, slug: String },
    Id { id: String },
}

impl fmt::Display for ListRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User { user, slug } => write!(f, "{user}/{slug}"),
            Self::Id { id } => f.write_str(id),
        }
    }
}

/// Parameters of a discover query. Keys accept TMDb's dotted spelling
/// (`vote_average.gte`) as well as underscores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoverParams {
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub with_genres: Option<String>,
    #[serde(default)]
    pub without_genres: Option<String>,
    #[serde(default, alias = "vote_average.gte")]
    pub vote_average_gte: Option<f64>,
    #[serde(default, alias = "vote_average.lte")]
    pub vote_average_lte: Option<f64>,
    #[serde(default, alias = "vote_count.gte")]
    pub vote_count_gte: Option<i64>,
    #[serde(default, alias = "vote_count.lte")]
    pub vote_count_lte: Option<i64>,
    #[serde(
        default,
        alias = "primary_release_date.gte",
        alias = "first_air_date.gte"
    )]
    pub date_gte: Option<String>,
    #[serde(
        default,
        alias = "primary_release_date.lte",
        alias = "first_air_date.lte"
    )]
    pub date_lte: Option<String>,
    #[serde(default)]
    pub with_watch_providers: Option<String>,
    #[serde(default)]
    pub watch_region: Option<String>,
    #[serde(default)]
    pub with_original_language: Option<String>,
    #[serde(default)]
    pub with_release_type: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub with_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sources {
        sources: Vec<SourceSpec>,
    }

    #[test]
    fn test_sources_from_toml() {
        let toml = r#"
            [[sources]]
            provider = "tmdb"
            feed = "trending"
            period = "day"
            limit = 10

            [[sources]]
            provider = "tmdb"
            feed = "popular"

            [[sources]]
            provider = "tmdb"
            feed = "discover"
            limit = 30
            params = { with_genres = "28", "vote_average.gte" = 7.0, "primary_release_date.gte" = "2020-01-01" }

            [[sources]]
            provider = "trakt"
            feed = "chart"
            chart = "watched"
            period = "monthly"

            [[sources]]
            provider = "trakt"
            feed = "list"
            list = { user = "someone", slug = "best-of" }

            [[sources]]
            provider = "tmdb"
            feed = "list"
            list = { id = "8123" }
        "#;
        let parsed: Sources = toml::from_str(toml).unwrap();
        let s = &parsed.sources;

        assert_eq!(
            s[0].feed,
            FeedSpec::Trending {
                period: TrendingPeriod::Day,
                limit: 10
            }
        );
        assert_eq!(s[1].feed, FeedSpec::Popular { limit: 20 });
        match &s[2].feed {
            FeedSpec::Discover { params, limit } => {
                assert_eq!(*limit, 30);
                assert_eq!(params.with_genres.as_deref(), Some("28"));
                assert_eq!(params.vote_average_gte, Some(7.0));
                assert_eq!(params.date_gte.as_deref(), Some("2020-01-01"));
            }
            other => panic!("unexpected feed {other:?}"),
        }
        assert_eq!(s[3].provider, ProviderKind::Trakt);
        assert_eq!(
            s[3].feed,
            FeedSpec::Chart {
                chart: ChartKind::Watched,
                period: ChartPeriod::Monthly,
                limit: 20,
            }
        );
        assert_eq!(
            s[4].feed,
            FeedSpec::List {
                list: ListRef::User {
                    user: "someone".into(),
                    slug: "best-of".into()
                }
            }
        );
        assert_eq!(
            s[5].feed,
            FeedSpec::List {
                list: ListRef::Id { id: "8123".into() }
            }
        );
    }

    #[test]
    fn test_unknown_feed_rejected() {
        let toml = "[[sources]]\nprovider = \"tmdb\"\nfeed = \"upcoming\"\n";
        assert!(toml::from_str::<Sources>(toml).is_err());
    }
}
