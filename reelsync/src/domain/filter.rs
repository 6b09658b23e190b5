//! Declarative filters applied to aggregated candidates.

use serde::{Deserialize, Serialize};

use super::media::MediaItem;

/// Inclusive bounds. An absent bound, or an item lacking the field, never
/// causes a drop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub year_gte: Option<i32>,
    #[serde(default)]
    pub year_lte: Option<i32>,
    #[serde(default, alias = "critic_rating_gte")]
    pub vote_average_gte: Option<f64>,
    #[serde(default)]
    pub vote_average_lte: Option<f64>,
    #[serde(default, alias = "tmdb_vote_count_gte")]
    pub vote_count_gte: Option<i64>,
    #[serde(default)]
    pub vote_count_lte: Option<i64>,
    /// Country codes to exclude, compared case-insensitively.
    #[serde(default, alias = "origin_country_not")]
    pub country_not: Vec<String>,
}

impl FilterSpec {
    pub fn matches(&self, item: &MediaItem) -> bool {
        within(item.year, self.year_gte, self.year_lte)
            && within(item.vote_average, self.vote_average_gte, self.vote_average_lte)
            && within(item.vote_count, self.vote_count_gte, self.vote_count_lte)
            && !self.excludes_country(item.original_country.as_deref())
    }

    fn excludes_country(&self, country: Option<&str>) -> bool {
        country.is_some_and(|c| self.country_not.iter().any(|x| x.eq_ignore_ascii_case(c)))
    }
}

fn within<T: PartialOrd>(value: Option<T>, min: Option<T>, max: Option<T>) -> bool {
    let Some(value) = value else {
        return true;
    };
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

/// Keep items that pass `spec`, in order, then cut to the first `limit`.
pub fn apply_filters(items: Vec<MediaItem>, spec: &FilterSpec, limit: Option<usize>) -> Vec<MediaItem> {
    let filtered = items.into_iter().filter(|item| spec.matches(item));
    match limit {
        Some(limit) => filtered.take(limit).collect(),
        None => filtered.collect(),
    }
}
