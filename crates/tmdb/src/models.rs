use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<i64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub origin_country: Vec<String>,
}

impl Movie {
    pub fn year(&self) -> Option<i32> {
        year_of(self.release_date.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvShow {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<i64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub origin_country: Vec<String>,
}

impl TvShow {
    pub fn year(&self) -> Option<i32> {
        year_of(self.first_air_date.as_deref())
    }
}

/// A user list as returned by `GET /list/{list_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDetails {
    pub id: serde_json::Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub items: Vec<ListItem>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// Entry of a mixed list. People and other media types are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "media_type", rename_all = "snake_case")]
pub enum ListItem {
    Movie(Movie),
    Tv(TvShow),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TvExternalIds {
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub tvdb_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieExternalIds {
    #[serde(default)]
    pub imdb_id: Option<String>,
}

/// TMDb returns `""` for unknown dates.
fn year_of(date: Option<&str>) -> Option<i32> {
    date.and_then(|d| d.get(..4)).and_then(|y| y.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_page_decodes() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 603, "title": "The Matrix", "release_date": "1999-03-30",
                 "vote_average": 8.2, "vote_count": 25000, "genre_ids": [28, 878],
                 "original_language": "en"},
                {"id": 1, "title": "Untitled", "release_date": ""}
            ],
            "total_pages": 12,
            "total_results": 240
        }"#;
        let page: PaginatedResponse<Movie> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 12);
        assert_eq!(page.results[0].year(), Some(1999));
        assert_eq!(page.results[0].genre_ids, vec![28, 878]);
        assert_eq!(page.results[1].year(), None);
        assert_eq!(page.results[1].vote_count, None);
    }

    #[test]
    fn test_tv_show_decodes_origin_country() {
        let json = r#"{"id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20",
                      "origin_country": ["US"], "vote_average": 8.9}"#;
        let show: TvShow = serde_json::from_str(json).unwrap();
        assert_eq!(show.year(), Some(2008));
        assert_eq!(show.origin_country, vec!["US".to_string()]);
    }

    #[test]
    fn test_list_items_tagged_by_media_type() {
        let json = r#"{
            "id": "8123",
            "name": "Favourites",
            "items": [
                {"media_type": "movie", "id": 603, "title": "The Matrix"},
                {"media_type": "tv", "id": 1396, "name": "Breaking Bad"},
                {"media_type": "person", "id": 6384, "name": "Keanu Reeves"}
            ]
        }"#;
        let list: ListDetails = serde_json::from_str(json).unwrap();
        assert!(matches!(list.items[0], ListItem::Movie(ref m) if m.id == 603));
        assert!(matches!(list.items[1], ListItem::Tv(ref s) if s.id == 1396));
        assert!(matches!(list.items[2], ListItem::Other));
    }

    #[test]
    fn test_tv_external_ids_nullable() {
        let ids: TvExternalIds =
            serde_json::from_str(r#"{"id": 1, "imdb_id": null, "tvdb_id": 81189}"#).unwrap();
        assert_eq!(ids.tvdb_id, Some(81189));
        assert!(ids.imdb_id.is_none());
    }
}
