use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityProfile {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootFolder {
    #[serde(default)]
    pub id: Option<i64>,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Movie or series as stored by the server; only the fields used here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub tmdb_id: Option<i64>,
    #[serde(default)]
    pub tvdb_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieAddOptions {
    pub root_folder_path: String,
    pub quality_profile_id: i64,
    pub monitored: bool,
    pub minimum_availability: String,
    pub tags: Vec<i64>,
    pub search_for_movie: bool,
}

impl MovieAddOptions {
    /// Merge the add options into a lookup result to form the POST body.
    pub fn apply_to(&self, lookup: &mut Value) {
        merge(
            lookup,
            json!({
                "rootFolderPath": self.root_folder_path,
                "qualityProfileId": self.quality_profile_id,
                "monitored": self.monitored,
                "minimumAvailability": self.minimum_availability,
                "tags": self.tags,
                "addOptions": { "searchForMovie": self.search_for_movie },
            }),
        );
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesAddOptions {
    pub root_folder_path: String,
    pub quality_profile_id: i64,
    pub monitored: bool,
    pub season_folder: bool,
    pub series_type: String,
    pub monitor: String,
    pub tags: Vec<i64>,
    pub search_for_missing_episodes: bool,
}

impl SeriesAddOptions {
    pub fn apply_to(&self, lookup: &mut Value) {
        merge(
            lookup,
            json!({
                "rootFolderPath": self.root_folder_path,
                "qualityProfileId": self.quality_profile_id,
                "monitored": self.monitored,
                "seasonFolder": self.season_folder,
                "seriesType": self.series_type,
                "tags": self.tags,
                "addOptions": {
                    "monitor": self.monitor,
                    "searchForMissingEpisodes": self.search_for_missing_episodes,
                    "searchForCutoffUnmetEpisodes": false,
                },
            }),
        );
    }
}

fn merge(target: &mut Value, fields: Value) {
    if !target.is_object() {
        *target = json!({});
    }
    if let (Some(target), Value::Object(fields)) = (target.as_object_mut(), fields) {
        target.extend(fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_options_merge_into_lookup() {
        let mut lookup = json!({"title": "Heat", "tmdbId": 949, "year": 1995, "tags": [9]});
        MovieAddOptions {
            root_folder_path: "/movies".into(),
            quality_profile_id: 4,
            monitored: true,
            minimum_availability: "announced".into(),
            tags: vec![2],
            search_for_movie: true,
        }
        .apply_to(&mut lookup);

        assert_eq!(lookup["title"], "Heat");
        assert_eq!(lookup["rootFolderPath"], "/movies");
        assert_eq!(lookup["qualityProfileId"], 4);
        assert_eq!(lookup["tags"], json!([2]));
        assert_eq!(lookup["addOptions"]["searchForMovie"], true);
    }

    #[test]
    fn test_series_options_merge_into_lookup() {
        let mut lookup = json!({"title": "The Wire", "tvdbId": 79126});
        SeriesAddOptions {
            root_folder_path: "/tv".into(),
            quality_profile_id: 6,
            monitored: true,
            season_folder: true,
            series_type: "standard".into(),
            monitor: "all".into(),
            tags: vec![],
            search_for_missing_episodes: true,
        }
        .apply_to(&mut lookup);

        assert_eq!(lookup["seriesType"], "standard");
        assert_eq!(lookup["addOptions"]["monitor"], "all");
        assert_eq!(lookup["addOptions"]["searchForCutoffUnmetEpisodes"], false);
    }

    #[test]
    fn test_media_record_decodes() {
        let record: MediaRecord =
            serde_json::from_str(r#"{"id": 12, "title": "Heat", "year": 1995, "tmdbId": 949}"#)
                .unwrap();
        assert_eq!(record.tmdb_id, Some(949));
        assert_eq!(record.tvdb_id, None);
    }
}
