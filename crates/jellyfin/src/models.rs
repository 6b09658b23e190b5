use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Entry of `GET /Library/VirtualFolders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VirtualFolder {
    pub name: String,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub collection_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsResponse {
    #[serde(default)]
    pub items: Vec<BaseItem>,
    #[serde(default)]
    pub total_record_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "Type")]
    pub item_type: Option<String>,
    #[serde(default)]
    pub production_year: Option<i32>,
    #[serde(default)]
    pub provider_ids: HashMap<String, String>,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl BaseItem {
    /// Provider id by key, ignoring the key's case (`Tmdb`, `tmdb`).
    pub fn provider_id(&self, key: &str) -> Option<&str> {
        self.provider_ids
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn tmdb_id(&self) -> Option<i64> {
        self.provider_id("Tmdb").and_then(|v| v.parse().ok())
    }

    pub fn tvdb_id(&self) -> Option<i64> {
        self.provider_id("Tvdb").and_then(|v| v.parse().ok())
    }

    pub fn imdb_id(&self) -> Option<&str> {
        self.provider_id("Imdb")
    }
}

/// Body of `POST /Collections`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CreatedCollection {
    pub id: String,
}
