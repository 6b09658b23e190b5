use reqwest::Method;
use serde_json::Value;

use crate::JellyfinClient;
use crate::models::{ItemsResponse, VirtualFolder};

/// Query for `GET /Items`.
#[derive(Debug, Clone, Default)]
pub struct ItemsQuery {
    pub parent_id: Option<String>,
    pub include_item_types: Option<String>,
    pub any_provider_id_equals: Option<String>,
    pub recursive: bool,
    pub fields: Option<String>,
    pub limit: Option<u32>,
    pub start_index: Option<u32>,
}

impl ItemsQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(parent) = &self.parent_id {
            query.push(("ParentId", parent.clone()));
        }
        if let Some(types) = &self.include_item_types {
            query.push(("IncludeItemTypes", types.clone()));
        }
        if let Some(provider) = &self.any_provider_id_equals {
            query.push(("AnyProviderIdEquals", provider.clone()));
        }
        if self.recursive {
            query.push(("Recursive", "true".to_string()));
        }
        if let Some(fields) = &self.fields {
            query.push(("Fields", fields.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("Limit", limit.to_string()));
        }
        if let Some(start) = self.start_index {
            query.push(("StartIndex", start.to_string()));
        }
        query
    }
}

impl JellyfinClient {
    /// GET /Library/VirtualFolders
    pub async fn virtual_folders(&self) -> crate::Result<Vec<VirtualFolder>> {
        self.get_json("/Library/VirtualFolders", &[]).await
    }

    /// GET /Items
    pub async fn items(&self, query: &ItemsQuery) -> crate::Result<ItemsResponse> {
        self.get_json("/Items", &query.query_pairs()).await
    }

    /// GET /Items/{id}, kept as raw JSON so it can be posted back unchanged.
    pub async fn get_item(&self, item_id: &str) -> crate::Result<Value> {
        self.get_json(&format!("/Items/{item_id}"), &[]).await
    }

    /// POST /Items/{id}
    pub async fn update_item(&self, item_id: &str, item: &Value) -> crate::Result<()> {
        let path = format!("/Items/{item_id}");
        let request = self.request(Method::POST, &path).json(item);
        self.send_write(request, &path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_lookup_query() {
        let query = ItemsQuery {
            parent_id: Some("lib1".into()),
            include_item_types: Some("Movie".into()),
            any_provider_id_equals: Some("Tmdb.603".into()),
            recursive: true,
            fields: Some("ProviderIds".into()),
            limit: Some(1),
            start_index: None,
        };
        assert_eq!(
            query.query_pairs(),
            vec![
                ("ParentId", "lib1".to_string()),
                ("IncludeItemTypes", "Movie".to_string()),
                ("AnyProviderIdEquals", "Tmdb.603".to_string()),
                ("Recursive", "true".to_string()),
                ("Fields", "ProviderIds".to_string()),
                ("Limit", "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_query() {
        assert!(ItemsQuery::default().query_pairs().is_empty());
    }
}
