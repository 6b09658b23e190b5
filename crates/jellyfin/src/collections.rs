use reqwest::Method;
use tracing::{debug, info};

use crate::JellyfinClient;
use crate::models::{BaseItem, CreatedCollection};
use crate::items::ItemsQuery;

impl JellyfinClient {
    /// Box sets, optionally restricted to a parent folder.
    pub async fn collections(&self, parent_id: Option<&str>) -> crate::Result<Vec<BaseItem>> {
        let query = ItemsQuery {
            parent_id: parent_id.map(str::to_string),
            include_item_types: Some("BoxSet".to_string()),
            recursive: true,
            fields: Some("ChildCount".to_string()),
            ..Default::default()
        };
        Ok(self.items(&query).await?.items)
    }

    /// Direct children of a box set.
    pub async fn collection_items(&self, collection_id: &str) -> crate::Result<Vec<BaseItem>> {
        let query = ItemsQuery {
            parent_id: Some(collection_id.to_string()),
            fields: Some("ProviderIds".to_string()),
            ..Default::default()
        };
        Ok(self.items(&query).await?.items)
    }

    /// POST /Collections?Name=..., returning the new box set id.
    pub async fn create_collection(&self, name: &str) -> crate::Result<String> {
        let path = "/Collections";
        let request = self.request(Method::POST, path).query(&[("Name", name)]);
        let body = self.send_write(request, path).await?.text().await?;
        let created: CreatedCollection = serde_json::from_str(&body).map_err(|e| {
            crate::JellyfinError::UnexpectedResponse(format!("create collection: {e}"))
        })?;
        info!(collection = name, id = %created.id, "Created collection");
        Ok(created.id)
    }

    /// POST /Collections/{id}/Items?Ids=...
    pub async fn add_to_collection(&self, collection_id: &str, item_ids: &[String]) -> crate::Result<()> {
        if item_ids.is_empty() {
            return Ok(());
        }
        let path = format!("/Collections/{collection_id}/Items");
        let request = self
            .request(Method::POST, &path)
            .query(&[("Ids", item_ids.join(","))]);
        self.send_write(request, &path).await?;
        debug!(collection_id, count = item_ids.len(), "Added items to collection");
        Ok(())
    }

    /// DELETE /Collections/{id}/Items?Ids=...
    pub async fn remove_from_collection(
        &self,
        collection_id: &str,
        item_ids: &[String],
    ) -> crate::Result<()> {
        if item_ids.is_empty() {
            return Ok(());
        }
        let path = format!("/Collections/{collection_id}/Items");
        let request = self
            .request(Method::DELETE, &path)
            .query(&[("Ids", item_ids.join(","))]);
        self.send_write(request, &path).await?;
        debug!(collection_id, count = item_ids.len(), "Removed items from collection");
        Ok(())
    }
}
