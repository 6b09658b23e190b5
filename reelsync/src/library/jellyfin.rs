//! Jellyfin adapter for [`LibraryService`].

use async_trait::async_trait;
use jellyfin_api::{BaseItem, ItemsQuery, JellyfinClient};
use serde_json::Value;
use tracing::debug;

use super::{LibraryInfo, LibraryService};
use crate::domain::{
    CollectionHandle, CollectionMember, CollectionMetadata, ExternalId, LibraryItem, MediaKind,
};
use crate::{Error, Result};

pub struct JellyfinLibrary {
    client: JellyfinClient,
}

impl JellyfinLibrary {
    pub fn new(client: JellyfinClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LibraryService for JellyfinLibrary {
    async fn list_libraries(&self) -> Result<Vec<LibraryInfo>> {
        let folders = self
            .client
            .virtual_folders()
            .await
            .map_err(|e| Error::library("list libraries", e))?;
        Ok(folders
            .into_iter()
            .filter_map(|f| f.item_id.map(|id| LibraryInfo { name: f.name, id }))
            .collect())
    }

    async fn list_collections(&self, library_id: Option<&str>) -> Result<Vec<CollectionHandle>> {
        let items = self
            .client
            .collections(library_id)
            .await
            .map_err(|e| Error::library("list collections", e))?;
        Ok(items
            .into_iter()
            .map(|item| CollectionHandle {
                id: item.id,
                name: item.name,
            })
            .collect())
    }

    async fn get_collection_members(&self, collection_id: &str) -> Result<Vec<CollectionMember>> {
        let items = self
            .client
            .collection_items(collection_id)
            .await
            .map_err(|e| Error::library("list collection items", e))?;
        Ok(items
            .into_iter()
            .map(|item| CollectionMember {
                title: display_title(&item),
                id: item.id,
            })
            .collect())
    }

    async fn create_collection(&self, name: &str) -> Result<String> {
        self.client
            .create_collection(name)
            .await
            .map_err(|e| Error::library("create collection", e))
    }

    async fn add_members(&self, collection_id: &str, item_ids: &[String]) -> Result<()> {
        self.client
            .add_to_collection(collection_id, item_ids)
            .await
            .map_err(|e| Error::library("add to collection", e))
    }

    async fn remove_members(&self, collection_id: &str, item_ids: &[String]) -> Result<()> {
        self.client
            .remove_from_collection(collection_id, item_ids)
            .await
            .map_err(|e| Error::library("remove from collection", e))
    }

    async fn update_metadata(&self, collection_id: &str, metadata: &CollectionMetadata) -> Result<()> {
        if metadata.overview.is_none() && metadata.sort_title.is_none() {
            return Ok(());
        }
        let mut item = self
            .client
            .get_item(collection_id)
            .await
            .map_err(|e| Error::library("read collection", e))?;
        apply_metadata(&mut item, metadata);
        self.client
            .update_item(collection_id, &item)
            .await
            .map_err(|e| Error::library("update collection metadata", e))?;
        debug!(collection_id, "Updated collection metadata");
        Ok(())
    }

    async fn find_by_external_id(
        &self,
        id: &ExternalId,
        kind: Option<MediaKind>,
        library_id: Option<&str>,
    ) -> Result<Option<LibraryItem>> {
        let query = lookup_query(id, kind, library_id);
        let response = self
            .client
            .items(&query)
            .await
            .map_err(|e| Error::library("find item", e))?;
        // Some server versions ignore AnyProviderIdEquals; only accept an exact id match.
        Ok(response
            .items
            .into_iter()
            .find(|item| has_id(item, id))
            .map(|item| LibraryItem {
                title: item.name,
                year: item.production_year,
                id: item.id,
            }))
    }
}

fn lookup_query(id: &ExternalId, kind: Option<MediaKind>, library_id: Option<&str>) -> ItemsQuery {
    let provider = match id {
        ExternalId::Tmdb(v) => format!("Tmdb.{v}"),
        ExternalId::Imdb(v) => format!("Imdb.{v}"),
        ExternalId::Tvdb(v) => format!("Tvdb.{v}"),
    };
    ItemsQuery {
        parent_id: library_id.map(str::to_string),
        include_item_types: kind.map(|k| item_type(k).to_string()),
        any_provider_id_equals: Some(provider),
        recursive: true,
        fields: Some("ProviderIds".to_string()),
        limit: Some(1),
        start_index: None,
    }
}

fn item_type(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "Movie",
        MediaKind::Series => "Series",
    }
}

fn has_id(item: &BaseItem, id: &ExternalId) -> bool {
    match id {
        ExternalId::Tmdb(v) => item.tmdb_id() == Some(*v),
        ExternalId::Tvdb(v) => item.tvdb_id() == Some(*v),
        ExternalId::Imdb(v) => item.imdb_id().is_some_and(|i| i.eq_ignore_ascii_case(v)),
    }
}

fn display_title(item: &BaseItem) -> String {
    match item.production_year {
        Some(year) => format!("{} ({})", item.name, year),
        None => item.name.clone(),
    }
}

/// Overwrite the fields the definition sets; leave the rest of the record as read.
fn apply_metadata(item: &mut Value, metadata: &CollectionMetadata) {
    if let Some(overview) = &metadata.overview {
        item["Overview"] = Value::String(overview.clone());
    }
    if let Some(sort_title) = &metadata.sort_title {
        item["SortName"] = Value::String(sort_title.clone());
        item["ForcedSortName"] = Value::String(sort_title.clone());
    }
}
