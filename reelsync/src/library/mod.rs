//! Media library collaborator and candidate matching.

pub mod jellyfin;
pub mod matcher;

use async_trait::async_trait;

use crate::Result;
use crate::domain::{
    CollectionHandle, CollectionMember, CollectionMetadata, ExternalId, LibraryItem, MediaKind,
};

pub use jellyfin::JellyfinLibrary;
pub use matcher::Matcher;

/// A library as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryInfo {
    pub name: String,
    pub id: String,
}

/// A resolved library a collection is built in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryTarget {
    pub name: String,
    pub id: String,
    pub kind: MediaKind,
}

#[async_trait]
pub trait LibraryService: Send + Sync {
    async fn list_libraries(&self) -> Result<Vec<LibraryInfo>>;

    /// Collections, optionally restricted to one library.
    async fn list_collections(&self, library_id: Option<&str>) -> Result<Vec<CollectionHandle>>;

    async fn get_collection_members(&self, collection_id: &str) -> Result<Vec<CollectionMember>>;

    async fn create_collection(&self, name: &str) -> Result<String>;

    async fn add_members(&self, collection_id: &str, item_ids: &[String]) -> Result<()>;

    async fn remove_members(&self, collection_id: &str, item_ids: &[String]) -> Result<()>;

    async fn update_metadata(&self, collection_id: &str, metadata: &CollectionMetadata) -> Result<()>;

    /// Exact lookup by external id. `Ok(None)` when nothing matches.
    async fn find_by_external_id(
        &self,
        id: &ExternalId,
        kind: Option<MediaKind>,
        library_id: Option<&str>,
    ) -> Result<Option<LibraryItem>>;
}
