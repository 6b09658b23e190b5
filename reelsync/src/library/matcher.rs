//! Resolves candidates against the library by primary id.

use std::sync::Arc;

use futures::{StreamExt, TryStreamExt, stream};
use tracing::trace;

use super::{LibraryService, LibraryTarget};
use crate::Result;
use crate::domain::{CollectionItem, ExternalId, LibraryItem, MediaItem};

pub struct Matcher {
    library: Arc<dyn LibraryService>,
    concurrency: usize,
}

impl Matcher {
    pub fn new(library: Arc<dyn LibraryService>, concurrency: usize) -> Self {
        Self {
            library,
            concurrency: concurrency.max(1),
        }
    }

    /// Look one candidate up in `target`. Items without a primary id resolve
    /// to `None`.
    pub async fn resolve(&self, item: &MediaItem, target: &LibraryTarget) -> Result<Option<LibraryItem>> {
        let Some(tmdb_id) = item.primary_id() else {
            return Ok(None);
        };
        let found = self
            .library
            .find_by_external_id(&ExternalId::Tmdb(tmdb_id), Some(target.kind), Some(&target.id))
            .await?;
        trace!(tmdb_id, found = found.is_some(), "Matched candidate");
        Ok(found)
    }

    /// Resolve all candidates, keeping their order.
    pub async fn match_items(
        &self,
        items: Vec<MediaItem>,
        target: &LibraryTarget,
    ) -> Result<Vec<CollectionItem>> {
        stream::iter(items)
            .map(|item| async move {
                let found = self.resolve(&item, target).await?;
                Ok::<_, crate::Error>(CollectionItem::resolve(item, found))
            })
            .buffered(self.concurrency)
            .try_collect()
            .await
    }
}
