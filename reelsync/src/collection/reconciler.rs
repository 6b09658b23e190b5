//! Moves a live collection to the target membership of a build.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Collection, CollectionMember, SyncReport};
use crate::library::LibraryService;
use crate::{Error, Result};

/// Minimal change set between two memberships.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipDiff {
    pub to_add: BTreeSet<String>,
    pub to_remove: BTreeSet<String>,
}

/// `to_add = target - current`, `to_remove = current - target`.
pub fn diff_membership(current: &BTreeSet<String>, target: &BTreeSet<String>) -> MembershipDiff {
    MembershipDiff {
        to_add: target.difference(current).cloned().collect(),
        to_remove: current.difference(target).cloned().collect(),
    }
}

pub struct Reconciler {
    library: Arc<dyn LibraryService>,
}

impl Reconciler {
    pub fn new(library: Arc<dyn LibraryService>) -> Self {
        Self { library }
    }

    /// Sync the collection named by the build's definition.
    pub async fn sync(&self, collection: &Collection) -> Result<SyncReport> {
        let name = collection.name();
        let wrap = |e: Error| Error::reconciliation(name, e);

        let collection_id = self.resolve_handle(name).await.map_err(wrap)?;

        let members = self
            .library
            .get_collection_members(&collection_id)
            .await
            .map_err(wrap)?;
        let current_titles: BTreeMap<String, String> = members
            .into_iter()
            .map(|m| (m.id, m.title))
            .collect();
        let current: BTreeSet<String> = current_titles.keys().cloned().collect();
        let target = collection.target_ids();

        let diff = diff_membership(&current, &target);

        if !diff.to_add.is_empty() {
            let ids: Vec<String> = diff.to_add.iter().cloned().collect();
            self.library
                .add_members(&collection_id, &ids)
                .await
                .map_err(wrap)?;
        }
        if !diff.to_remove.is_empty() {
            let ids: Vec<String> = diff.to_remove.iter().cloned().collect();
            self.library
                .remove_members(&collection_id, &ids)
                .await
                .map_err(wrap)?;
        }

        self.library
            .update_metadata(&collection_id, &collection.definition.metadata())
            .await
            .map_err(wrap)?;

        let report = SyncReport {
            added: diff
                .to_add
                .into_iter()
                .map(|id| CollectionMember {
                    title: collection.title_of(&id).unwrap_or_else(|| id.clone()),
                    id,
                })
                .collect(),
            removed: diff
                .to_remove
                .into_iter()
                .map(|id| CollectionMember {
                    title: current_titles.get(&id).cloned().unwrap_or_else(|| id.clone()),
                    id,
                })
                .collect(),
        };

        let (added, removed) = report.counts();
        info!(collection = %name, added, removed, "Synced collection");
        Ok(report)
    }

    /// Id of the first collection with exactly this name, created if absent.
    /// Collections are looked up server-wide.
    async fn resolve_handle(&self, name: &str) -> Result<String> {
        let existing = self.library.list_collections(None).await?;
        if let Some(handle) = existing.into_iter().find(|c| c.name == name) {
            debug!(collection = %name, id = %handle.id, "Found existing collection");
            return Ok(handle.id);
        }
        let id = self.library.create_collection(name).await?;
        info!(collection = %name, %id, "Created collection");
        Ok(id)
    }
}
