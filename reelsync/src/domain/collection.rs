//! Collection definitions and per-run build results.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::filter::FilterSpec;
use super::media::{LibraryItem, MediaItem, MediaKind};
use super::schedule::Schedule;
use super::source::SourceSpec;

/// `[[libraries]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryDefinition {
    pub name: String,
    /// Media kind of the library; inferred from the name when absent.
    #[serde(default)]
    pub kind: Option<MediaKind>,
    #[serde(default)]
    pub collections: Vec<CollectionDefinition>,
}

impl LibraryDefinition {
    pub fn media_kind(&self) -> MediaKind {
        self.kind
            .unwrap_or_else(|| MediaKind::infer_from_library_name(&self.name))
    }
}

/// `[[libraries.collections]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDefinition {
    pub name: String,
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
    #[serde(default)]
    pub filters: FilterSpec,
    /// Maximum number of titles kept after filtering.
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub schedule: Schedule,
    /// Tag applied to acquisition requests instead of the manager default.
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default, alias = "description")]
    pub summary: Option<String>,
    #[serde(default)]
    pub sort_title: Option<String>,
}

impl CollectionDefinition {
    pub fn metadata(&self) -> CollectionMetadata {
        CollectionMetadata {
            overview: self.summary.clone(),
            sort_title: self.sort_title.clone(),
        }
    }
}

/// A candidate projected onto the library for one build.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionItem {
    pub media: MediaItem,
    pub library_id: Option<String>,
    pub matched: bool,
    pub in_library: bool,
}

impl CollectionItem {
    pub fn resolve(media: MediaItem, found: Option<LibraryItem>) -> Self {
        match found {
            Some(record) => Self {
                media,
                library_id: Some(record.id),
                matched: true,
                in_library: true,
            },
            None => Self {
                media,
                library_id: None,
                matched: false,
                in_library: false,
            },
        }
    }
}

/// Result of building one collection. Never persisted.
#[derive(Debug, Clone)]
pub struct Collection {
    pub definition: CollectionDefinition,
    pub library: String,
    pub items: Vec<CollectionItem>,
}

impl Collection {
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn matched(&self) -> usize {
        self.items.iter().filter(|i| i.matched).count()
    }

    pub fn missing(&self) -> usize {
        self.total() - self.matched()
    }

    /// Library ids the live collection should contain.
    pub fn target_ids(&self) -> BTreeSet<String> {
        self.items
            .iter()
            .filter_map(|i| i.library_id.clone())
            .collect()
    }

    pub fn missing_items(&self) -> impl Iterator<Item = &CollectionItem> {
        self.items.iter().filter(|i| !i.in_library)
    }

    /// Title for a library id present in this build.
    pub fn title_of(&self, library_id: &str) -> Option<String> {
        self.items
            .iter()
            .find(|i| i.library_id.as_deref() == Some(library_id))
            .map(|i| i.media.display_title())
    }
}

/// An existing collection in the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionHandle {
    pub id: String,
    pub name: String,
}

/// A library item currently inside a collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollectionMember {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionMetadata {
    pub overview: Option<String>,
    pub sort_title: Option<String>,
}

/// What a reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: Vec<CollectionMember>,
    pub removed: Vec<CollectionMember>,
}

impl SyncReport {
    pub fn counts(&self) -> (usize, usize) {
        (self.added.len(), self.removed.len())
    }

    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(title: &str) -> MediaItem {
        MediaItem::new(title, MediaKind::Movie)
    }

    #[test]
    fn test_counters_and_target_ids() {
        let definition: CollectionDefinition = toml::from_str("name = \"Trending\"").unwrap();
        let collection = Collection {
            definition,
            library: "Films".into(),
            items: vec![
                CollectionItem::resolve(
                    media("a"),
                    Some(LibraryItem {
                        id: "id-a".into(),
                        title: "a".into(),
                        year: None,
                    }),
                ),
                CollectionItem::resolve(media("b"), None),
            ],
        };

        assert_eq!(collection.total(), 2);
        assert_eq!(collection.matched(), 1);
        assert_eq!(collection.missing(), 1);
        assert_eq!(collection.target_ids(), BTreeSet::from(["id-a".to_string()]));
        assert_eq!(collection.missing_items().count(), 1);
        assert_eq!(collection.title_of("id-a").as_deref(), Some("a"));
    }

    #[test]
    fn test_definition_defaults() {
        let definition: CollectionDefinition = toml::from_str("name = \"Popular\"").unwrap();
        assert!(definition.sources.is_empty());
        assert_eq!(definition.schedule, Schedule::Daily);
        assert_eq!(definition.limit, None);
        assert_eq!(definition.metadata(), CollectionMetadata::default());
    }

    #[test]
    fn test_library_kind_inferred() {
        let lib: LibraryDefinition = toml::from_str("name = \"Séries TV\"").unwrap();
        assert_eq!(lib.media_kind(), MediaKind::Series);
        let explicit: LibraryDefinition =
            toml::from_str("name = \"Séries TV\"\nkind = \"movie\"").unwrap();
        assert_eq!(explicit.media_kind(), MediaKind::Movie);
    }
}
