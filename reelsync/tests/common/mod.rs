//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use reelsync::acquisition::{AcquisitionManager, AddedRecord};
use reelsync::catalog::CatalogProvider;
use reelsync::domain::{
    ChartSpec, CollectionDefinition, CollectionHandle, CollectionMember, CollectionMetadata,
    DiscoverParams, ExternalId, ExternalIds, FeedSpec, FilterSpec, LibraryItem, ListRef,
    MediaItem, MediaKind, ProviderKind, RunTrigger, Schedule, SourceSpec, TrendingPeriod,
};
use reelsync::library::{LibraryInfo, LibraryService};
use reelsync::notification::{MediaRequest, Notifier};
use reelsync::runner::RunStats;
use reelsync::{Error, Result};

pub fn movie(title: &str, tmdb: i64) -> MediaItem {
    let mut item = MediaItem::new(title, MediaKind::Movie);
    item.ids.tmdb = Some(tmdb);
    item
}

pub fn series(title: &str, tmdb: i64, tvdb: Option<i64>) -> MediaItem {
    let mut item = MediaItem::new(title, MediaKind::Series);
    item.ids = ExternalIds {
        tmdb: Some(tmdb),
        imdb: None,
        tvdb,
    };
    item
}

pub fn popular(provider: ProviderKind) -> SourceSpec {
    SourceSpec {
        provider,
        feed: FeedSpec::Popular { limit: 20 },
    }
}

pub fn list(id: &str) -> SourceSpec {
    SourceSpec {
        provider: ProviderKind::Trakt,
        feed: FeedSpec::List {
            list: ListRef::Id { id: id.to_string() },
        },
    }
}

pub fn definition(name: &str, sources: Vec<SourceSpec>) -> CollectionDefinition {
    CollectionDefinition {
        name: name.to_string(),
        sources,
        filters: FilterSpec::default(),
        limit: None,
        schedule: Schedule::Daily,
        tag: None,
        summary: None,
        sort_title: None,
    }
}

// ---------------------------------------------------------------------------
// Catalog

/// Returns the same items for every feed, or fails every call.
pub struct FakeProvider {
    name: &'static str,
    items: Vec<MediaItem>,
    fail: bool,
    pub calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new(name: &'static str, items: Vec<MediaItem>) -> Self {
        Self {
            name,
            items,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            fail: true,
            ..Self::new(name, Vec::new())
        }
    }

    fn respond(&self) -> Result<Vec<MediaItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(Error::provider(self.name, "HTTP 503"))
        } else {
            Ok(self.items.clone())
        }
    }
}

#[async_trait]
impl CatalogProvider for FakeProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_trending(
        &self,
        _kind: MediaKind,
        _period: TrendingPeriod,
        _limit: usize,
    ) -> Result<Vec<MediaItem>> {
        self.respond()
    }

    async fn fetch_popular(&self, _kind: MediaKind, _limit: usize) -> Result<Vec<MediaItem>> {
        self.respond()
    }

    async fn discover(
        &self,
        _kind: MediaKind,
        _params: &DiscoverParams,
        _limit: usize,
    ) -> Result<Vec<MediaItem>> {
        self.respond()
    }

    async fn fetch_chart(&self, _kind: MediaKind, _chart: &ChartSpec) -> Result<Vec<MediaItem>> {
        self.respond()
    }

    async fn fetch_list(&self, _list: &ListRef, _kind: Option<MediaKind>) -> Result<Vec<MediaItem>> {
        self.respond()
    }
}

/// Answers per media kind, and per list id for list feeds. A list can be
/// slowed down or made to panic.
#[derive(Default)]
pub struct ScriptedProvider {
    by_kind: HashMap<MediaKind, Vec<MediaItem>>,
    lists: HashMap<String, (Duration, Vec<MediaItem>)>,
    panics_on: HashSet<String>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: MediaKind, items: Vec<MediaItem>) -> Self {
        self.by_kind.insert(kind, items);
        self
    }

    pub fn with_list(mut self, id: &str, delay: Duration, items: Vec<MediaItem>) -> Self {
        self.lists.insert(id.to_string(), (delay, items));
        self
    }

    pub fn panicking_on(mut self, id: &str) -> Self {
        self.panics_on.insert(id.to_string());
        self
    }

    fn for_kind(&self, kind: MediaKind) -> Result<Vec<MediaItem>> {
        Ok(self.by_kind.get(&kind).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl CatalogProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "Scripted"
    }

    async fn fetch_trending(
        &self,
        kind: MediaKind,
        _period: TrendingPeriod,
        _limit: usize,
    ) -> Result<Vec<MediaItem>> {
        self.for_kind(kind)
    }

    async fn fetch_popular(&self, kind: MediaKind, _limit: usize) -> Result<Vec<MediaItem>> {
        self.for_kind(kind)
    }

    async fn discover(
        &self,
        kind: MediaKind,
        _params: &DiscoverParams,
        _limit: usize,
    ) -> Result<Vec<MediaItem>> {
        self.for_kind(kind)
    }

    async fn fetch_chart(&self, kind: MediaKind, _chart: &ChartSpec) -> Result<Vec<MediaItem>> {
        self.for_kind(kind)
    }

    async fn fetch_list(&self, list: &ListRef, _kind: Option<MediaKind>) -> Result<Vec<MediaItem>> {
        let ListRef::Id { id } = list else {
            return Err(Error::provider("Scripted", "only id lists are scripted"));
        };
        if self.panics_on.contains(id) {
            panic!("scripted panic for list {id}");
        }
        let Some((delay, items)) = self.lists.get(id) else {
            return Err(Error::provider("Scripted", format!("unknown list {id}")));
        };
        tokio::time::sleep(*delay).await;
        Ok(items.clone())
    }
}

// ---------------------------------------------------------------------------
// Library

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryWrite {
    Create(String),
    Add(String, Vec<String>),
    Remove(String, Vec<String>),
    Metadata(String, CollectionMetadata),
}

#[derive(Debug, Clone)]
struct FakeCollection {
    name: String,
    members: BTreeMap<String, String>,
}

/// Library holding items indexed by TMDb id and box sets by id.
#[derive(Default)]
pub struct FakeLibrary {
    libraries: Vec<LibraryInfo>,
    items: HashMap<i64, LibraryItem>,
    collections: Mutex<BTreeMap<String, FakeCollection>>,
    next_id: AtomicUsize,
    fail_list_libraries: bool,
    fail_writes_for: HashSet<String>,
    pub writes: Mutex<Vec<LibraryWrite>>,
}

impl FakeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library(mut self, name: &str, id: &str) -> Self {
        self.libraries.push(LibraryInfo {
            name: name.to_string(),
            id: id.to_string(),
        });
        self
    }

    /// Index a library item under a TMDb id.
    pub fn with_item(mut self, tmdb: i64, id: &str, title: &str) -> Self {
        self.items.insert(
            tmdb,
            LibraryItem {
                id: id.to_string(),
                title: title.to_string(),
                year: None,
            },
        );
        self
    }

    pub fn with_collection(self, id: &str, name: &str, members: &[(&str, &str)]) -> Self {
        self.collections.lock().insert(
            id.to_string(),
            FakeCollection {
                name: name.to_string(),
                members: members
                    .iter()
                    .map(|(id, title)| (id.to_string(), title.to_string()))
                    .collect(),
            },
        );
        self
    }

    pub fn failing_libraries(mut self) -> Self {
        self.fail_list_libraries = true;
        self
    }

    /// Membership writes to the named collection fail.
    pub fn failing_writes_for(mut self, collection: &str) -> Self {
        self.fail_writes_for.insert(collection.to_string());
        self
    }

    pub fn members_of(&self, name: &str) -> Vec<String> {
        self.collections
            .lock()
            .values()
            .find(|c| c.name == name)
            .map(|c| c.members.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    fn check_writable(&self, collection_id: &str) -> Result<()> {
        let collections = self.collections.lock();
        match collections.get(collection_id) {
            Some(c) if self.fail_writes_for.contains(&c.name) => {
                Err(Error::library("add members", "HTTP 500"))
            }
            Some(_) => Ok(()),
            None => Err(Error::library("add members", "no such collection")),
        }
    }

    fn title_of(&self, id: &str) -> String {
        self.items
            .values()
            .find(|item| item.id == id)
            .map(|item| item.title.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

#[async_trait]
impl LibraryService for FakeLibrary {
    async fn list_libraries(&self) -> Result<Vec<LibraryInfo>> {
        if self.fail_list_libraries {
            return Err(Error::library("list libraries", "connection refused"));
        }
        Ok(self.libraries.clone())
    }

    async fn list_collections(&self, _library_id: Option<&str>) -> Result<Vec<CollectionHandle>> {
        Ok(self
            .collections
            .lock()
            .iter()
            .map(|(id, c)| CollectionHandle {
                id: id.clone(),
                name: c.name.clone(),
            })
            .collect())
    }

    async fn get_collection_members(&self, collection_id: &str) -> Result<Vec<CollectionMember>> {
        Ok(self
            .collections
            .lock()
            .get(collection_id)
            .map(|c| {
                c.members
                    .iter()
                    .map(|(id, title)| CollectionMember {
                        id: id.clone(),
                        title: title.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create_collection(&self, name: &str) -> Result<String> {
        let id = format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.collections.lock().insert(
            id.clone(),
            FakeCollection {
                name: name.to_string(),
                members: BTreeMap::new(),
            },
        );
        self.writes.lock().push(LibraryWrite::Create(name.to_string()));
        Ok(id)
    }

    async fn add_members(&self, collection_id: &str, item_ids: &[String]) -> Result<()> {
        self.check_writable(collection_id)?;
        let titles: Vec<(String, String)> = item_ids
            .iter()
            .map(|id| (id.clone(), self.title_of(id)))
            .collect();
        if let Some(c) = self.collections.lock().get_mut(collection_id) {
            c.members.extend(titles);
        }
        self.writes
            .lock()
            .push(LibraryWrite::Add(collection_id.to_string(), item_ids.to_vec()));
        Ok(())
    }

    async fn remove_members(&self, collection_id: &str, item_ids: &[String]) -> Result<()> {
        self.check_writable(collection_id)?;
        if let Some(c) = self.collections.lock().get_mut(collection_id) {
            for id in item_ids {
                c.members.remove(id);
            }
        }
        self.writes
            .lock()
            .push(LibraryWrite::Remove(collection_id.to_string(), item_ids.to_vec()));
        Ok(())
    }

    async fn update_metadata(&self, collection_id: &str, metadata: &CollectionMetadata) -> Result<()> {
        self.writes.lock().push(LibraryWrite::Metadata(
            collection_id.to_string(),
            metadata.clone(),
        ));
        Ok(())
    }

    async fn find_by_external_id(
        &self,
        id: &ExternalId,
        _kind: Option<MediaKind>,
        _library_id: Option<&str>,
    ) -> Result<Option<LibraryItem>> {
        Ok(match id {
            ExternalId::Tmdb(tmdb) => self.items.get(tmdb).cloned(),
            _ => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Notifications

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    RunStart(Vec<String>, RunTrigger),
    RunEnd(RunStats),
    Change {
        collection: String,
        library: String,
        added: Vec<String>,
        removed: Vec<String>,
    },
    Error(String, String),
    MediaRequested(MediaRequest),
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Sent>>,
}

impl RecordingNotifier {
    pub fn errors(&self) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter_map(|s| match s {
                Sent::Error(title, _) => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn changes(&self) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter_map(|s| match s {
                Sent::Change { collection, .. } => Some(collection.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_run_start(&self, libraries: &[String], trigger: RunTrigger) {
        self.sent.lock().push(Sent::RunStart(libraries.to_vec(), trigger));
    }

    async fn send_run_end(&self, stats: &RunStats) {
        self.sent.lock().push(Sent::RunEnd(stats.clone()));
    }

    async fn send_collection_change(
        &self,
        collection: &str,
        library: &str,
        added: &[String],
        removed: &[String],
    ) {
        self.sent.lock().push(Sent::Change {
            collection: collection.to_string(),
            library: library.to_string(),
            added: added.to_vec(),
            removed: removed.to_vec(),
        });
    }

    async fn send_error(&self, title: &str, message: &str) {
        self.sent
            .lock()
            .push(Sent::Error(title.to_string(), message.to_string()));
    }

    async fn send_media_requested(&self, request: &MediaRequest) {
        self.sent.lock().push(Sent::MediaRequested(request.clone()));
    }
}

// ---------------------------------------------------------------------------
// Acquisition

/// Manager keyed by TMDb (movies) or TVDB (series) id.
pub struct FakeManager {
    kind: MediaKind,
    existing: HashSet<i64>,
    unknown: HashSet<i64>,
    fail: bool,
    pub added: Mutex<Vec<(ExternalId, Vec<String>)>>,
}

impl FakeManager {
    pub fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            existing: HashSet::new(),
            unknown: HashSet::new(),
            fail: false,
            added: Mutex::new(Vec::new()),
        }
    }

    pub fn with_existing(mut self, id: i64) -> Self {
        self.existing.insert(id);
        self
    }

    pub fn with_unknown(mut self, id: i64) -> Self {
        self.unknown.insert(id);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn raw_id(id: &ExternalId) -> i64 {
        match id {
            ExternalId::Tmdb(id) | ExternalId::Tvdb(id) => *id,
            ExternalId::Imdb(_) => -1,
        }
    }
}

#[async_trait]
impl AcquisitionManager for FakeManager {
    fn name(&self) -> &'static str {
        match self.kind {
            MediaKind::Movie => "Radarr",
            MediaKind::Series => "Sonarr",
        }
    }

    fn kind(&self) -> MediaKind {
        self.kind
    }

    fn lookup_key(&self, ids: &ExternalIds) -> Option<ExternalId> {
        match self.kind {
            MediaKind::Movie => ids.tmdb.map(ExternalId::Tmdb),
            MediaKind::Series => ids.tvdb.map(ExternalId::Tvdb),
        }
    }

    async fn exists(&self, id: &ExternalId) -> Result<bool> {
        if self.fail {
            return Err(Error::acquisition(self.name(), "HTTP 401"));
        }
        Ok(self.existing.contains(&Self::raw_id(id)))
    }

    async fn add(&self, id: &ExternalId, tags: &[String]) -> Result<Option<AddedRecord>> {
        if self.unknown.contains(&Self::raw_id(id)) {
            return Ok(None);
        }
        self.added.lock().push((id.clone(), tags.to_vec()));
        Ok(Some(AddedRecord {
            title: format!("Title {}", id),
            year: Some(2024),
        }))
    }
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
