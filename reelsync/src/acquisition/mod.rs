//! Requests for titles missing from the library.

pub mod dispatcher;
pub mod radarr;
pub mod settings;
pub mod sonarr;

use async_trait::async_trait;

use crate::Result;
use crate::domain::{ExternalId, ExternalIds, MediaKind};

pub use dispatcher::AcquisitionDispatcher;
pub use radarr::RadarrManager;
pub use settings::{ArrSettings, ResolvedArrSettings, TagCache};
pub use sonarr::SonarrManager;

/// A title registered by an acquisition manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedRecord {
    pub title: String,
    pub year: Option<i32>,
}

/// Per-collection acquisition counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcquisitionReport {
    pub requested: usize,
    pub already_present: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[async_trait]
pub trait AcquisitionManager: Send + Sync {
    fn name(&self) -> &'static str;

    fn kind(&self) -> MediaKind;

    /// The identifier this manager is keyed by, when the item carries it.
    fn lookup_key(&self, ids: &ExternalIds) -> Option<ExternalId>;

    async fn exists(&self, id: &ExternalId) -> Result<bool>;

    /// Register and search for a title. Empty `tags` means the manager's
    /// default tag. `Ok(None)` when the manager cannot resolve the id.
    async fn add(&self, id: &ExternalId, tags: &[String]) -> Result<Option<AddedRecord>>;
}
