//! Catalog providers and candidate aggregation.

pub mod aggregator;
pub mod tmdb;
pub mod trakt;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::domain::{ChartSpec, DiscoverParams, ListRef, MediaItem, MediaKind, ProviderKind, TrendingPeriod};

pub use aggregator::{Aggregator, dedupe_by_primary_id};
pub use tmdb::TmdbProvider;
pub use trakt::TraktProvider;

/// A source of candidate titles. Implementations do not retry; a feed the
/// provider does not offer returns [`crate::Error::Unsupported`].
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_trending(
        &self,
        kind: MediaKind,
        period: TrendingPeriod,
        limit: usize,
    ) -> Result<Vec<MediaItem>>;

    async fn fetch_popular(&self, kind: MediaKind, limit: usize) -> Result<Vec<MediaItem>>;

    async fn discover(
        &self,
        kind: MediaKind,
        params: &DiscoverParams,
        limit: usize,
    ) -> Result<Vec<MediaItem>>;

    async fn fetch_chart(&self, kind: MediaKind, chart: &ChartSpec) -> Result<Vec<MediaItem>>;

    async fn fetch_list(&self, list: &ListRef, kind: Option<MediaKind>) -> Result<Vec<MediaItem>>;
}

/// Configured providers by kind.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn CatalogProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: ProviderKind, provider: Arc<dyn CatalogProvider>) {
        self.providers.insert(kind, provider);
    }

    pub fn with(mut self, kind: ProviderKind, provider: Arc<dyn CatalogProvider>) -> Self {
        self.register(kind, provider);
        self
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&Arc<dyn CatalogProvider>> {
        self.providers.get(&kind)
    }
}
