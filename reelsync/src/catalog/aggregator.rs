//! Fetches every source of a collection and merges the results.

use std::collections::HashSet;
use std::sync::Arc;

use futures::{FutureExt, StreamExt, TryStreamExt, stream};
use tracing::{debug, warn};

use super::{CatalogProvider, ProviderRegistry};
use crate::Result;
use crate::domain::{ChartSpec, FeedSpec, MediaItem, MediaKind, SourceSpec};

pub struct Aggregator {
    registry: Arc<ProviderRegistry>,
    max_concurrent_fetches: usize,
}

impl Aggregator {
    pub fn new(registry: Arc<ProviderRegistry>, max_concurrent_fetches: usize) -> Self {
        Self {
            registry,
            max_concurrent_fetches: max_concurrent_fetches.max(1),
        }
    }

    /// Fetch all sources in declaration order and deduplicate.
    ///
    /// Fetches may overlap in time, but results are concatenated in the order
    /// the sources are declared. The first failing fetch aborts the whole
    /// aggregation. Sources whose provider is not configured are skipped.
    pub async fn aggregate(&self, sources: &[SourceSpec], kind: MediaKind) -> Result<Vec<MediaItem>> {
        let runnable: Vec<(&Arc<dyn CatalogProvider>, &FeedSpec)> = sources
            .iter()
            .filter_map(|source| match self.registry.get(source.provider) {
                Some(provider) => Some((provider, &source.feed)),
                None => {
                    warn!(
                        provider = %source.provider,
                        feed = source.feed.name(),
                        "Provider not configured, skipping source"
                    );
                    None
                }
            })
            .collect();

        let fetches: Vec<_> = runnable
            .into_iter()
            .map(|(provider, feed)| fetch_feed(provider.as_ref(), feed, kind).boxed())
            .collect();
        let batches: Vec<Vec<MediaItem>> = stream::iter(fetches)
            .buffered(self.max_concurrent_fetches)
            .try_collect()
            .await?;

        let fetched: usize = batches.iter().map(Vec::len).sum();
        let items = dedupe_by_primary_id(batches.into_iter().flatten());
        debug!(fetched, unique = items.len(), "Aggregated candidates");
        Ok(items)
    }
}

async fn fetch_feed(
    provider: &dyn CatalogProvider,
    feed: &FeedSpec,
    kind: MediaKind,
) -> Result<Vec<MediaItem>> {
    debug!(provider = provider.name(), feed = feed.name(), %kind, "Fetching source");
    match feed {
        FeedSpec::Trending { period, limit } => provider.fetch_trending(kind, *period, *limit).await,
        FeedSpec::Popular { limit } => provider.fetch_popular(kind, *limit).await,
        FeedSpec::Discover { params, limit } => provider.discover(kind, params, *limit).await,
        FeedSpec::Chart {
            chart,
            period,
            limit,
        } => {
            let spec = ChartSpec {
                chart: *chart,
                period: *period,
                limit: *limit,
            };
            provider.fetch_chart(kind, &spec).await
        }
        FeedSpec::List { list } => provider.fetch_list(list, Some(kind)).await,
    }
}

/// Keep the first item for each primary id; drop items without one.
pub fn dedupe_by_primary_id(items: impl IntoIterator<Item = MediaItem>) -> Vec<MediaItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| item.primary_id().is_some_and(|id| seen.insert(id)))
        .collect()
}
