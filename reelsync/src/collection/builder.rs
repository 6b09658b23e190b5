//! Builds a collection: aggregate, filter, then match against the library.

use std::sync::Arc;

use tracing::{debug, info};

use crate::Result;
use crate::catalog::{Aggregator, ProviderRegistry};
use crate::domain::{Collection, CollectionDefinition, apply_filters};
use crate::library::{LibraryService, LibraryTarget, Matcher};

pub struct CollectionBuilder {
    aggregator: Aggregator,
    matcher: Matcher,
}

impl CollectionBuilder {
    pub fn new(aggregator: Aggregator, matcher: Matcher) -> Self {
        Self {
            aggregator,
            matcher,
        }
    }

    /// Builder whose fetches and lookups each run up to `concurrency` at a time.
    pub fn with_concurrency(
        registry: Arc<ProviderRegistry>,
        library: Arc<dyn LibraryService>,
        concurrency: usize,
    ) -> Self {
        Self::new(
            Aggregator::new(registry, concurrency),
            Matcher::new(library, concurrency),
        )
    }

    pub async fn build(&self, definition: &CollectionDefinition, target: &LibraryTarget) -> Result<Collection> {
        let candidates = self
            .aggregator
            .aggregate(&definition.sources, target.kind)
            .await?;
        let fetched = candidates.len();

        let selected = apply_filters(candidates, &definition.filters, definition.limit);
        debug!(
            collection = %definition.name,
            fetched,
            kept = selected.len(),
            "Applied filters"
        );

        let items = self.matcher.match_items(selected, target).await?;
        let collection = Collection {
            definition: definition.clone(),
            library: target.name.clone(),
            items,
        };

        info!(
            collection = %definition.name,
            library = %target.name,
            total = collection.total(),
            matched = collection.matched(),
            missing = collection.missing(),
            "Built collection"
        );
        Ok(collection)
    }
}
