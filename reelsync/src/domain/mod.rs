//! Domain types shared by the pipeline stages.

pub mod collection;
pub mod filter;
pub mod media;
pub mod schedule;
pub mod source;

pub use collection::{
    Collection, CollectionDefinition, CollectionHandle, CollectionItem, CollectionMember,
    CollectionMetadata, LibraryDefinition, SyncReport,
};
pub use filter::{FilterSpec, apply_filters};
pub use media::{ExternalId, ExternalIds, LibraryItem, MediaItem, MediaKind};
pub use schedule::{RunTrigger, Schedule};
pub use source::{
    ChartKind, ChartPeriod, ChartSpec, DiscoverParams, FeedSpec, ListRef, ProviderKind,
    SourceSpec, TrendingPeriod,
};
