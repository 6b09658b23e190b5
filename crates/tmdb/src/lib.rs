mod client;
mod discover;
mod error;
mod external_ids;
pub mod genres;
mod list;
pub mod models;
mod popular;
mod trending;

pub use client::TmdbClient;
pub use discover::{DiscoverParams, DiscoverTarget};
pub use error::TmdbError;
pub use models::{
    ListDetails, ListItem, Movie, MovieExternalIds, PaginatedResponse, TvExternalIds, TvShow,
};
pub use trending::TimeWindow;

pub type Result<T> = std::result::Result<T, TmdbError>;
