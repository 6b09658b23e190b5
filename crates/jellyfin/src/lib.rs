mod client;
mod collections;
mod error;
mod items;
pub mod models;

pub use client::JellyfinClient;
pub use error::JellyfinError;
pub use items::ItemsQuery;
pub use models::{BaseItem, ItemsResponse, VirtualFolder};

pub type Result<T> = std::result::Result<T, JellyfinError>;
