//! Radarr and Sonarr share the v3 API surface for profiles, root folders and
//! tags. [`ArrClient`] carries that surface; [`RadarrClient`] and
//! [`SonarrClient`] add the movie and series endpoints.

mod client;
mod error;
pub mod models;
mod radarr;
mod sonarr;

pub use client::{ArrClient, find_profile, pick_root_folder};
pub use error::ArrError;
pub use models::{MediaRecord, MovieAddOptions, QualityProfile, RootFolder, SeriesAddOptions, Tag};
pub use radarr::RadarrClient;
pub use sonarr::SonarrClient;

pub type Result<T> = std::result::Result<T, ArrError>;
