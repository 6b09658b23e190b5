//! Service layer module.
//!
//! Builds the API clients, adapters and runner from a configuration.

pub mod container;

pub use container::ServiceContainer;
