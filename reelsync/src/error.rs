//! Application-wide error types.

use std::fmt::Display;

use thiserror::Error;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Application-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Provider {provider} fetch failed: {message}")]
    ProviderFetch { provider: String, message: String },

    #[error("Library not found: {0}")]
    LibraryResolution(String),

    #[error("Library {operation} failed: {message}")]
    Library { operation: String, message: String },

    #[error("Reconciliation of collection '{collection}' failed: {message}")]
    Reconciliation { collection: String, message: String },

    #[error("{manager} request failed: {message}")]
    Acquisition { manager: String, message: String },

    #[error("Provider {provider} does not support the {feed} feed")]
    Unsupported { provider: String, feed: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn provider(provider: impl Into<String>, err: impl Display) -> Self {
        Self::ProviderFetch {
            provider: provider.into(),
            message: err.to_string(),
        }
    }

    pub fn library(operation: impl Into<String>, err: impl Display) -> Self {
        Self::Library {
            operation: operation.into(),
            message: err.to_string(),
        }
    }

    pub fn reconciliation(collection: impl Into<String>, err: impl Display) -> Self {
        Self::Reconciliation {
            collection: collection.into(),
            message: err.to_string(),
        }
    }

    pub fn acquisition(manager: impl Into<String>, err: impl Display) -> Self {
        Self::Acquisition {
            manager: manager.into(),
            message: err.to_string(),
        }
    }

    pub fn unsupported(provider: impl Into<String>, feed: impl Into<String>) -> Self {
        Self::Unsupported {
            provider: provider.into(),
            feed: feed.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
