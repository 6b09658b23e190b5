use thiserror::Error;

#[derive(Debug, Error)]
pub enum JellyfinError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Jellyfin API error ({status_code}): {message}")]
    Api { status_code: u16, message: String },

    #[error("Failed to decode Jellyfin response at '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected Jellyfin response: {0}")]
    UnexpectedResponse(String),
}
