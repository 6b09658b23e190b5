use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraktError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Trakt API error ({status_code}): {message}")]
    Api { status_code: u16, message: String },

    #[error("Failed to decode Trakt response at '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}
