use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TMDb API error ({status_code}): {message}")]
    Api { status_code: u16, message: String },

    #[error("Failed to decode TMDb response at '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TmdbError {
    /// Whether the error is an HTTP 404 from the API.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status_code: 404, .. })
    }
}
