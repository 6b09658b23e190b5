use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} API error ({status_code}): {message}")]
    Api {
        service: &'static str,
        status_code: u16,
        message: String,
    },

    #[error("Failed to decode {service} response at '{path}': {source}")]
    Json {
        service: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ArrError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status_code: 404, .. })
    }
}
