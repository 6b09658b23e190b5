use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::TraktError;

const BASE_URL: &str = "https://api.trakt.tv";
const API_VERSION: &str = "2";

pub struct TraktClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl TraktClient {
    /// Create a client authenticating with the application's client id, and
    /// optionally a user OAuth token for private lists.
    pub fn new(
        client: Client,
        client_id: &str,
        access_token: Option<&str>,
    ) -> crate::Result<Self> {
        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
            headers: build_headers(client_id, access_token)?,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> crate::Result<T> {
        debug!(path, "Trakt request");
        let response = self
            .client
            .get(self.url(path))
            .headers(self.headers.clone())
            .query(&[("extended", "full")])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TraktError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| TraktError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}

fn build_headers(client_id: &str, access_token: Option<&str>) -> crate::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert("trakt-api-version", HeaderValue::from_static(API_VERSION));
    headers.insert(
        "trakt-api-key",
        HeaderValue::from_str(client_id)
            .map_err(|_| TraktError::InvalidHeader("trakt-api-key".to_string()))?,
    );
    if let Some(token) = access_token {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| TraktError::InvalidHeader("Authorization".to_string()))?,
        );
    }
    Ok(headers)
}
