use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::JellyfinError;

const TOKEN_HEADER: &str = "X-Emby-Token";

pub struct JellyfinClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl JellyfinClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "Jellyfin request");
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header(TOKEN_HEADER, &self.api_key)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> crate::Result<T> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        let body = check_status(response, path).await?.text().await?;
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| JellyfinError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }

    /// Send a write request and discard the body. Any non-2xx status is an error.
    pub(crate) async fn send_write(&self, request: RequestBuilder, path: &str) -> crate::Result<Response> {
        let response = request.send().await?;
        check_status(response, path).await
    }
}

async fn check_status(response: Response, path: &str) -> crate::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    error!(path, status = status.as_u16(), "Jellyfin request failed");
    Err(JellyfinError::Api {
        status_code: status.as_u16(),
        message,
    })
}
