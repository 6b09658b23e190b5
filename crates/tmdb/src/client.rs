use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::TmdbError;
use crate::models::PaginatedResponse;

const BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDb stops serving result pages after this one.
pub(crate) const MAX_PAGES: u32 = 500;

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
    pub(crate) language: Option<String>,
    pub(crate) region: Option<String>,
}

impl TmdbClient {
    /// Create a TmdbClient with a reqwest Client.
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            language: None,
            region: None,
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    /// Point the client at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Query parameters sent with every request.
    pub(crate) fn base_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("api_key", self.api_key.clone())];
        if let Some(language) = &self.language {
            query.push(("language", language.clone()));
        }
        query
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> crate::Result<T> {
        let url = self.url(path);
        debug!(path, "TMDb request");
        let response = self
            .client
            .get(&url)
            .query(&self.base_query())
            .query(query)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Walk result pages of `path` until `limit` items are collected or the
    /// listing is exhausted.
    pub(crate) async fn paged<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
        limit: usize,
    ) -> crate::Result<Vec<T>> {
        let mut items = Vec::with_capacity(limit.min(100));
        let mut page = 1u32;
        while items.len() < limit {
            let mut page_query = query.clone();
            page_query.push(("page", page.to_string()));
            let response: PaginatedResponse<T> = self.get(path, &page_query).await?;
            let received = response.results.len();
            items.extend(response.results);
            match next_page(page, response.total_pages, received) {
                Some(next) => page = next,
                None => break,
            }
        }
        items.truncate(limit);
        Ok(items)
    }

    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TmdbError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| TmdbError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}

/// Page to request after `page`, or `None` once the listing is exhausted.
fn next_page(page: u32, total_pages: u32, received: usize) -> Option<u32> {
    if received == 0 || page >= total_pages.min(MAX_PAGES) {
        None
    } else {
        Some(page + 1)
    }
}
