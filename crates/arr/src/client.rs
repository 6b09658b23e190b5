use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::ArrError;
use crate::models::{QualityProfile, RootFolder, SystemStatus, Tag};

const API_PREFIX: &str = "/api/v3";

/// Shared v3 client. `service` names the server in errors and logs.
pub struct ArrClient {
    client: Client,
    base_url: String,
    api_key: String,
    service: &'static str,
}

impl ArrClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        service: &'static str,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            service,
        }
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(service = self.service, %method, path, "Arr request");
        self.client
            .request(method, format!("{}{}{}", self.base_url, API_PREFIX, path))
            .header("X-Api-Key", &self.api_key)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> crate::Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ArrError::Api {
                service: self.service,
                status_code: status.as_u16(),
                message: body,
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| ArrError::Json {
            service: self.service,
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> crate::Result<T> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> crate::Result<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// GET /api/v3/qualityprofile
    pub async fn quality_profiles(&self) -> crate::Result<Vec<QualityProfile>> {
        self.get_json("/qualityprofile", &[]).await
    }

    /// GET /api/v3/rootfolder
    pub async fn root_folders(&self) -> crate::Result<Vec<RootFolder>> {
        self.get_json("/rootfolder", &[]).await
    }

    /// GET /api/v3/tag
    pub async fn tags(&self) -> crate::Result<Vec<Tag>> {
        self.get_json("/tag", &[]).await
    }

    /// POST /api/v3/tag
    pub async fn create_tag(&self, label: &str) -> crate::Result<Tag> {
        let tag: Tag = self
            .post_json("/tag", &serde_json::json!({ "label": label }))
            .await?;
        info!(service = self.service, label, id = tag.id, "Created tag");
        Ok(tag)
    }

    /// GET /api/v3/system/status
    pub async fn system_status(&self) -> crate::Result<SystemStatus> {
        self.get_json("/system/status", &[]).await
    }
}

/// Quality profile by name, ignoring case.
pub fn find_profile<'a>(profiles: &'a [QualityProfile], name: &str) -> Option<&'a QualityProfile> {
    profiles.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Root folder equal to `preferred`, else one that contains it, else the first
/// configured folder.
pub fn pick_root_folder<'a>(folders: &'a [RootFolder], preferred: &str) -> Option<&'a str> {
    folders
        .iter()
        .find(|f| f.path == preferred)
        .or_else(|| folders.iter().find(|f| preferred.starts_with(&f.path)))
        .or_else(|| folders.first())
        .map(|f| f.path.as_str())
}
