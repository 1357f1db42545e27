//! HTTP implementation of [`LibraryApi`] on top of `reqwest`

use super::{
    dto::*,
    endpoints,
    error::{map_decode_error, map_status_error, map_transport_error},
    query,
};
use crate::config::Config;
use crate::contract::{
    DeleteMode, Image, ImagePage, LibraryApi, LibraryError, LibraryImport, ListParams,
    ScanSummary, WatcherStatus,
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// REST client for the image library backend
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct RestClient {
    http: reqwest::Client,
    /// Backend origin without a trailing slash
    base_url: String,
}

impl RestClient {
    /// Create a client with default timeouts
    pub fn new(base_url: &str) -> Result<Self, LibraryError> {
        Self::with_timeouts(base_url, Duration::from_secs(30), Duration::from_secs(5))
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, LibraryError> {
        Self::with_timeouts(
            config.effective_api_base(),
            config.request_timeout,
            config.connect_timeout,
        )
    }

    pub fn with_timeouts(
        base_url: &str,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, LibraryError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(map_transport_error)?;
        Self::with_http_client(http, base_url)
    }

    /// Wrap an existing `reqwest::Client`
    pub fn with_http_client(http: reqwest::Client, base_url: &str) -> Result<Self, LibraryError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| LibraryError::InvalidUrl {
            url: base_url.clone(),
            details: e.to_string(),
        })?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path
    pub fn url(&self, path: &str) -> Result<Url, LibraryError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| LibraryError::InvalidUrl {
            url: raw,
            details: e.to_string(),
        })
    }

    /// URL of a setting; the key is always a single, escaped path segment
    pub fn setting_url(&self, key: &str) -> Result<Url, LibraryError> {
        if matches!(key, "" | "." | "..") {
            return Err(LibraryError::InvalidUrl {
                url: format!("{}{}/{}", self.base_url, endpoints::SETTINGS, key),
                details: "setting key must be a non-empty name".to_string(),
            });
        }

        let mut url = self.url(endpoints::SETTINGS)?;
        url.path_segments_mut()
            .map_err(|()| LibraryError::InvalidUrl {
                url: self.base_url.clone(),
                details: "base URL cannot carry a path".to_string(),
            })?
            .push(key);
        Ok(url)
    }

    /// URL serving the original image file
    pub fn image_file_url(&self, id: u64) -> Result<Url, LibraryError> {
        self.url(&endpoints::image_file(id))
    }

    /// Resolve a backend-relative URL (such as a thumbnail path) against the base.
    /// Absolute URLs are returned unchanged.
    pub fn resolve_url(&self, path_or_url: &str) -> Result<Url, LibraryError> {
        if let Ok(absolute) = Url::parse(path_or_url) {
            return Ok(absolute);
        }
        if path_or_url.starts_with('/') {
            self.url(path_or_url)
        } else {
            self.url(&format!("/{}", path_or_url))
        }
    }

    // ===== Request plumbing =====

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "Sending library request");
        self.http.request(method, url)
    }

    /// Send the request and return the body of a successful response
    async fn execute(&self, request: RequestBuilder) -> Result<String, LibraryError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Library request failed");
            return Err(map_status_error(status, &body));
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, LibraryError> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(map_decode_error)
    }
}

#[async_trait]
impl LibraryApi for RestClient {
    async fn list_images(&self, params: &ListParams) -> Result<ImagePage, LibraryError> {
        let mut url = self.url(endpoints::IMAGES)?;
        url.set_query(Some(query::encode(&query::list_query(params)).as_str()));

        let page: ImagePageDto = self.send_json(self.request(Method::GET, url)).await?;
        Ok(page.into())
    }

    async fn get_image(&self, id: u64) -> Result<Image, LibraryError> {
        let url = self.url(&endpoints::image(id))?;
        let image: ImageDto = self.send_json(self.request(Method::GET, url)).await?;
        Ok(image.into())
    }

    async fn delete_image(&self, id: u64, mode: DeleteMode) -> Result<(), LibraryError> {
        let mut url = self.url(&endpoints::image(id))?;
        url.query_pairs_mut().append_pair("mode", mode.as_str());

        let mut request = self.request(Method::DELETE, url);
        if mode == DeleteMode::Hard {
            // Permanent deletion is confirmed by echoing the image id.
            request = request.json(&DeleteTokenRequest {
                token: id.to_string(),
            });
        }
        self.execute(request).await?;
        Ok(())
    }

    async fn update_image_metadata(
        &self,
        id: u64,
        metadata: serde_json::Value,
    ) -> Result<Image, LibraryError> {
        let url = self.url(&endpoints::image_metadata(id))?;
        let image: ImageDto = self
            .send_json(self.request(Method::PUT, url).json(&metadata))
            .await?;
        Ok(image.into())
    }

    async fn add_tags(&self, id: u64, tags: &[String]) -> Result<Image, LibraryError> {
        let url = self.url(&endpoints::image_tags(id))?;
        let image: ImageDto = self
            .send_json(self.request(Method::POST, url).json(&TagsRequest { tags }))
            .await?;
        Ok(image.into())
    }

    async fn remove_tags(&self, id: u64, tags: &[String]) -> Result<Image, LibraryError> {
        let url = self.url(&endpoints::image_tags(id))?;
        let image: ImageDto = self
            .send_json(self.request(Method::DELETE, url).json(&TagsRequest { tags }))
            .await?;
        Ok(image.into())
    }

    async fn get_setting(&self, key: &str) -> Result<String, LibraryError> {
        let url = self.setting_url(key)?;
        let setting: SettingValueDto = self.send_json(self.request(Method::GET, url)).await?;
        Ok(setting.value.unwrap_or_default())
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<(), LibraryError> {
        let url = self.setting_url(key)?;
        let body = SettingValueDto {
            value: Some(value.to_string()),
        };
        self.execute(self.request(Method::PUT, url).json(&body))
            .await?;
        Ok(())
    }

    async fn import_library(
        &self,
        import: &LibraryImport,
    ) -> Result<serde_json::Value, LibraryError> {
        let url = self.url(endpoints::SETTINGS_IMPORT)?;
        let body = self
            .execute(self.request(Method::POST, url).json(&LibraryImportDto::from(import)))
            .await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(map_decode_error)
    }

    async fn scan_library(&self, root: Option<&str>) -> Result<ScanSummary, LibraryError> {
        let url = self.url(endpoints::SCAN)?;
        let mut request = self.request(Method::POST, url);
        if let Some(root) = root.filter(|r| !r.is_empty()) {
            request = request.json(&ScanRequest { root });
        }
        let summary: ScanSummaryDto = self.send_json(request).await?;
        Ok(summary.into())
    }

    async fn watcher_status(&self) -> Result<WatcherStatus, LibraryError> {
        let url = self.url(endpoints::WATCHER)?;
        let status: WatcherStatusDto = self.send_json(self.request(Method::GET, url)).await?;
        Ok(status.into())
    }

    async fn start_watcher(&self) -> Result<WatcherStatus, LibraryError> {
        let url = self.url(endpoints::WATCHER_START)?;
        let status: WatcherStatusDto = self.send_json(self.request(Method::POST, url)).await?;
        Ok(status.into())
    }

    async fn stop_watcher(&self) -> Result<WatcherStatus, LibraryError> {
        let url = self.url(endpoints::WATCHER_STOP)?;
        let status: WatcherStatusDto = self.send_json(self.request(Method::POST, url)).await?;
        Ok(status.into())
    }
}
