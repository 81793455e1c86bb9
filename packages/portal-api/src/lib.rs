//! Provider portal REST API client
//!
//! A thin client for the portal backend with no onboarding logic of its own.
//! Covers upload signing, direct-to-storage transfer through a presigned URL,
//! provider image references, reviews spreadsheet import and the signup
//! notification endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use portal_api::PortalApiClient;
//!
//! let client = PortalApiClient::from_env()?;
//!
//! let signature = client.get_upload_signature("headshot.jpg", "image/jpeg").await?;
//! client
//!     .upload_to_storage(&signature.presigned_url, bytes, "image/jpeg")
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{PortalApiError, Result};
pub use types::*;

use bytes::Bytes;
use reqwest::{header, multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Portal backend API client.
#[derive(Clone)]
pub struct PortalApiClient {
    http_client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl std::fmt::Debug for PortalApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl PortalApiClient {
    /// Create a client for the backend rooted at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref()).map_err(|e| {
            PortalApiError::Config(format!("Invalid base URL {}: {}", base_url.as_ref(), e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PortalApiError::Config(format!(
                "Base URL cannot carry paths: {}",
                base_url
            )));
        }

        Ok(Self {
            http_client: Client::new(),
            base_url,
            api_token: None,
        })
    }

    /// Create from `PORTAL_API_URL` and the optional `PORTAL_API_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("PORTAL_API_URL")
            .map_err(|_| PortalApiError::Config("PORTAL_API_URL not set".into()))?;
        let client = Self::new(base_url)?;
        Ok(match std::env::var("PORTAL_API_TOKEN") {
            Ok(token) if !token.is_empty() => client.with_api_token(token),
            _ => client,
        })
    }

    /// Send `Authorization: Bearer <token>` on backend calls.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Request a presigned write URL and storage key for a file.
    pub async fn get_upload_signature(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<UploadSignature> {
        let url = self.endpoint(&["upload", "signature"])?;
        let body = UploadSignatureRequest {
            filename: filename.to_string(),
            content_type: content_type.to_string(),
        };

        let response = self
            .authorized(self.http_client.post(url))
            .json(&body)
            .send()
            .await
            .map_err(|e| network_error("upload signature", e))?;

        let signature: UploadSignature = read_json(response, "upload signature").await?;
        debug!(filename, key = %signature.key, "Received upload signature");
        Ok(signature)
    }

    /// PUT file bytes to a presigned storage URL.
    ///
    /// The presigned URL carries its own credential, so no bearer token is sent.
    pub async fn upload_to_storage(
        &self,
        presigned_url: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<()> {
        let size = bytes.len();
        let response = self
            .http_client
            .put(presigned_url)
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| network_error("storage upload", e))?;

        ensure_success(response, "storage upload").await?;
        debug!(size, "Uploaded file to storage");
        Ok(())
    }

    /// Attach storage keys to the provider record.
    ///
    /// The envelope is returned as-is; callers decide what a missing record means.
    pub async fn save_image_urls(
        &self,
        provider_id: &str,
        urls: &ImageUrls,
    ) -> Result<ProviderEnvelope> {
        let url = self.endpoint(&["providers", provider_id, "images"])?;

        let response = self
            .authorized(self.http_client.put(url))
            .json(urls)
            .send()
            .await
            .map_err(|e| network_error("save image urls", e))?;

        read_json(response, "save image urls").await
    }

    /// Fetch a provider record.
    pub async fn get_provider(&self, provider_id: &str) -> Result<ProviderRecord> {
        let url = self.endpoint(&["providers", provider_id])?;

        let response = self
            .authorized(self.http_client.get(url))
            .send()
            .await
            .map_err(|e| network_error("get provider", e))?;

        let envelope: ProviderEnvelope = read_json(response, "get provider").await?;
        envelope
            .provider
            .ok_or_else(|| PortalApiError::Parse("Response has no provider".into()))
    }

    /// Upload a reviews spreadsheet for server-side import.
    pub async fn upload_reviews_excel(
        &self,
        provider_id: &str,
        file_name: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> Result<ReviewsImportResponse> {
        let url = self.endpoint(&["providers", provider_id, "reviews", "import"])?;

        let part = multipart::Part::bytes(bytes.to_vec())
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| PortalApiError::Config(format!("Invalid content type: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .authorized(self.http_client.post(url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| network_error("reviews import", e))?;

        read_json(response, "reviews import").await
    }

    /// Notify the operations team that a provider finished signing up.
    pub async fn send_provider_signup_notification(
        &self,
        payload: &ProviderSignupNotification,
    ) -> Result<serde_json::Value> {
        let url = self.endpoint(&["notifications", "provider-signup"])?;

        let response = self
            .authorized(self.http_client.post(url))
            .json(payload)
            .send()
            .await
            .map_err(|e| network_error("signup notification", e))?;

        read_json(response, "signup notification").await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PortalApiError::Config(format!("Invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }
}

fn network_error(operation: &str, error: reqwest::Error) -> PortalApiError {
    warn!(operation, error = %error, "Portal API request failed");
    PortalApiError::Network(error.to_string())
}

async fn ensure_success(response: Response, operation: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(operation, status = %status, error = %body, "Portal API error");
    Err(PortalApiError::Api {
        status: status.as_u16(),
        message: error_message(&body, status.canonical_reason().unwrap_or("request failed")),
    })
}

async fn read_json<T: DeserializeOwned>(response: Response, operation: &str) -> Result<T> {
    let response = ensure_success(response, operation).await?;
    response
        .json()
        .await
        .map_err(|e| PortalApiError::Parse(format!("Invalid {} response: {}", operation, e)))
}

/// Prefer the backend's `{"message": ...}` or `{"error": ...}` text over the raw body.
fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["message", "error"] {
            if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
