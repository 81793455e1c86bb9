//! Portal dependencies for onboarding activities (using traits for testability)
//!
//! This module provides the central dependency container used by the onboarding
//! workflow. All external services use trait abstractions to enable testing.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use portal_api::PortalApiClient;
use std::sync::Arc;

use crate::common::{ProviderId, SelectedFile};
use crate::config::Config;
use crate::kernel::{
    BaseObjectStorage, BaseProviderStore, BaseReviewImporter, BaseSignupNotifier,
    BaseUploadSigner, ImageUrls, ProviderRecord, ProviderSignupNotification, ReviewImport,
    SideEffectLog, UploadSignature,
};

// =============================================================================
// PortalApiClient Adapter (implements the Base* service traits)
// =============================================================================

/// Wrapper around PortalApiClient that implements every backend-facing trait
#[derive(Clone)]
pub struct PortalApiAdapter(pub Arc<PortalApiClient>);

impl PortalApiAdapter {
    pub fn new(client: Arc<PortalApiClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseUploadSigner for PortalApiAdapter {
    async fn sign(&self, filename: &str, content_type: &str) -> Result<UploadSignature> {
        self.0
            .get_upload_signature(filename, content_type)
            .await
            .with_context(|| format!("Failed to get upload signature for {}", filename))
    }
}

#[async_trait]
impl BaseObjectStorage for PortalApiAdapter {
    async fn put(
        &self,
        signature: &UploadSignature,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<()> {
        self.0
            .upload_to_storage(&signature.presigned_url, bytes, content_type)
            .await
            .with_context(|| format!("Failed to upload {} to storage", signature.key))
    }
}

#[async_trait]
impl BaseProviderStore for PortalApiAdapter {
    async fn save_image_urls(
        &self,
        provider_id: &ProviderId,
        urls: &ImageUrls,
    ) -> Result<Option<ProviderRecord>> {
        let envelope = self
            .0
            .save_image_urls(provider_id.as_str(), urls)
            .await
            .context("Failed to save image urls")?;
        Ok(envelope.provider)
    }

    async fn get_provider(&self, provider_id: &ProviderId) -> Result<ProviderRecord> {
        self.0
            .get_provider(provider_id.as_str())
            .await
            .with_context(|| format!("Failed to load provider {}", provider_id))
    }
}

#[async_trait]
impl BaseReviewImporter for PortalApiAdapter {
    async fn import_reviews(
        &self,
        provider_id: &ProviderId,
        file: &SelectedFile,
    ) -> Result<ReviewImport> {
        let response = self
            .0
            .upload_reviews_excel(
                provider_id.as_str(),
                &file.file_name,
                &file.content_type,
                file.bytes.clone(),
            )
            .await?;

        Ok(ReviewImport {
            reviews_added: response.reviews_added,
            warning: response.warnings.map(|w| w.message),
        })
    }
}

#[async_trait]
impl BaseSignupNotifier for PortalApiAdapter {
    async fn send_signup(
        &self,
        payload: &ProviderSignupNotification,
    ) -> Result<serde_json::Value> {
        Ok(self.0.send_provider_signup_notification(payload).await?)
    }
}

// =============================================================================
// PortalDeps
// =============================================================================

/// Dependencies accessible to onboarding activities (using traits for testability)
#[derive(Clone)]
pub struct PortalDeps {
    pub upload_signer: Arc<dyn BaseUploadSigner>,
    pub storage: Arc<dyn BaseObjectStorage>,
    pub provider_store: Arc<dyn BaseProviderStore>,
    pub review_importer: Arc<dyn BaseReviewImporter>,
    pub notifier: Arc<dyn BaseSignupNotifier>,
    /// Sink for failures of detached, best-effort side effects
    pub side_effects: SideEffectLog,
}

impl PortalDeps {
    /// Create new PortalDeps with the given dependencies
    pub fn new(
        upload_signer: Arc<dyn BaseUploadSigner>,
        storage: Arc<dyn BaseObjectStorage>,
        provider_store: Arc<dyn BaseProviderStore>,
        review_importer: Arc<dyn BaseReviewImporter>,
        notifier: Arc<dyn BaseSignupNotifier>,
        side_effects: SideEffectLog,
    ) -> Self {
        Self {
            upload_signer,
            storage,
            provider_store,
            review_importer,
            notifier,
            side_effects,
        }
    }

    /// Wire every service to the portal backend through one API client
    pub fn from_api_client(client: PortalApiClient) -> Self {
        let adapter = Arc::new(PortalApiAdapter::new(Arc::new(client)));
        Self::new(
            adapter.clone(),
            adapter.clone(),
            adapter.clone(),
            adapter.clone(),
            adapter,
            SideEffectLog::new(),
        )
    }

    /// Build production dependencies from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = PortalApiClient::new(&config.portal_api_url)
            .context("Failed to create portal API client")?;
        if let Some(token) = &config.portal_api_token {
            client = client.with_api_token(token.clone());
        }
        Ok(Self::from_api_client(client))
    }
}
