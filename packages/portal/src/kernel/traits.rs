// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no onboarding logic.
// The commit workflow in domains/onboarding composes them.
//
// Naming convention: Base* for trait names (e.g., BaseUploadSigner, BaseObjectStorage)

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

use crate::common::{ProviderId, SelectedFile};

pub use portal_api::{ImageUrls, ProviderRecord, ProviderSignupNotification, UploadSignature};

// =============================================================================
// Upload Signing Trait (Infrastructure - presigned write credentials)
// =============================================================================

#[async_trait]
pub trait BaseUploadSigner: Send + Sync {
    /// Issue a short-lived write credential and storage key for a file
    async fn sign(&self, filename: &str, content_type: &str) -> Result<UploadSignature>;
}

// =============================================================================
// Object Storage Trait (Infrastructure - direct client-to-storage transfer)
// =============================================================================

#[async_trait]
pub trait BaseObjectStorage: Send + Sync {
    /// Write bytes to the location authorized by `signature`
    async fn put(&self, signature: &UploadSignature, bytes: Bytes, content_type: &str)
        -> Result<()>;
}

// =============================================================================
// Provider Store Trait (Infrastructure - record store)
// =============================================================================

#[async_trait]
pub trait BaseProviderStore: Send + Sync {
    /// Attach image storage keys to a provider record.
    ///
    /// Returns the updated record, or `None` when the backend answered without one.
    async fn save_image_urls(
        &self,
        provider_id: &ProviderId,
        urls: &ImageUrls,
    ) -> Result<Option<ProviderRecord>>;

    /// Fetch a provider record
    async fn get_provider(&self, provider_id: &ProviderId) -> Result<ProviderRecord>;
}

// =============================================================================
// Review Import Trait (Infrastructure - spreadsheet parsing service)
// =============================================================================

/// Result of a reviews spreadsheet import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewImport {
    pub reviews_added: u32,
    /// Advisory text from the importer (skipped rows, duplicates, ...)
    pub warning: Option<String>,
}

#[async_trait]
pub trait BaseReviewImporter: Send + Sync {
    /// Parse a reviews spreadsheet and attach its rows to the provider
    async fn import_reviews(&self, provider_id: &ProviderId, file: &SelectedFile)
        -> Result<ReviewImport>;
}

// =============================================================================
// Signup Notification Trait (Infrastructure - email dispatch)
// =============================================================================

#[async_trait]
pub trait BaseSignupNotifier: Send + Sync {
    /// Dispatch a provider signup notification; returns the service acknowledgement
    async fn send_signup(&self, payload: &ProviderSignupNotification)
        -> Result<serde_json::Value>;
}

// =============================================================================
// Session Store Trait (Infrastructure - client-local key/value storage)
// =============================================================================

pub trait BaseSessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}
