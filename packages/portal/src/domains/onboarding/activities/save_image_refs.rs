//! Attach uploaded image keys to the provider record.

use portal_api::{ImageUrls, ProviderRecord};
use tracing::{error, info};

use crate::common::{non_blank, ProviderId};
use crate::domains::onboarding::errors::CommitError;
use crate::kernel::PortalDeps;

use super::UploadedImages;

/// Persist the keys and verify the backend actually stored them.
///
/// A missing record or missing image field in a successful response is a
/// consistency violation and fails the commit. The uploaded objects are not
/// removed on failure; they stay orphaned in storage.
pub async fn save_image_references(
    provider_id: &ProviderId,
    images: &UploadedImages,
    deps: &PortalDeps,
) -> Result<ProviderRecord, CommitError> {
    let urls = ImageUrls {
        headshot_url: images.headshot_key.clone(),
        gallery_url: images.gallery_key.clone(),
    };

    let result = deps
        .provider_store
        .save_image_urls(provider_id, &urls)
        .await
        .map_err(CommitError::Persist)
        .and_then(|provider| provider.ok_or(CommitError::MissingProvider))
        .and_then(|provider| {
            let saved = non_blank(provider.headshot_url.as_deref()).is_some()
                && non_blank(provider.gallery_url.as_deref()).is_some();
            if saved {
                Ok(provider)
            } else {
                Err(CommitError::ImagesNotSaved)
            }
        });

    match &result {
        Ok(provider) => info!(
            provider_id = %provider_id,
            headshot_url = ?provider.headshot_url,
            gallery_url = ?provider.gallery_url,
            "Saved provider images"
        ),
        Err(e) => error!(
            provider_id = %provider_id,
            headshot_key = %images.headshot_key,
            gallery_key = %images.gallery_key,
            error = %e,
            "Image references not saved; uploaded objects are orphaned"
        ),
    }

    result
}
