//! Direct-to-storage asset uploads.

use anyhow::Result;
use tracing::{debug, info};

use crate::common::SelectedFile;
use crate::domains::onboarding::errors::CommitError;
use crate::domains::onboarding::models::UploadSlot;
use crate::kernel::PortalDeps;

/// Storage keys of the two uploaded images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImages {
    pub headshot_key: String,
    pub gallery_key: String,
}

/// Sign and transfer one file. Returns the storage key.
pub async fn upload_file(file: &SelectedFile, deps: &PortalDeps) -> Result<String> {
    let signature = deps
        .upload_signer
        .sign(&file.file_name, &file.content_type)
        .await?;

    debug!(file = %file.file_name, key = %signature.key, "Upload authorized");

    deps.storage
        .put(&signature, file.bytes.clone(), &file.content_type)
        .await?;

    Ok(signature.key)
}

/// Upload headshot and gallery concurrently.
///
/// Fails as soon as either upload fails; the other is dropped.
pub async fn upload_images(
    headshot: &SelectedFile,
    gallery: &SelectedFile,
    deps: &PortalDeps,
) -> Result<UploadedImages, CommitError> {
    let headshot_upload = async {
        upload_file(headshot, deps)
            .await
            .map_err(|source| CommitError::Upload {
                slot: UploadSlot::Headshot,
                source,
            })
    };
    let gallery_upload = async {
        upload_file(gallery, deps)
            .await
            .map_err(|source| CommitError::Upload {
                slot: UploadSlot::Gallery,
                source,
            })
    };

    let (headshot_key, gallery_key) = futures::try_join!(headshot_upload, gallery_upload)?;

    info!(headshot_key = %headshot_key, gallery_key = %gallery_key, "Uploaded storage keys");

    Ok(UploadedImages {
        headshot_key,
        gallery_key,
    })
}
