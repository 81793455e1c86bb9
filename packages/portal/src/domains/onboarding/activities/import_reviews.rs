//! Reviews spreadsheet import. Never fails the commit.

use tracing::{error, info};

use crate::common::{ProviderId, SelectedFile};
use crate::domains::onboarding::workflows::ReviewsOutcome;
use crate::kernel::PortalDeps;

pub async fn import_reviews(
    provider_id: &ProviderId,
    file: &SelectedFile,
    deps: &PortalDeps,
) -> ReviewsOutcome {
    match deps.review_importer.import_reviews(provider_id, file).await {
        Ok(import) => {
            info!(
                provider_id = %provider_id,
                reviews_added = import.reviews_added,
                warning = ?import.warning,
                "Reviews imported"
            );
            ReviewsOutcome::Imported {
                reviews_added: import.reviews_added,
                warning: import.warning,
            }
        }
        Err(e) => {
            error!(provider_id = %provider_id, error = %e, "Error processing reviews");
            ReviewsOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}
