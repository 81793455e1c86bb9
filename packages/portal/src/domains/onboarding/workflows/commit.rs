//! Onboarding commit workflow
//!
//! Orchestrates the profile-content submission:
//! 1. Check preconditions (session marker, all three files) - no requests on failure
//! 2. Upload headshot and gallery concurrently (fatal on failure)
//! 3. Attach storage keys to the provider record (fatal on failure)
//! 4. Import the reviews spreadsheet (non-fatal)
//! 5. Dispatch the signup notification on a detached task (non-fatal, not awaited)
//! 6. Clear the session marker and pending files, then move to the completion step

use portal_api::ProviderRecord;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::common::ProviderId;
use crate::domains::onboarding::activities;
use crate::domains::onboarding::errors::{CommitError, PreconditionError};
use crate::domains::onboarding::messages;
use crate::domains::onboarding::models::{OnboardingSession, PendingUploads, Step};
use crate::kernel::PortalDeps;

/// Result of the reviews import step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewsOutcome {
    Imported {
        reviews_added: u32,
        warning: Option<String>,
    },
    Failed {
        error: String,
    },
}

impl ReviewsOutcome {
    /// Confirmation shown to the user once images are committed
    pub fn user_message(&self) -> String {
        match self {
            ReviewsOutcome::Imported {
                reviews_added,
                warning,
            } => messages::reviews_imported(*reviews_added, warning.as_deref()),
            ReviewsOutcome::Failed { error } => messages::reviews_failed(error),
        }
    }

    pub fn is_imported(&self) -> bool {
        matches!(self, ReviewsOutcome::Imported { .. })
    }
}

/// A committed onboarding
#[derive(Debug)]
pub struct CommitOutcome {
    pub provider_id: ProviderId,
    /// Provider record as returned after the image references were saved
    pub provider: ProviderRecord,
    pub reviews: ReviewsOutcome,
    /// Single message summarizing the commit for the user
    pub message: String,
    pub next_step: Step,
    /// Whether the session marker was removed from the store
    pub session_cleared: bool,
    /// Detached signup notification; awaiting it is optional
    pub notification: JoinHandle<()>,
}

/// Runs commits for one profile-content form.
///
/// Only one commit may run at a time; a concurrent `run` is refused before
/// any request is issued.
pub struct CommitWorkflow {
    deps: Arc<PortalDeps>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag however `run` exits
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CommitWorkflow {
    pub fn with_deps(deps: Arc<PortalDeps>) -> Self {
        Self {
            deps,
            in_flight: AtomicBool::new(false),
        }
    }

    /// True while a commit is running (the submit control should be disabled)
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn run(
        &self,
        session: &mut OnboardingSession,
        uploads: &mut PendingUploads,
    ) -> Result<CommitOutcome, CommitError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Commit requested while another is in flight");
            return Err(CommitError::AlreadyInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        // Step 1: preconditions
        let provider_id = session
            .provider_id()
            .cloned()
            .ok_or(PreconditionError::MissingSession)?;
        let files = uploads.ready()?;

        info!(provider_id = %provider_id, "Starting onboarding commit");

        // Step 2: upload images (fatal)
        let images =
            activities::upload_images(files.headshot, files.gallery, &self.deps).await?;

        // Step 3: persist references (fatal)
        let provider =
            activities::save_image_references(&provider_id, &images, &self.deps).await?;

        // Step 4: import reviews (non-fatal)
        let reviews = activities::import_reviews(&provider_id, files.reviews, &self.deps).await;

        // Step 5: notify (detached)
        let notification =
            activities::spawn_signup_notification(&provider_id, &provider, &self.deps);

        // Step 6: complete
        let session_cleared = session.finish();
        uploads.reset();

        info!(
            provider_id = %provider_id,
            reviews_imported = reviews.is_imported(),
            session_cleared,
            "Onboarding commit complete"
        );

        Ok(CommitOutcome {
            message: reviews.user_message(),
            provider_id,
            provider,
            reviews,
            next_step: Step::Completion,
            session_cleared,
            notification,
        })
    }
}
