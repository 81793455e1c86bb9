//! Onboarding error types.
//!
//! Callers can tell exactly two failure outcomes apart: a precondition
//! failure (nothing was sent anywhere) and a commit failure during upload or
//! reference persistence. Reviews import and notification never produce
//! either.

use thiserror::Error;

use super::models::{Step, UploadSlot};

/// A file was refused by a slot's content-type gate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{slot} does not accept content type {content_type:?}")]
pub struct SelectionRejected {
    pub slot: UploadSlot,
    pub content_type: String,
}

/// Local state is not ready for a commit; no request was issued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("Provider ID not found in session")]
    MissingSession,

    #[error("Missing required files: {}", join_slots(.0))]
    MissingFiles(Vec<UploadSlot>),
}

#[derive(Debug, Error)]
pub enum CommitError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// A commit for this workflow is already running
    #[error("A commit is already in progress")]
    AlreadyInFlight,

    #[error("Failed to upload {slot} image")]
    Upload {
        slot: UploadSlot,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to save image references")]
    Persist(#[source] anyhow::Error),

    #[error("Failed to save images - no provider data returned")]
    MissingProvider,

    #[error("Images were not properly saved to provider record")]
    ImagesNotSaved,
}

impl CommitError {
    /// True for failures that happened before any request was sent
    pub fn is_precondition(&self) -> bool {
        matches!(self, CommitError::Precondition(_) | CommitError::AlreadyInFlight)
    }

    /// Step the user should be sent to, if the failure requires leaving this one
    pub fn redirect(&self) -> Option<Step> {
        match self {
            CommitError::Precondition(PreconditionError::MissingSession) => Some(Step::Entry),
            _ => None,
        }
    }
}

fn join_slots(slots: &[UploadSlot]) -> String {
    slots
        .iter()
        .map(|slot| slot.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
