//! Provider onboarding domain
//!
//! The profile-content step: select headshot, gallery and reviews files,
//! then commit them to the provider record.

pub mod activities;
pub mod data;
pub mod errors;
pub mod messages;
pub mod models;
pub mod workflows;

pub use data::materialize_signup_notification;
pub use errors::{CommitError, PreconditionError, SelectionRejected};
pub use models::{OnboardingSession, PendingUploads, Step, UploadSlot, PROVIDER_ID_KEY};
pub use workflows::{CommitOutcome, CommitWorkflow, ReviewsOutcome};
