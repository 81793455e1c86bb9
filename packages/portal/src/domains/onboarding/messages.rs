//! User-facing text for onboarding outcomes.

use super::errors::{CommitError, PreconditionError, SelectionRejected};
use super::models::UploadSlot;

pub const UPLOADING: &str = "Uploading your files, please wait...";

pub fn selection_rejected(rejection: &SelectionRejected) -> &'static str {
    match rejection.slot {
        UploadSlot::Headshot | UploadSlot::Gallery => {
            "Only JPG/PNG image files are allowed for this field."
        }
        UploadSlot::Reviews => "Only .xls/.xlsx files are allowed for Client Reviews.",
    }
}

/// Confirmation after a fully successful commit
pub fn reviews_imported(reviews_added: u32, warning: Option<&str>) -> String {
    match warning {
        Some(warning) => format!(
            "Files uploaded successfully! {} reviews were processed. {}",
            reviews_added, warning
        ),
        None => format!(
            "Files uploaded successfully! {} reviews were processed.",
            reviews_added
        ),
    }
}

/// Images are committed but the spreadsheet import failed
pub fn reviews_failed(cause: &str) -> String {
    format!(
        "Images uploaded successfully, but there was an issue processing the reviews file: {}. Please check the file format and try again.",
        cause
    )
}

pub fn commit_error(error: &CommitError) -> String {
    match error {
        CommitError::Precondition(PreconditionError::MissingSession) => {
            "Provider ID not found. Please start from the beginning.".to_string()
        }
        CommitError::Precondition(PreconditionError::MissingFiles(_)) => {
            "Please upload all required files before continuing.".to_string()
        }
        CommitError::AlreadyInFlight => UPLOADING.to_string(),
        other => format!("Upload failed: {}. Please try again.", with_causes(other)),
    }
}

/// Display text of `error` followed by each underlying cause
fn with_causes(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut cause = std::error::Error::source(error);
    while let Some(inner) = cause {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        cause = inner.source();
    }
    text
}
