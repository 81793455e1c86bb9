//! Signup notification payload.
//!
//! The notification service requires every field to be populated, while the
//! provider record may omit any of them. `materialize_signup_notification`
//! fills each gap independently.

use portal_api::{ProviderRecord, ProviderSignupNotification};

use crate::common::{non_blank, ProviderId};

pub const NAME_PLACEHOLDER: &str = "Name not available";
pub const EMAIL_PLACEHOLDER: &str = "Email not available";
pub const PRACTICE_NAME_PLACEHOLDER: &str = "Practice name not available";
pub const PHONE_PLACEHOLDER: &str = "Phone not provided";
pub const ADDRESS_PLACEHOLDER: &str = "Address not provided";
pub const NPI_PLACEHOLDER: &str = "NPI not provided";

/// Build the notification payload from a possibly partial provider record.
///
/// Text fields fall back to a readable placeholder when absent or blank; list
/// fields fall back to an empty list.
pub fn materialize_signup_notification(
    provider_id: &ProviderId,
    record: &ProviderRecord,
) -> ProviderSignupNotification {
    ProviderSignupNotification {
        id: provider_id.to_string(),
        name: text_or(record.provider_name.as_deref(), NAME_PLACEHOLDER),
        email: text_or(record.email.as_deref(), EMAIL_PLACEHOLDER),
        practice_name: text_or(record.practice_name.as_deref(), PRACTICE_NAME_PLACEHOLDER),
        phone: text_or(record.phone.as_deref(), PHONE_PLACEHOLDER),
        specialties: list_or_empty(record.specialties.as_ref()),
        address: text_or(record.address.as_deref(), ADDRESS_PLACEHOLDER),
        certifications: list_or_empty(record.board_certifications.as_ref()),
        npi_number: text_or(record.npi_number.as_deref(), NPI_PLACEHOLDER),
        hospital_affiliations: list_or_empty(record.hospital_affiliations.as_ref()),
        education_and_training: list_or_empty(record.education_and_training.as_ref()),
    }
}

fn text_or(value: Option<&str>, placeholder: &str) -> String {
    non_blank(value).unwrap_or(placeholder).to_string()
}

fn list_or_empty(values: Option<&Vec<String>>) -> Vec<String> {
    values.cloned().unwrap_or_default()
}
