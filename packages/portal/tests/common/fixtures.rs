//! Files and records used across onboarding tests.

use portal_core::common::SelectedFile;
use portal_core::domains::onboarding::{PendingUploads, UploadSlot};
use portal_core::kernel::ProviderRecord;

pub const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub fn headshot_jpeg() -> SelectedFile {
    SelectedFile::new("headshot.jpg", "image/jpeg", b"\xFF\xD8\xFFjpeg".to_vec())
}

pub fn gallery_png() -> SelectedFile {
    SelectedFile::new("gallery.png", "image/png", b"\x89PNGpng-data".to_vec())
}

pub fn reviews_xlsx() -> SelectedFile {
    SelectedFile::new("reviews.xlsx", XLSX, b"PK\x03\x04sheet".to_vec())
}

/// Headshot JPEG, gallery PNG and reviews XLSX, all accepted
pub fn complete_uploads() -> PendingUploads {
    let mut uploads = PendingUploads::new();
    uploads
        .select(UploadSlot::Headshot, Some(headshot_jpeg()))
        .expect("headshot accepted");
    uploads
        .select(UploadSlot::Gallery, Some(gallery_png()))
        .expect("gallery accepted");
    uploads
        .select(UploadSlot::Reviews, Some(reviews_xlsx()))
        .expect("reviews accepted");
    uploads
}

pub fn provider_record() -> ProviderRecord {
    ProviderRecord {
        provider_name: Some("Dr. Ada Lovelace".to_string()),
        email: Some("ada@clinic.example".to_string()),
        practice_name: Some("Analytical Dermatology".to_string()),
        phone: Some("555-0100".to_string()),
        address: Some("1 Engine Way".to_string()),
        specialties: Some(vec!["Dermatology".to_string()]),
        board_certifications: Some(vec!["ABD".to_string()]),
        npi_number: Some("1234567890".to_string()),
        hospital_affiliations: Some(vec!["General".to_string()]),
        education_and_training: Some(vec!["MD".to_string()]),
        ..ProviderRecord::default()
    }
}
