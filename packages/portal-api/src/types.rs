//! Wire types for the portal backend REST API.
//!
//! All bodies use camelCase keys to match the backend.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request body for `POST /upload/signature`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSignatureRequest {
    pub filename: String,
    pub content_type: String,
}

/// Short-lived write credential plus the storage key it writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSignature {
    pub presigned_url: String,
    pub key: String,
}

/// Storage keys attached to a provider record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrls {
    pub headshot_url: String,
    pub gallery_url: String,
}

/// Provider record as returned by the backend. Every field is optional on the wire.
///
/// Only the image keys are read strictly. Descriptive fields accept whatever
/// scalar shape the backend stores (an NPI may come back as a number) and fall
/// back to `None` for anything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub practice_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub board_certifications: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub npi_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub hospital_affiliations: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub education_and_training: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headshot_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery_url: Option<String>,
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Strings pass through, numbers and bools are stringified, anything else is `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_text))
}

/// Arrays keep their scalar items; a lone scalar becomes a one-item list.
fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(items.into_iter().filter_map(scalar_text).collect()),
        Some(other) => scalar_text(other).map(|text| vec![text]),
        None => None,
    })
}

/// `{ "provider": ... }` envelope used by the provider endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderEnvelope {
    #[serde(default)]
    pub provider: Option<ProviderRecord>,
}

/// Advisory payload returned alongside a successful reviews import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportWarnings {
    pub message: String,
}

/// Response body for `POST /providers/{id}/reviews/import`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsImportResponse {
    #[serde(default)]
    pub reviews_added: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<ImportWarnings>,
}

/// Body for `POST /notifications/provider-signup`.
///
/// Every field is populated; absent record fields are replaced with placeholders
/// before this is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSignupNotification {
    pub id: String,
    pub name: String,
    pub email: String,
    pub practice_name: String,
    pub phone: String,
    pub specialties: Vec<String>,
    pub address: String,
    pub certifications: Vec<String>,
    pub npi_number: String,
    pub hospital_affiliations: Vec<String>,
    pub education_and_training: Vec<String>,
}
