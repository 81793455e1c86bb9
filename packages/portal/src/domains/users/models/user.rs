use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{ContactInfo, ProviderId};

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Provider,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::User => write!(f, "user"),
            UserRole::Provider => write!(f, "provider"),
        }
    }
}

/// Error returned when a user document is missing a required field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// User document as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<ProviderId>,
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub premium_expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role: UserRole::default(),
            provider_id: None,
            contact_info: ContactInfo::default(),
            is_premium: false,
            premium_expiry: None,
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    /// Trim name, email and contact fields. The password is left as typed.
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.contact_info.normalize();
    }

    /// Check required fields, reporting the first one missing
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.name.trim().is_empty() {
            return Err(UserValidationError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(UserValidationError::MissingField("email"));
        }
        if self.password.is_empty() {
            return Err(UserValidationError::MissingField("password"));
        }
        Ok(())
    }
}
