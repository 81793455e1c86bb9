//! Typed identifiers for portal entities.
//!
//! Provider records live in a document store and are keyed by opaque string
//! ids (ObjectId hex or similar), so ids are string newtypes rather than UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Identifier of a provider record.
///
/// Never empty: construction through [`ProviderId::parse`] rejects blank input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(String);

/// Error returned when an id string is blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("provider id must not be empty")]
pub struct EmptyIdError;

impl ProviderId {
    /// Parse a provider id, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, EmptyIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmptyIdError);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProviderId {
    type Error = EmptyIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProviderId> for String {
    fn from(id: ProviderId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProviderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
