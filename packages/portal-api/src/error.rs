//! Error types for the portal API client.

use thiserror::Error;

/// Result type for portal API client operations.
pub type Result<T> = std::result::Result<T, PortalApiError>;

/// Portal API client errors.
#[derive(Debug, Error)]
pub enum PortalApiError {
    /// Configuration error (missing base URL, malformed URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the backend or the storage endpoint
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl PortalApiError {
    /// HTTP status of an API error, if the request reached the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            PortalApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
