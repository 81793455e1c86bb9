use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use crate::domains::onboarding::Step;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub portal_api_url: String,
    pub portal_api_token: Option<String>,
    pub session_file: PathBuf,
    pub entry_route: String,
    pub completion_route: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            portal_api_url: env::var("PORTAL_API_URL").context("PORTAL_API_URL must be set")?,
            portal_api_token: env::var("PORTAL_API_TOKEN").ok().filter(|t| !t.is_empty()),
            session_file: env::var("PORTAL_SESSION_FILE")
                .unwrap_or_else(|_| ".portal-session.json".to_string())
                .into(),
            entry_route: env::var("PORTAL_ENTRY_ROUTE")
                .unwrap_or_else(|_| Step::Entry.route().to_string()),
            completion_route: env::var("PORTAL_COMPLETION_ROUTE")
                .unwrap_or_else(|_| Step::Completion.route().to_string()),
        })
    }

    /// Route for a step, honoring configured overrides
    pub fn route_for(&self, step: Step) -> &str {
        match step {
            Step::Entry => &self.entry_route,
            Step::Completion => &self.completion_route,
            other => other.route(),
        }
    }
}
