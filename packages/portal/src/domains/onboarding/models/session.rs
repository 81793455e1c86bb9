use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::common::ProviderId;
use crate::kernel::BaseSessionStore;

/// Key of the provider-identity marker in the session store
pub const PROVIDER_ID_KEY: &str = "providerId";

/// Onboarding session context passed into the commit workflow.
///
/// Holds the provider-identity marker written when the provider record was
/// created on the entry step. The marker is removed once onboarding commits.
#[derive(Clone)]
pub struct OnboardingSession {
    store: Arc<dyn BaseSessionStore>,
    provider_id: Option<ProviderId>,
}

impl OnboardingSession {
    /// Read the marker from `store`. A blank stored value counts as absent.
    pub fn load(store: Arc<dyn BaseSessionStore>) -> Result<Self> {
        let provider_id = store
            .get(PROVIDER_ID_KEY)
            .context("Failed to read session marker")?
            .and_then(|raw| ProviderId::parse(&raw).ok());

        debug!(has_provider = provider_id.is_some(), "Onboarding session loaded");
        Ok(Self { store, provider_id })
    }

    /// Write a fresh marker, as the entry step does after creating the record
    pub fn start(store: Arc<dyn BaseSessionStore>, provider_id: ProviderId) -> Result<Self> {
        store
            .set(PROVIDER_ID_KEY, provider_id.as_str())
            .context("Failed to write session marker")?;
        Ok(Self {
            store,
            provider_id: Some(provider_id),
        })
    }

    pub fn provider_id(&self) -> Option<&ProviderId> {
        self.provider_id.as_ref()
    }

    /// Remove the marker from the store, reporting a store failure.
    pub fn clear(&mut self) -> Result<()> {
        self.provider_id = None;
        self.store
            .remove(PROVIDER_ID_KEY)
            .context("Failed to clear session marker")
    }

    /// Remove the marker after a committed onboarding.
    ///
    /// Returns whether the removal reached the store; a failure is logged and
    /// does not undo the commit.
    pub fn finish(&mut self) -> bool {
        let provider_id = self.provider_id.clone();
        match self.clear() {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    provider_id = ?provider_id.as_ref().map(ProviderId::as_str),
                    error = %format!("{:#}", e),
                    "Failed to clear session marker"
                );
                false
            }
        }
    }
}

impl std::fmt::Debug for OnboardingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnboardingSession")
            .field("provider_id", &self.provider_id)
            .finish()
    }
}
