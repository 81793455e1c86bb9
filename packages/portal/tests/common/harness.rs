//! Test harness wiring mocks into the commit workflow.

use std::sync::Arc;

use portal_core::common::ProviderId;
use portal_core::domains::onboarding::{CommitWorkflow, OnboardingSession, PROVIDER_ID_KEY};
use portal_core::kernel::{BaseSessionStore, InMemorySessionStore, TestDependencies};

pub struct TestHarness {
    pub deps: TestDependencies,
    pub store: Arc<InMemorySessionStore>,
    pub workflow: CommitWorkflow,
}

impl TestHarness {
    pub fn new(deps: TestDependencies) -> Self {
        let workflow = CommitWorkflow::with_deps(Arc::new(deps.portal_deps()));
        Self {
            deps,
            store: Arc::new(InMemorySessionStore::new()),
            workflow,
        }
    }

    /// Session with the marker set, as left behind by the entry step
    pub fn session_for(&self, provider_id: &str) -> OnboardingSession {
        OnboardingSession::start(
            self.store.clone(),
            ProviderId::parse(provider_id).expect("valid id"),
        )
        .expect("session started")
    }

    pub fn empty_session(&self) -> OnboardingSession {
        OnboardingSession::load(self.store.clone()).expect("session loaded")
    }

    pub fn stored_provider_id(&self) -> Option<String> {
        self.store.get(PROVIDER_ID_KEY).expect("store readable")
    }
}
