//! Observability sink for detached side effects.
//!
//! Best-effort work (signup notifications) runs off the critical path. Its
//! failures are logged and recorded here so operators and tests can see them
//! without the workflow ever waiting on or reporting them.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// One failed side effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideEffectFailure {
    pub effect: &'static str,
    pub subject: String,
    pub error: String,
    pub occurred_at: DateTime<Utc>,
}

/// Shared, append-only record of side-effect failures
#[derive(Debug, Clone, Default)]
pub struct SideEffectLog {
    failures: Arc<Mutex<Vec<SideEffectFailure>>>,
}

impl SideEffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and store a failure
    pub fn record(&self, effect: &'static str, subject: impl Into<String>, error: &anyhow::Error) {
        let subject = subject.into();
        warn!(effect, subject = %subject, error = %error, "Side effect failed (non-fatal)");

        let failure = SideEffectFailure {
            effect,
            subject,
            error: format!("{:#}", error),
            occurred_at: Utc::now(),
        };
        match self.failures.lock() {
            Ok(mut failures) => failures.push(failure),
            Err(poisoned) => poisoned.into_inner().push(failure),
        }
    }

    /// Snapshot of recorded failures, oldest first
    pub fn failures(&self) -> Vec<SideEffectFailure> {
        match self.failures.lock() {
            Ok(failures) => failures.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.failures().is_empty()
    }
}
