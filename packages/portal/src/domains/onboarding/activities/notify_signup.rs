//! Provider signup notification, dispatched off the critical path.

use portal_api::ProviderRecord;
use tokio::task::JoinHandle;
use tracing::info;

use crate::common::ProviderId;
use crate::domains::onboarding::data::materialize_signup_notification;
use crate::kernel::PortalDeps;

pub const SIGNUP_NOTIFICATION_EFFECT: &str = "signup_notification";

/// Spawn the notification as a detached task.
///
/// Failures go to `deps.side_effects`. The handle is for observers only; the
/// commit workflow never awaits it.
pub fn spawn_signup_notification(
    provider_id: &ProviderId,
    record: &ProviderRecord,
    deps: &PortalDeps,
) -> JoinHandle<()> {
    let payload = materialize_signup_notification(provider_id, record);
    let notifier = deps.notifier.clone();
    let side_effects = deps.side_effects.clone();
    let subject = provider_id.to_string();

    tokio::spawn(async move {
        match notifier.send_signup(&payload).await {
            Ok(ack) => info!(provider_id = %subject, ack = %ack, "Provider signup notification sent"),
            Err(e) => {
                let e = e.context("Failed to send provider signup notification");
                side_effects.record(SIGNUP_NOTIFICATION_EFFECT, subject, &e);
            }
        }
    })
}
