//! Behaviour of the onboarding commit workflow against mock services.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use portal_core::common::SelectedFile;
use portal_core::domains::onboarding::{
    messages, CommitError, PendingUploads, PreconditionError, ReviewsOutcome, Step, UploadSlot,
};
use portal_core::kernel::test_dependencies::{
    MockObjectStorage, MockProviderStore, MockReviewImporter, MockSignupNotifier,
    MockUploadSigner, SaveImagesBehavior,
};
use portal_core::kernel::{ProviderRecord, TestDependencies};
use tokio::sync::Notify;

#[tokio::test]
async fn happy_path_reports_reviews_and_completes() {
    let deps = TestDependencies::new()
        .mock_provider_store(MockProviderStore::new().with_record(provider_record()))
        .mock_importer(MockReviewImporter::new().with_import(12, None));
    let harness = TestHarness::new(deps);
    let mut session = harness.session_for("p123");
    let mut uploads = complete_uploads();

    let outcome = harness
        .workflow
        .run(&mut session, &mut uploads)
        .await
        .expect("commit succeeds");

    assert_eq!(outcome.next_step, Step::Completion);
    assert!(outcome.message.contains("12"));
    assert_eq!(uploads.missing_slots(), UploadSlot::ALL.to_vec());
    assert_eq!(
        outcome.message,
        "Files uploaded successfully! 12 reviews were processed."
    );
    assert!(outcome.session_cleared);
    assert_eq!(harness.stored_provider_id(), None);
    assert!(session.provider_id().is_none());

    let saves = harness.deps.provider_store.save_calls();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].0.as_str(), "p123");
    assert_eq!(saves[0].1.headshot_url, "uploads/headshot.jpg");
    assert_eq!(saves[0].1.gallery_url, "uploads/gallery.png");

    outcome.notification.await.expect("notification task");
    let sent = harness.deps.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].id, "p123");
    assert_eq!(sent[0].name, "Dr. Ada Lovelace");
    assert!(harness.deps.side_effects.is_empty());
}

#[tokio::test]
async fn uploads_sign_and_transfer_each_image_once() {
    let harness = TestHarness::new(TestDependencies::new());
    let mut session = harness.session_for("p123");

    harness
        .workflow
        .run(&mut session, &mut complete_uploads())
        .await
        .expect("commit succeeds");

    let mut signed = harness.deps.upload_signer.calls();
    signed.sort();
    assert_eq!(
        signed,
        vec![
            ("gallery.png".to_string(), "image/png".to_string()),
            ("headshot.jpg".to_string(), "image/jpeg".to_string()),
        ]
    );

    let puts = harness.deps.storage.calls();
    assert_eq!(puts.len(), 2);
    let headshot_put = puts
        .iter()
        .find(|p| p.key == "uploads/headshot.jpg")
        .expect("headshot transferred");
    assert_eq!(headshot_put.presigned_url, "https://storage.test/put/headshot.jpg");
    assert_eq!(headshot_put.content_type, "image/jpeg");
    assert_eq!(headshot_put.size, headshot_jpeg().len());

    // The reviews spreadsheet never goes through presigned storage
    assert_eq!(harness.deps.review_importer.calls().len(), 1);
    assert_eq!(harness.deps.review_importer.calls()[0].1, "reviews.xlsx");
}

#[tokio::test]
async fn image_uploads_run_concurrently() {
    let deps = TestDependencies::new()
        .mock_storage(MockObjectStorage::new().with_delay(Duration::from_millis(50)));
    let harness = TestHarness::new(deps);
    let mut session = harness.session_for("p123");

    harness
        .workflow
        .run(&mut session, &mut complete_uploads())
        .await
        .expect("commit succeeds");

    assert_eq!(harness.deps.storage.max_concurrent(), 2);
}

#[tokio::test]
async fn missing_session_redirects_without_network_calls() {
    let harness = TestHarness::new(TestDependencies::new());
    let mut session = harness.empty_session();

    let err = harness
        .workflow
        .run(&mut session, &mut complete_uploads())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CommitError::Precondition(PreconditionError::MissingSession)
    ));
    assert!(err.is_precondition());
    assert_eq!(err.redirect(), Some(Step::Entry));
    assert_eq!(
        messages::commit_error(&err),
        "Provider ID not found. Please start from the beginning."
    );
    assert_eq!(harness.deps.network_calls(), 0);
}

#[tokio::test]
async fn each_missing_slot_blocks_commit_without_network_calls() {
    for missing in UploadSlot::ALL {
        let harness = TestHarness::new(TestDependencies::new());
        let mut session = harness.session_for("p123");
        let mut uploads = complete_uploads();
        uploads.clear(missing);

        let err = harness
            .workflow
            .run(&mut session, &mut uploads)
            .await
            .unwrap_err();

        match &err {
            CommitError::Precondition(PreconditionError::MissingFiles(slots)) => {
                assert_eq!(slots, &vec![missing]);
            }
            other => panic!("expected missing files, got {other:?}"),
        }
        assert_eq!(err.redirect(), None);
        assert_eq!(
            messages::commit_error(&err),
            "Please upload all required files before continuing."
        );
        assert_eq!(harness.deps.network_calls(), 0);
        assert_eq!(harness.stored_provider_id().as_deref(), Some("p123"));
    }
}

#[tokio::test]
async fn gallery_upload_failure_aborts_before_record_update() {
    let deps = TestDependencies::new()
        .mock_storage(MockObjectStorage::new().failing_for_key("uploads/gallery.png"));
    let harness = TestHarness::new(deps);
    let mut session = harness.session_for("p123");
    let mut uploads = complete_uploads();

    let err = harness
        .workflow
        .run(&mut session, &mut uploads)
        .await
        .unwrap_err();

    // Selection survives for a retry
    assert!(uploads.missing_slots().is_empty());

    match &err {
        CommitError::Upload { slot, .. } => assert_eq!(*slot, UploadSlot::Gallery),
        other => panic!("expected upload failure, got {other:?}"),
    }
    assert!(!err.is_precondition());
    assert_eq!(err.redirect(), None);

    let message = messages::commit_error(&err);
    assert!(message.starts_with("Upload failed: "));
    assert!(message.contains("uploads/gallery.png"));
    assert!(message.ends_with("Please try again."));

    assert!(harness.deps.provider_store.save_calls().is_empty());
    assert!(harness.deps.review_importer.calls().is_empty());
    assert!(harness.deps.notifier.sent().is_empty());
    assert_eq!(harness.stored_provider_id().as_deref(), Some("p123"));
    assert_eq!(
        session.provider_id().map(|id| id.as_str()),
        Some("p123")
    );
}

#[tokio::test]
async fn signing_failure_is_an_upload_failure() {
    let deps = TestDependencies::new()
        .mock_signer(MockUploadSigner::new().failing_for("headshot.jpg"));
    let harness = TestHarness::new(deps);
    let mut session = harness.session_for("p123");

    let err = harness
        .workflow
        .run(&mut session, &mut complete_uploads())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CommitError::Upload {
            slot: UploadSlot::Headshot,
            ..
        }
    ));
    assert!(harness.deps.provider_store.save_calls().is_empty());
}

#[tokio::test]
async fn response_without_provider_is_fatal() {
    let deps = TestDependencies::new().mock_provider_store(
        MockProviderStore::new().with_behavior(SaveImagesBehavior::NoProvider),
    );
    let harness = TestHarness::new(deps);
    let mut session = harness.session_for("p123");

    let err = harness
        .workflow
        .run(&mut session, &mut complete_uploads())
        .await
        .unwrap_err();

    assert!(matches!(err, CommitError::MissingProvider));
    assert!(harness.deps.review_importer.calls().is_empty());
    assert!(harness.deps.notifier.sent().is_empty());
    assert_eq!(harness.stored_provider_id().as_deref(), Some("p123"));
}

#[tokio::test]
async fn record_missing_image_urls_is_fatal() {
    let cases = [
        ProviderRecord {
            headshot_url: None,
            gallery_url: Some("uploads/gallery.png".into()),
            ..provider_record()
        },
        ProviderRecord {
            headshot_url: Some("uploads/headshot.jpg".into()),
            gallery_url: Some(String::new()),
            ..provider_record()
        },
        provider_record(),
    ];

    for record in cases {
        let deps = TestDependencies::new().mock_provider_store(
            MockProviderStore::new().with_behavior(SaveImagesBehavior::Fixed(record)),
        );
        let harness = TestHarness::new(deps);
        let mut session = harness.session_for("p123");

        let err = harness
            .workflow
            .run(&mut session, &mut complete_uploads())
            .await
            .unwrap_err();

        assert!(matches!(err, CommitError::ImagesNotSaved));
        assert_eq!(
            messages::commit_error(&err),
            "Upload failed: Images were not properly saved to provider record. Please try again."
        );
        assert!(harness.deps.review_importer.calls().is_empty());
        assert!(harness.deps.notifier.sent().is_empty());
        assert_eq!(harness.stored_provider_id().as_deref(), Some("p123"));
    }
}

#[tokio::test]
async fn record_store_error_is_fatal() {
    let deps = TestDependencies::new().mock_provider_store(
        MockProviderStore::new().with_behavior(SaveImagesBehavior::Fail("503 from backend".into())),
    );
    let harness = TestHarness::new(deps);
    let mut session = harness.session_for("p123");

    let err = harness
        .workflow
        .run(&mut session, &mut complete_uploads())
        .await
        .unwrap_err();

    assert!(matches!(err, CommitError::Persist(_)));
    assert!(messages::commit_error(&err).contains("503 from backend"));
    assert!(harness.deps.review_importer.calls().is_empty());
}

#[tokio::test]
async fn import_failure_still_completes_with_partial_success_message() {
    let deps = TestDependencies::new()
        .mock_importer(MockReviewImporter::new().failing("Missing column: Rating"));
    let harness = TestHarness::new(deps);
    let mut session = harness.session_for("p123");

    let outcome = harness
        .workflow
        .run(&mut session, &mut complete_uploads())
        .await
        .expect("commit succeeds despite import failure");

    assert_eq!(
        outcome.reviews,
        ReviewsOutcome::Failed {
            error: "Missing column: Rating".into()
        }
    );
    assert!(outcome.message.starts_with("Images uploaded successfully"));
    assert!(outcome.message.contains("Missing column: Rating"));
    assert_eq!(outcome.next_step, Step::Completion);
    assert_eq!(harness.stored_provider_id(), None);

    // Notification still goes out
    outcome.notification.await.expect("notification task");
    assert_eq!(harness.deps.notifier.sent().len(), 1);
}

#[tokio::test]
async fn import_warning_is_appended_to_confirmation() {
    let deps = TestDependencies::new().mock_importer(
        MockReviewImporter::new().with_import(9, Some("3 rows had no rating and were skipped.")),
    );
    let harness = TestHarness::new(deps);
    let mut session = harness.session_for("p123");

    let outcome = harness
        .workflow
        .run(&mut session, &mut complete_uploads())
        .await
        .expect("commit succeeds");

    assert_eq!(
        outcome.message,
        "Files uploaded successfully! 9 reviews were processed. 3 rows had no rating and were skipped."
    );
}

#[tokio::test]
async fn notification_failure_is_recorded_not_reported() {
    let deps = TestDependencies::new().mock_notifier(MockSignupNotifier::new().failing());
    let harness = TestHarness::new(deps);
    let mut session = harness.session_for("p123");

    let outcome = harness
        .workflow
        .run(&mut session, &mut complete_uploads())
        .await
        .expect("commit succeeds despite notification failure");

    assert_eq!(outcome.next_step, Step::Completion);
    assert!(!outcome.message.to_lowercase().contains("notification"));
    assert!(!outcome.message.to_lowercase().contains("email"));
    assert_eq!(harness.stored_provider_id(), None);

    outcome.notification.await.expect("notification task");
    let failures = harness.deps.side_effects.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].effect, "signup_notification");
    assert_eq!(failures[0].subject, "p123");
    assert!(failures[0].error.contains("Mock notification service unavailable"));
}

#[tokio::test]
async fn workflow_does_not_wait_for_notification() {
    let gate = Arc::new(Notify::new());
    let deps =
        TestDependencies::new().mock_notifier(MockSignupNotifier::new().gated(gate.clone()));
    let harness = TestHarness::new(deps);
    let mut session = harness.session_for("p123");

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        harness.workflow.run(&mut session, &mut complete_uploads()),
    )
    .await
    .expect("workflow returns while notification is blocked")
    .expect("commit succeeds");

    assert!(harness.deps.notifier.sent().is_empty());
    assert_eq!(outcome.next_step, Step::Completion);

    gate.notify_one();
    outcome.notification.await.expect("notification task");
    assert_eq!(harness.deps.notifier.sent().len(), 1);
}

#[tokio::test]
async fn notification_payload_uses_placeholders_for_sparse_record() {
    // Record store returns only the image fields
    let harness = TestHarness::new(TestDependencies::new());
    let mut session = harness.session_for("p123");

    let outcome = harness
        .workflow
        .run(&mut session, &mut complete_uploads())
        .await
        .expect("commit succeeds");
    outcome.notification.await.expect("notification task");

    let payload = harness.deps.notifier.sent().remove(0);
    assert_eq!(payload.name, "Name not available");
    assert_eq!(payload.email, "Email not available");
    assert_eq!(payload.practice_name, "Practice name not available");
    assert_eq!(payload.phone, "Phone not provided");
    assert_eq!(payload.address, "Address not provided");
    assert_eq!(payload.npi_number, "NPI not provided");
    assert!(payload.specialties.is_empty());
}

#[tokio::test]
async fn concurrent_submission_is_refused() {
    let deps = TestDependencies::new()
        .mock_storage(MockObjectStorage::new().with_delay(Duration::from_millis(100)));
    let harness = TestHarness::new(deps);
    let mut first_session = harness.session_for("p123");
    let mut second_session = harness.session_for("p123");
    let mut first_uploads = complete_uploads();
    let mut second_uploads = complete_uploads();

    let (first, second) = tokio::join!(
        harness.workflow.run(&mut first_session, &mut first_uploads),
        async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            assert!(harness.workflow.is_in_flight());
            harness
                .workflow
                .run(&mut second_session, &mut second_uploads)
                .await
        }
    );

    assert!(first.is_ok());
    let err = second.unwrap_err();
    assert!(matches!(err, CommitError::AlreadyInFlight));
    assert!(err.is_precondition());
    assert_eq!(harness.deps.provider_store.save_calls().len(), 1);
    assert!(!harness.workflow.is_in_flight());

    // The refused submission keeps its selection
    assert!(second_uploads.ready().is_ok());
}

#[tokio::test]
async fn workflow_can_be_retried_after_commit_failure() {
    let deps = TestDependencies::new()
        .mock_storage(MockObjectStorage::new().failing_for_key("uploads/gallery.png"));
    let harness = TestHarness::new(deps);
    let mut session = harness.session_for("p123");

    assert!(harness
        .workflow
        .run(&mut session, &mut complete_uploads())
        .await
        .is_err());
    assert!(!harness.workflow.is_in_flight());

    // Same gallery key still fails; a differently named gallery goes through
    let mut uploads = complete_uploads();
    uploads
        .select(
            UploadSlot::Gallery,
            Some(SelectedFile::new("gallery-2.png", "image/png", b"png".to_vec())),
        )
        .expect("gallery accepted");

    let outcome = harness
        .workflow
        .run(&mut session, &mut uploads)
        .await
        .expect("retry succeeds");
    assert_eq!(outcome.provider.gallery_url.as_deref(), Some("uploads/gallery-2.png"));
}

#[test]
fn csv_reviews_file_is_rejected_at_selection() {
    let mut uploads = PendingUploads::new();

    let rejection = uploads
        .select(
            UploadSlot::Reviews,
            Some(SelectedFile::new("reviews.csv", "text/csv", b"a,b".to_vec())),
        )
        .unwrap_err();

    assert_eq!(rejection.slot, UploadSlot::Reviews);
    assert_eq!(
        messages::selection_rejected(&rejection),
        "Only .xls/.xlsx files are allowed for Client Reviews."
    );
    assert!(uploads.get(UploadSlot::Reviews).is_none());
}
