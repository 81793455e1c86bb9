// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into PortalDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use super::{
    BaseObjectStorage, BaseProviderStore, BaseReviewImporter, BaseSignupNotifier,
    BaseUploadSigner, ImageUrls, PortalDeps, ProviderRecord, ProviderSignupNotification,
    ReviewImport, SideEffectLog, UploadSignature,
};
use crate::common::{ProviderId, SelectedFile};

// =============================================================================
// Mock Upload Signer
// =============================================================================

pub struct MockUploadSigner {
    calls: Arc<Mutex<Vec<(String, String)>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl MockUploadSigner {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Fail signing requests for this filename
    pub fn failing_for(self, filename: &str) -> Self {
        self.failing.lock().unwrap().insert(filename.to_string());
        self
    }

    /// Get all (filename, content_type) pairs that were signed
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockUploadSigner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseUploadSigner for MockUploadSigner {
    async fn sign(&self, filename: &str, content_type: &str) -> Result<UploadSignature> {
        self.calls
            .lock()
            .unwrap()
            .push((filename.to_string(), content_type.to_string()));

        if self.failing.lock().unwrap().contains(filename) {
            anyhow::bail!("Mock signing failure for {}", filename);
        }

        Ok(UploadSignature {
            presigned_url: format!("https://storage.test/put/{}", filename),
            key: format!("uploads/{}", filename),
        })
    }
}

// =============================================================================
// Mock Object Storage
// =============================================================================

/// Arguments captured from a storage put
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutCall {
    pub key: String,
    pub presigned_url: String,
    pub size: usize,
    pub content_type: String,
}

pub struct MockObjectStorage {
    calls: Arc<Mutex<Vec<PutCall>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    delay: Option<Duration>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockObjectStorage {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(HashSet::new())),
            delay: None,
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Reject puts to this storage key
    pub fn failing_for_key(self, key: &str) -> Self {
        self.failing.lock().unwrap().insert(key.to_string());
        self
    }

    /// Hold each put open for `delay` so overlapping transfers are observable
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<PutCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Highest number of puts that were running at the same time
    pub fn max_concurrent(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for MockObjectStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseObjectStorage for MockObjectStorage {
    async fn put(
        &self,
        signature: &UploadSignature,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<()> {
        self.calls.lock().unwrap().push(PutCall {
            key: signature.key.clone(),
            presigned_url: signature.presigned_url.clone(),
            size: bytes.len(),
            content_type: content_type.to_string(),
        });

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.lock().unwrap().contains(&signature.key) {
            anyhow::bail!("Mock storage rejected {}", signature.key);
        }
        Ok(())
    }
}

// =============================================================================
// Mock Provider Store
// =============================================================================

/// How the mock store answers `save_image_urls`
#[derive(Debug, Clone)]
pub enum SaveImagesBehavior {
    /// Return `base` with the submitted keys applied
    Echo,
    /// Succeed without a provider payload
    NoProvider,
    /// Return this record verbatim
    Fixed(ProviderRecord),
    /// Fail with this message
    Fail(String),
}

pub struct MockProviderStore {
    base: ProviderRecord,
    behavior: SaveImagesBehavior,
    save_calls: Arc<Mutex<Vec<(ProviderId, ImageUrls)>>>,
    get_calls: Arc<Mutex<Vec<ProviderId>>>,
}

impl MockProviderStore {
    pub fn new() -> Self {
        Self {
            base: ProviderRecord::default(),
            behavior: SaveImagesBehavior::Echo,
            save_calls: Arc::new(Mutex::new(Vec::new())),
            get_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Record the store starts from
    pub fn with_record(mut self, record: ProviderRecord) -> Self {
        self.base = record;
        self
    }

    pub fn with_behavior(mut self, behavior: SaveImagesBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn save_calls(&self) -> Vec<(ProviderId, ImageUrls)> {
        self.save_calls.lock().unwrap().clone()
    }

    pub fn get_calls(&self) -> Vec<ProviderId> {
        self.get_calls.lock().unwrap().clone()
    }
}

impl Default for MockProviderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseProviderStore for MockProviderStore {
    async fn save_image_urls(
        &self,
        provider_id: &ProviderId,
        urls: &ImageUrls,
    ) -> Result<Option<ProviderRecord>> {
        self.save_calls
            .lock()
            .unwrap()
            .push((provider_id.clone(), urls.clone()));

        match &self.behavior {
            SaveImagesBehavior::Echo => Ok(Some(ProviderRecord {
                id: Some(provider_id.to_string()),
                headshot_url: Some(urls.headshot_url.clone()),
                gallery_url: Some(urls.gallery_url.clone()),
                ..self.base.clone()
            })),
            SaveImagesBehavior::NoProvider => Ok(None),
            SaveImagesBehavior::Fixed(record) => Ok(Some(record.clone())),
            SaveImagesBehavior::Fail(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }

    async fn get_provider(&self, provider_id: &ProviderId) -> Result<ProviderRecord> {
        self.get_calls.lock().unwrap().push(provider_id.clone());
        Ok(ProviderRecord {
            id: Some(provider_id.to_string()),
            ..self.base.clone()
        })
    }
}

// =============================================================================
// Mock Review Importer
// =============================================================================

pub struct MockReviewImporter {
    result: std::result::Result<ReviewImport, String>,
    calls: Arc<Mutex<Vec<(ProviderId, String)>>>,
}

impl MockReviewImporter {
    pub fn new() -> Self {
        Self {
            result: Ok(ReviewImport {
                reviews_added: 0,
                warning: None,
            }),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_import(mut self, reviews_added: u32, warning: Option<&str>) -> Self {
        self.result = Ok(ReviewImport {
            reviews_added,
            warning: warning.map(str::to_string),
        });
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.result = Err(message.to_string());
        self
    }

    /// Get all (provider, file name) imports attempted
    pub fn calls(&self) -> Vec<(ProviderId, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockReviewImporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseReviewImporter for MockReviewImporter {
    async fn import_reviews(
        &self,
        provider_id: &ProviderId,
        file: &SelectedFile,
    ) -> Result<ReviewImport> {
        self.calls
            .lock()
            .unwrap()
            .push((provider_id.clone(), file.file_name.clone()));

        self.result.clone().map_err(|message| anyhow::anyhow!(message))
    }
}

// =============================================================================
// Mock Signup Notifier
// =============================================================================

pub struct MockSignupNotifier {
    fail: bool,
    gate: Option<Arc<Notify>>,
    sent: Arc<Mutex<Vec<ProviderSignupNotification>>>,
}

impl MockSignupNotifier {
    pub fn new() -> Self {
        Self {
            fail: false,
            gate: None,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Block every send until `gate` is notified
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Payloads that reached the notifier, whether or not the send failed
    pub fn sent(&self) -> Vec<ProviderSignupNotification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockSignupNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSignupNotifier for MockSignupNotifier {
    async fn send_signup(
        &self,
        payload: &ProviderSignupNotification,
    ) -> Result<serde_json::Value> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.sent.lock().unwrap().push(payload.clone());

        if self.fail {
            anyhow::bail!("Mock notification service unavailable");
        }
        Ok(serde_json::json!({ "success": true }))
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub upload_signer: Arc<MockUploadSigner>,
    pub storage: Arc<MockObjectStorage>,
    pub provider_store: Arc<MockProviderStore>,
    pub review_importer: Arc<MockReviewImporter>,
    pub notifier: Arc<MockSignupNotifier>,
    pub side_effects: SideEffectLog,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            upload_signer: Arc::new(MockUploadSigner::new()),
            storage: Arc::new(MockObjectStorage::new()),
            provider_store: Arc::new(MockProviderStore::new()),
            review_importer: Arc::new(MockReviewImporter::new()),
            notifier: Arc::new(MockSignupNotifier::new()),
            side_effects: SideEffectLog::new(),
        }
    }

    /// Set a mock upload signer
    pub fn mock_signer(mut self, signer: MockUploadSigner) -> Self {
        self.upload_signer = Arc::new(signer);
        self
    }

    /// Set a mock object storage
    pub fn mock_storage(mut self, storage: MockObjectStorage) -> Self {
        self.storage = Arc::new(storage);
        self
    }

    /// Set a mock provider store
    pub fn mock_provider_store(mut self, store: MockProviderStore) -> Self {
        self.provider_store = Arc::new(store);
        self
    }

    /// Set a mock review importer
    pub fn mock_importer(mut self, importer: MockReviewImporter) -> Self {
        self.review_importer = Arc::new(importer);
        self
    }

    /// Set a mock signup notifier
    pub fn mock_notifier(mut self, notifier: MockSignupNotifier) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Number of calls made to any external service
    pub fn network_calls(&self) -> usize {
        self.upload_signer.calls().len()
            + self.storage.calls().len()
            + self.provider_store.save_calls().len()
            + self.provider_store.get_calls().len()
            + self.review_importer.calls().len()
            + self.notifier.sent().len()
    }

    /// Build PortalDeps sharing these mocks, so calls stay observable here
    pub fn portal_deps(&self) -> PortalDeps {
        PortalDeps::new(
            self.upload_signer.clone(),
            self.storage.clone(),
            self.provider_store.clone(),
            self.review_importer.clone(),
            self.notifier.clone(),
            self.side_effects.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
