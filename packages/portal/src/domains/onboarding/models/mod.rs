pub mod session;
pub mod step;
pub mod upload;

pub use session::{OnboardingSession, PROVIDER_ID_KEY};
pub use step::Step;
pub use upload::{PendingUploads, ReadyUploads, UploadSlot};
