//! Onboarding activities - one external interaction each.

pub mod import_reviews;
pub mod notify_signup;
pub mod save_image_refs;
pub mod upload_assets;

pub use import_reviews::import_reviews;
pub use notify_signup::spawn_signup_notification;
pub use save_image_refs::save_image_references;
pub use upload_assets::{upload_file, upload_images, UploadedImages};
