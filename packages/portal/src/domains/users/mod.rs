//! Portal user accounts (client-side document view)

pub mod models;

pub use models::{User, UserRole, UserValidationError};
