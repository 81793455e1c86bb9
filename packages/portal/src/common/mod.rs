// Common types shared across the application

pub mod entity_ids;
pub mod types;

pub use entity_ids::*;
pub use types::*;
