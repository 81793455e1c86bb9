//! Kernel module - infrastructure traits, adapters and dependencies.

pub mod deps;
pub mod session_store;
pub mod side_effects;
pub mod test_dependencies;
pub mod traits;

pub use deps::{PortalApiAdapter, PortalDeps};
pub use session_store::{FileSessionStore, InMemorySessionStore};
pub use side_effects::{SideEffectFailure, SideEffectLog};
pub use test_dependencies::TestDependencies;
pub use traits::*;
