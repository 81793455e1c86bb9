// Provider Portal - onboarding core
//
// This crate drives the final provider-onboarding step: uploading profile
// assets, attaching them to the provider record, importing client reviews
// and notifying the operations team.
//
// Infrastructure lives behind traits in kernel/, domain logic in domains/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
