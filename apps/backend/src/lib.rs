#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod bin_support;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;

// Re-exports for public API
pub use config::ScoringConfig;
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use infra::InMemoryStore;
pub use services::{MatchFlowService, MatchService, PlayerService, ScoringCommand, ScoringEngine};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
