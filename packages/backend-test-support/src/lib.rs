//! Backend test support utilities
//!
//! Shared helpers for the scoring backend's unit and integration tests:
//! unified logging initialization and unique identifiers for fixtures.

pub mod logging;
pub mod unique_helpers;
