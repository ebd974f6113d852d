//! Support code for the replay binary.

pub mod session_script;

pub use session_script::{replay, ReplayReport, SessionScript};
