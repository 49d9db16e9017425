//! Backend test support utilities
//!
//! Unified logging initialization and assertions for the JSON error contract,
//! usable from both unit and integration tests without depending on backend types.

pub mod error_body;
pub mod test_logging;
