//! Scorekeeper test support utilities
//!
//! Shared by the integration tests: unified logging initialization and the
//! seating fixtures most scenarios start from.

pub mod fixtures;
pub mod logging;
