#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Scorekeeping engine for Wiezen, the Belgian four-player trick-taking game.
//!
//! Given a contract, the attacking side and the tricks they took, the engine
//! computes every player's point delta and keeps the running session:
//! scores, dealer rotation, the double-stakes flag after a passed round, and
//! the round log, persisted as a flat JSON snapshot.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod repos;
pub mod services;
pub mod telemetry;


// Re-exports for public API
pub use adapters::FileSnapshotStore;
pub use config::AppConfig;
pub use domain::{ContractKind, GameState, Phase, Player, PlayerId, Round};
pub use errors::{DomainError, ErrorCode, ValidationKind};
pub use repos::{MemorySnapshotStore, SnapshotStore, StoreError};
pub use services::{AssistantDesk, GameFlow, RoundSubmission};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
