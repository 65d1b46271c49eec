//! Session snapshot: the flat JSON document a game is persisted as.
//!
//! The document mirrors `GameState` field for field (`players`, `rounds`,
//! `dealerIndex`, `gameStarted`, `gameFinished`, `nextRoundDoubled`).
//! Restoring never panics; a bad document is reported and the caller
//! decides what to fall back to.

use thiserror::Error;

use crate::domain::state::GameState;

/// Fixed logical key the snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "wiezen_gamestate";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("inconsistent snapshot: {0}")]
    Inconsistent(String),
}

/// Serialize the full game state.
pub fn to_document(state: &GameState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(state)?)
}

/// Parse a document and vet it against the game invariants.
pub fn from_document(document: &str) -> Result<GameState, SnapshotError> {
    let state: GameState = serde_json::from_str(document)?;
    state
        .check_consistency()
        .map_err(SnapshotError::Inconsistent)?;
    Ok(state)
}
