//! Domain layer: pure scoring and game-state logic.

pub mod contracts;
pub mod game_transition;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod standings;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_state;

// Re-exports for ergonomics
pub use contracts::{catalog, Category, ContractDefinition, ContractKind};
pub use scoring::{score_round, ScoredRound};
pub use snapshot::{from_document, to_document, SnapshotError, SNAPSHOT_KEY};
pub use standings::{leader, standings, Standing};
pub use state::{GameState, PendingRound, Phase, Player, PlayerId, Round, RoundId};
