//! Command surface for a presentation layer.
//!
//! `GameFlow` owns the authoritative `GameState` and a snapshot store. Every
//! accepted command mutates the state first and then writes the snapshot
//! through; a failed write is logged and never rolls the state back. A
//! rejected command leaves both state and store untouched.
//!
//! One `GameFlow` serves one logical actor. Callers sharing it across
//! threads must wrap it in a mutex: every command is a read-modify-write of
//! the whole aggregate.

use tracing::{debug, info, warn};

use crate::domain::contracts::ContractKind;
use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::domain::scoring::score_round;
use crate::domain::snapshot::{self, SNAPSHOT_KEY};
use crate::domain::state::{GameState, PendingRound, Phase, PlayerId, Round};
use crate::errors::domain::DomainError;
use crate::repos::snapshots::SnapshotStore;

/// What the caller entered for a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSubmission {
    pub contract: ContractKind,
    pub active_player_ids: Vec<PlayerId>,
    pub tricks_won: u8,
    /// "Everyone passed" toggle; overrides the other fields.
    pub is_pass_round: bool,
}

impl RoundSubmission {
    pub fn played(contract: ContractKind, active_player_ids: Vec<PlayerId>, tricks_won: u8) -> Self {
        Self {
            contract,
            active_player_ids,
            tricks_won,
            is_pass_round: false,
        }
    }

    pub fn pass() -> Self {
        Self {
            contract: ContractKind::AllPassed,
            active_player_ids: Vec::new(),
            tricks_won: 0,
            is_pass_round: true,
        }
    }

    fn is_pass(&self) -> bool {
        self.is_pass_round || self.contract.is_pass()
    }
}

pub struct GameFlow<S> {
    state: GameState,
    store: S,
    key: String,
}

impl<S: SnapshotStore> GameFlow<S> {
    /// Load the session stored under the default key.
    pub fn restore(store: S) -> Self {
        Self::restore_with_key(store, SNAPSHOT_KEY)
    }

    /// Load the session stored under `key`, falling back to a fresh game
    /// when nothing is stored or the document cannot be used.
    pub fn restore_with_key(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = match store.read(&key) {
            Ok(None) => {
                debug!(key = %key, "no saved game; starting fresh");
                GameState::new()
            }
            Ok(Some(doc)) => match snapshot::from_document(&doc) {
                Ok(state) => {
                    info!(
                        key = %key,
                        phase = %state.phase(),
                        rounds = state.rounds().len(),
                        "restored saved game"
                    );
                    state
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "saved game unusable; starting fresh");
                    GameState::new()
                }
            },
            Err(e) => {
                warn!(key = %key, error = %e, "could not read saved game; starting fresh");
                GameState::new()
            }
        };
        Self { state, store, key }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn start_game<N: AsRef<str>>(&mut self, names: &[N]) -> Result<(), DomainError> {
        self.apply("start_game", |state| state.start(names))
    }

    /// Score a round with the current double flag and commit it.
    pub fn submit_round(&mut self, submission: RoundSubmission) -> Result<Round, DomainError> {
        self.apply("submit_round", |state| {
            state.require_phase(Phase::InProgress)?;

            let seating = state.seating();
            let scored = if submission.is_pass() {
                score_round(ContractKind::AllPassed, &[], &seating, 0, false)?
            } else {
                score_round(
                    submission.contract,
                    &submission.active_player_ids,
                    &seating,
                    submission.tricks_won,
                    state.next_round_doubled(),
                )?
            };

            let round = state.commit_round(PendingRound::from_scored(seating, scored))?;
            Ok(round.clone())
        })
    }

    pub fn finish_game(&mut self) -> Result<(), DomainError> {
        self.apply("finish_game", GameState::finish)
    }

    pub fn reopen_game(&mut self) -> Result<(), DomainError> {
        self.apply("reopen_game", GameState::unfinish)
    }

    /// Throw the game away, including its saved snapshot.
    pub fn reset_game(&mut self) {
        let before = GameLifecycleView::of(&self.state);
        self.state.reset();
        self.log_transitions(&before);

        if let Err(e) = self.store.remove(&self.key) {
            warn!(key = %self.key, error = %e, "failed to clear saved game");
        }
    }

    fn apply<T>(
        &mut self,
        command: &'static str,
        f: impl FnOnce(&mut GameState) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let before = GameLifecycleView::of(&self.state);
        match f(&mut self.state) {
            Ok(out) => {
                self.log_transitions(&before);
                self.persist();
                Ok(out)
            }
            Err(e) => {
                warn!(command, code = %e.code(), error = %e, "command rejected");
                Err(e)
            }
        }
    }

    fn log_transitions(&self, before: &GameLifecycleView) {
        let after = GameLifecycleView::of(&self.state);
        for transition in derive_game_transitions(before, &after) {
            match transition {
                GameTransition::GameStarted => {
                    let names: Vec<&str> =
                        self.state.players().iter().map(|p| p.name.as_str()).collect();
                    info!(players = ?names, "game started");
                }
                GameTransition::RoundCommitted {
                    round_number,
                    contract,
                } => {
                    let is_doubled = self.state.rounds().last().is_some_and(|r| r.is_doubled);
                    info!(
                        round_number,
                        contract = contract.token(),
                        is_doubled,
                        "round committed"
                    );
                }
                GameTransition::DealerBecame { seat } => {
                    debug!(seat, "dealer moved");
                }
                GameTransition::DoubleArmed => info!("everyone passed; next round counts double"),
                GameTransition::GameFinished => info!("game finished"),
                GameTransition::GameReopened => info!("game reopened"),
                GameTransition::GameReset => info!("game reset"),
            }
        }
    }

    /// Write-through: best effort, never blocks or undoes the mutation.
    fn persist(&mut self) {
        let doc = match snapshot::to_document(&self.state) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "failed to serialize game snapshot");
                return;
            }
        };
        if let Err(e) = self.store.write(&self.key, &doc) {
            warn!(key = %self.key, error = %e, "failed to save game snapshot");
        }
    }
}
