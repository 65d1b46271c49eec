// apps/scorekeeper/src/domain/game_transition.rs

use crate::domain::contracts::ContractKind;
use crate::domain::state::{GameState, Phase};

/// The parts of a game that lifecycle events are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub phase: Phase,
    pub rounds: usize,
    pub dealer_index: usize,
    pub next_round_doubled: bool,
    pub last_contract: Option<ContractKind>,
}

impl GameLifecycleView {
    pub fn of(state: &GameState) -> Self {
        Self {
            phase: state.phase(),
            rounds: state.rounds().len(),
            dealer_index: state.dealer_index(),
            next_round_doubled: state.next_round_doubled(),
            last_contract: state.rounds().last().map(|r| r.contract),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: NotStarted -> InProgress
    GameStarted,

    /// Edge-triggered: the round log grew by one.
    RoundCommitted {
        round_number: usize,
        contract: ContractKind,
    },

    /// Edge-triggered: the deal moved to another seat.
    DealerBecame { seat: usize },

    /// Edge-triggered: the next round is now played for double.
    DoubleArmed,

    /// Edge-triggered: InProgress -> Finished
    GameFinished,

    /// Edge-triggered: Finished -> InProgress
    GameReopened,

    /// Edge-triggered: any started phase -> NotStarted
    GameReset,
}

/// Derive lifecycle transitions from before/after views.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    // 1. Phase edges
    match (before.phase, after.phase) {
        (Phase::NotStarted, Phase::InProgress) => transitions.push(GameTransition::GameStarted),
        (Phase::InProgress, Phase::Finished) => transitions.push(GameTransition::GameFinished),
        (Phase::Finished, Phase::InProgress) => transitions.push(GameTransition::GameReopened),
        (Phase::InProgress | Phase::Finished, Phase::NotStarted) => {
            transitions.push(GameTransition::GameReset);
            // A reset also zeroes rounds and dealer; those are not separate events.
            return transitions;
        }
        _ => {}
    }

    // 2. Round log growth
    if after.rounds == before.rounds + 1 {
        if let Some(contract) = after.last_contract {
            transitions.push(GameTransition::RoundCommitted {
                round_number: after.rounds,
                contract,
            });
        }
    }

    // 3. Dealer change (ignored on start: the first dealer is seat 0 by definition)
    if before.phase != Phase::NotStarted && before.dealer_index != after.dealer_index {
        transitions.push(GameTransition::DealerBecame {
            seat: after.dealer_index,
        });
    }

    // 4. Double flag armed
    if !before.next_round_doubled && after.next_round_doubled {
        transitions.push(GameTransition::DoubleArmed);
    }

    transitions
}
