//! Round scorer: turns a contract outcome into per-player point deltas.
//!
//! Pure computation. The only failure is a rejection of the submission
//! (wrong participants, impossible trick count); nothing here touches the
//! game state.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::domain::contracts::{Category, ContractDefinition, ContractKind};
use crate::domain::rules::{valid_trick_range, PLAYERS, TRICKS_PER_DEAL};
use crate::domain::state::PlayerId;
use crate::errors::domain::{DomainError, ValidationKind};

/// Outcome of scoring one round, ready to be turned into a `PendingRound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredRound {
    pub contract: ContractKind,
    /// Signed stake after doubling, before distribution.
    pub base_points: i32,
    pub active_player_ids: BTreeSet<PlayerId>,
    pub defending_player_ids: BTreeSet<PlayerId>,
    pub tricks_won: u8,
    /// Delta per seated player; always sums to zero.
    pub result: BTreeMap<PlayerId, i32>,
    /// Whether the stake was actually doubled. Never true for a pass round.
    pub is_doubled: bool,
}

impl ScoredRound {
    /// Absolute stake, as shown next to the round.
    pub fn points(&self) -> u32 {
        self.base_points.unsigned_abs()
    }
}

/// Score a round.
///
/// `all_players` is the seating order; `active` the attacking side. For
/// `ContractKind::AllPassed` both the active set and the trick count are
/// ignored and every player gets 0.
pub fn score_round(
    contract: ContractKind,
    active: &[PlayerId],
    all_players: &[PlayerId],
    tricks_won: u8,
    is_doubled: bool,
) -> Result<ScoredRound, DomainError> {
    if all_players.len() != PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::PlayerCount,
            format!(
                "scoring needs {PLAYERS} seated players, got {}",
                all_players.len()
            ),
        ));
    }

    let Some(def) = contract.definition() else {
        return Ok(pass_round(all_players));
    };

    if !valid_trick_range().contains(&tricks_won) {
        return Err(DomainError::validation(
            ValidationKind::TricksOutOfRange,
            format!("tricks won must be 0..={TRICKS_PER_DEAL}, got {tricks_won}"),
        ));
    }

    let active_ids: BTreeSet<PlayerId> = active.iter().cloned().collect();
    if let Some(stranger) = active_ids.iter().find(|id| !all_players.contains(id)) {
        return Err(DomainError::validation(
            ValidationKind::UnknownPlayer,
            format!("player {stranger} is not seated at this table"),
        ));
    }
    let required = def.category.active_players();
    if active_ids.len() != required {
        return Err(DomainError::validation(
            ValidationKind::ParticipantCount,
            format!(
                "{} needs exactly {required} active player(s), got {}",
                contract.label(),
                active_ids.len()
            ),
        ));
    }

    let mut base_points = base_points(def, tricks_won);
    if is_doubled {
        base_points *= 2;
    }

    let defending_ids: BTreeSet<PlayerId> = all_players
        .iter()
        .filter(|id| !active_ids.contains(*id))
        .cloned()
        .collect();

    let active_delta = match def.category {
        Category::Solo => base_points * 3,
        Category::Team => base_points,
    };
    let mut result = BTreeMap::new();
    for id in &active_ids {
        result.insert(id.clone(), active_delta);
    }
    for id in &defending_ids {
        result.insert(id.clone(), -base_points);
    }

    debug!(
        contract = contract.token(),
        tricks_won,
        is_doubled,
        base_points,
        "scored round"
    );

    Ok(ScoredRound {
        contract,
        base_points,
        active_player_ids: active_ids,
        defending_player_ids: defending_ids,
        tricks_won,
        result,
        is_doubled,
    })
}

fn pass_round(all_players: &[PlayerId]) -> ScoredRound {
    ScoredRound {
        contract: ContractKind::AllPassed,
        base_points: 0,
        active_player_ids: BTreeSet::new(),
        defending_player_ids: BTreeSet::new(),
        tricks_won: 0,
        result: all_players.iter().map(|id| (id.clone(), 0)).collect(),
        is_doubled: false,
    }
}

/// Signed stake for a contract outcome, before doubling.
pub fn base_points(def: &ContractDefinition, tricks_won: u8) -> i32 {
    let tricks = i32::from(tricks_won);
    let target = i32::from(def.target);
    let is_win = tricks >= target;

    match def.kind {
        ContractKind::Alone => {
            if is_win {
                2 + (tricks - 5)
            } else {
                -(2 + (5 - tricks))
            }
        }
        ContractKind::Normal => {
            let mut value = 2 + (tricks - 8).abs();
            if tricks_won == TRICKS_PER_DEAL {
                value *= 2;
            }
            if is_win {
                value
            } else {
                -value
            }
        }
        ContractKind::Troel => {
            if tricks_won == TRICKS_PER_DEAL {
                20
            } else if is_win {
                4 + (tricks - 8) * 2
            } else {
                -(4 + (8 - tricks) * 2)
            }
        }
        ContractKind::Abondance => {
            if is_win {
                match tricks_won {
                    9 => 4,
                    10 => 7,
                    11 => 8,
                    12 => 9,
                    _ => 9,
                }
            } else {
                -4
            }
        }
        ContractKind::Miserie => exact(tricks_won, 0, 7),
        ContractKind::MiserieOnTable => exact(tricks_won, 0, 14),
        ContractKind::Piccolo => exact(tricks_won, 1, 5),
        ContractKind::Solo => exact(tricks_won, TRICKS_PER_DEAL, 25),
        ContractKind::SoloSlim => exact(tricks_won, TRICKS_PER_DEAL, 30),
        ContractKind::AllPassed => 0,
    }
}

/// Fixed stake won on exactly `wanted` tricks and lost otherwise.
fn exact(tricks_won: u8, wanted: u8, stake: i32) -> i32 {
    if tricks_won == wanted {
        stake
    } else {
        -stake
    }
}
