//! The game aggregate: seated players, the round log and the lifecycle flags.
//!
//! All mutation goes through the command methods below so that scores,
//! dealer rotation and the double flag never drift from the round log.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::domain::contracts::ContractKind;
use crate::domain::rules::{next_seat, PLAYERS};
use crate::domain::scoring::ScoredRound;
use crate::errors::domain::{DomainError, ValidationKind};

/// Opaque player token, unique within a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn generate() -> Self {
        Self(format!("p-{}", Ulid::new()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque round token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(String);

impl RoundId {
    pub fn generate() -> Self {
        Self(format!("r-{}", Ulid::new()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: i32,
}

/// A committed round. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: RoundId,
    /// 1-based, assigned at commit time.
    pub round_number: u32,
    pub contract: ContractKind,
    /// Seating order at the time of the round.
    #[serde(rename = "players")]
    pub all_players: Vec<PlayerId>,
    pub active_player_ids: BTreeSet<PlayerId>,
    pub defending_player_ids: BTreeSet<PlayerId>,
    pub tricks_won: u8,
    /// Absolute stake before distribution.
    pub points: u32,
    pub result: BTreeMap<PlayerId, i32>,
    /// Unix milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub is_doubled: bool,
}

impl Round {
    pub fn delta_for(&self, player: &PlayerId) -> i32 {
        self.result.get(player).copied().unwrap_or(0)
    }
}

/// A scored round waiting for its number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRound {
    pub id: RoundId,
    pub contract: ContractKind,
    pub all_players: Vec<PlayerId>,
    pub active_player_ids: BTreeSet<PlayerId>,
    pub defending_player_ids: BTreeSet<PlayerId>,
    pub tricks_won: u8,
    pub points: u32,
    pub result: BTreeMap<PlayerId, i32>,
    pub timestamp: i64,
    pub is_doubled: bool,
}

impl PendingRound {
    pub fn from_scored(all_players: Vec<PlayerId>, scored: ScoredRound) -> Self {
        Self {
            id: RoundId::generate(),
            contract: scored.contract,
            all_players,
            points: scored.points(),
            active_player_ids: scored.active_player_ids,
            defending_player_ids: scored.defending_player_ids,
            tricks_won: scored.tricks_won,
            result: scored.result,
            timestamp: now_millis(),
            is_doubled: scored.is_doubled,
        }
    }

    fn into_round(self, round_number: u32) -> Round {
        Round {
            id: self.id,
            round_number,
            contract: self.contract,
            all_players: self.all_players,
            active_player_ids: self.active_player_ids,
            defending_player_ids: self.defending_player_ids,
            tricks_won: self.tricks_won,
            points: self.points,
            result: self.result,
            timestamp: self.timestamp,
            is_doubled: self.is_doubled,
        }
    }
}

fn now_millis() -> i64 {
    let now = time::OffsetDateTime::now_utc();
    now.unix_timestamp()
        .saturating_mul(1000)
        .saturating_add(i64::from(now.millisecond()))
}

/// Lifecycle phase, derived from the `game_started` / `game_finished` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::NotStarted => "not started",
            Phase::InProgress => "in progress",
            Phase::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// Entire session state. Serializes to the flat snapshot document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    players: Vec<Player>,
    rounds: Vec<Round>,
    dealer_index: usize,
    game_started: bool,
    game_finished: bool,
    next_round_doubled: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match (self.game_started, self.game_finished) {
            (false, _) => Phase::NotStarted,
            (true, false) => Phase::InProgress,
            (true, true) => Phase::Finished,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn dealer_index(&self) -> usize {
        self.dealer_index
    }

    /// Player dealing the next round; `None` before the game starts.
    pub fn dealer(&self) -> Option<&Player> {
        self.players.get(self.dealer_index)
    }

    pub fn is_started(&self) -> bool {
        self.game_started
    }

    pub fn is_finished(&self) -> bool {
        self.game_finished
    }

    pub fn next_round_doubled(&self) -> bool {
        self.next_round_doubled
    }

    /// Player ids in seating order.
    pub fn seating(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn require_phase(&self, expected: Phase) -> Result<(), DomainError> {
        let actual = self.phase();
        if actual != expected {
            return Err(DomainError::phase_mismatch(expected, actual));
        }
        Ok(())
    }

    /// Seat four players and begin play.
    ///
    /// Names are trimmed; a blank name becomes `Speler N` for its 1-based seat.
    pub fn start<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), DomainError> {
        self.require_phase(Phase::NotStarted)?;
        if names.len() != PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::PlayerCount,
                format!("a game needs exactly {PLAYERS} players, got {}", names.len()),
            ));
        }

        let players = names
            .iter()
            .enumerate()
            .map(|(seat, name)| {
                let trimmed = name.as_ref().trim();
                let name = if trimmed.is_empty() {
                    format!("Speler {}", seat + 1)
                } else {
                    trimmed.to_string()
                };
                Player {
                    id: PlayerId::generate(),
                    name,
                    score: 0,
                }
            })
            .collect();

        *self = GameState {
            players,
            game_started: true,
            ..GameState::default()
        };
        Ok(())
    }

    /// Append a scored round: number it, fold its deltas into the scores,
    /// pass the deal to the next seat and arm or clear the double flag.
    pub fn commit_round(&mut self, pending: PendingRound) -> Result<&Round, DomainError> {
        self.require_phase(Phase::InProgress)?;

        let round_number = self.rounds.len() as u32 + 1;
        let round = pending.into_round(round_number);

        for player in &mut self.players {
            player.score += round.delta_for(&player.id);
        }
        self.dealer_index = next_seat(self.dealer_index);
        self.next_round_doubled = round.contract.is_pass();
        self.rounds.push(round);

        let committed = self.rounds.len() - 1;
        Ok(&self.rounds[committed])
    }

    /// Freeze the game. History is kept so the game can be reopened.
    pub fn finish(&mut self) -> Result<(), DomainError> {
        self.require_phase(Phase::InProgress)?;
        self.game_finished = true;
        Ok(())
    }

    /// Return a finished game to active play on the same history.
    pub fn unfinish(&mut self) -> Result<(), DomainError> {
        self.require_phase(Phase::Finished)?;
        self.game_finished = false;
        Ok(())
    }

    /// Discard everything. Valid from any phase.
    pub fn reset(&mut self) {
        *self = GameState::default();
    }

    /// Verify the aggregate invariants. Used to vet restored snapshots.
    pub fn check_consistency(&self) -> Result<(), String> {
        if !self.game_started {
            if !self.players.is_empty() || !self.rounds.is_empty() || self.game_finished {
                return Err("unstarted game must have no players, rounds or finish flag".into());
            }
        } else if self.players.len() != PLAYERS {
            return Err(format!(
                "started game must have {PLAYERS} players, found {}",
                self.players.len()
            ));
        }

        let ids: HashSet<&PlayerId> = self.players.iter().map(|p| &p.id).collect();
        if ids.len() != self.players.len() {
            return Err("player ids are not unique".into());
        }

        if self.dealer_index != self.rounds.len() % PLAYERS {
            return Err(format!(
                "dealer index {} does not match {} committed rounds",
                self.dealer_index,
                self.rounds.len()
            ));
        }

        let last_was_pass = self.rounds.last().is_some_and(|r| r.contract.is_pass());
        if self.next_round_doubled != last_was_pass {
            return Err("double flag does not match the last round".into());
        }

        for (idx, round) in self.rounds.iter().enumerate() {
            if round.round_number as usize != idx + 1 {
                return Err(format!(
                    "round at position {} is numbered {}",
                    idx + 1,
                    round.round_number
                ));
            }
            let sum = checked_total(round.result.values().copied()).ok_or_else(|| {
                format!("round {} deltas overflow", round.round_number)
            })?;
            if sum != 0 {
                return Err(format!(
                    "round {} is not zero-sum (sum {sum})",
                    round.round_number
                ));
            }
        }

        for player in &self.players {
            let expected = checked_total(self.rounds.iter().map(|r| r.delta_for(&player.id)))
                .ok_or_else(|| format!("round deltas of {} overflow", player.id))?;
            if player.score != expected {
                return Err(format!(
                    "score of {} is {} but rounds add up to {expected}",
                    player.id, player.score
                ));
            }
        }

        Ok(())
    }
}

/// Sum that refuses to wrap; restored documents are untrusted.
fn checked_total(values: impl IntoIterator<Item = i32>) -> Option<i32> {
    values
        .into_iter()
        .try_fold(0i32, |acc, value| acc.checked_add(value))
}
