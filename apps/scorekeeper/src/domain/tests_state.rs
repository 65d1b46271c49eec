use std::collections::BTreeSet;

use crate::domain::contracts::ContractKind;
use crate::domain::state::{GameState, Phase};
use crate::domain::test_state_helpers::{play, seats, started_game};
use crate::errors::domain::{DomainError, ValidationKind};

#[test]
fn new_game_is_not_started() {
    let state = GameState::new();
    assert_eq!(state.phase(), Phase::NotStarted);
    assert!(state.players().is_empty());
    assert!(state.dealer().is_none());
    assert!(!state.next_round_doubled());
}

#[test]
fn start_seats_four_players_at_zero() {
    let state = started_game();
    assert_eq!(state.phase(), Phase::InProgress);
    assert_eq!(state.players().len(), 4);
    assert!(state.players().iter().all(|p| p.score == 0));
    assert_eq!(state.dealer_index(), 0);
    assert_eq!(state.dealer().unwrap().name, "Noord");
    assert!(state.rounds().is_empty());

    let ids: BTreeSet<_> = state.seating().into_iter().collect();
    assert_eq!(ids.len(), 4, "player ids must be unique");
}

#[test]
fn start_trims_and_fills_blank_names() {
    let mut state = GameState::new();
    state.start(&["  Anna ", "", "Bert", "   "]).unwrap();
    let names: Vec<&str> = state.players().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Anna", "Speler 2", "Bert", "Speler 4"]);
}

#[test]
fn start_requires_exactly_four_players() {
    let mut state = GameState::new();
    let err = state.start(&["a", "b", "c"]).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::PlayerCount));
    let err = state.start(&["a", "b", "c", "d", "e"]).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::PlayerCount));
    assert_eq!(state, GameState::new());
}

#[test]
fn start_twice_is_a_phase_mismatch() {
    let mut state = started_game();
    let err = state.start(&["a", "b", "c", "d"]).unwrap_err();
    assert!(matches!(
        err,
        DomainError::PhaseMismatch {
            expected: Phase::NotStarted,
            actual: Phase::InProgress
        }
    ));
}

#[test]
fn commit_numbers_rounds_and_folds_scores() {
    let mut state = started_game();

    let first = play(&mut state, ContractKind::Normal, &[0, 2], 10).unwrap();
    assert_eq!(first.round_number, 1);
    assert!(!first.is_doubled);

    let second = play(&mut state, ContractKind::Solo, &[1], 13).unwrap();
    assert_eq!(second.round_number, 2);

    let scores: Vec<i32> = state.players().iter().map(|p| p.score).collect();
    assert_eq!(scores, [4 - 25, -4 + 75, 4 - 25, -4 - 25]);
    assert_eq!(state.dealer_index(), 2);
}

#[test]
fn pass_round_rotates_dealer_and_doubles_the_next_round() {
    let mut state = started_game();

    let pass = play(&mut state, ContractKind::AllPassed, &[], 0).unwrap();
    assert!(pass.result.values().all(|d| *d == 0));
    assert!(!pass.is_doubled);
    assert_eq!(state.dealer_index(), 1);
    assert!(state.next_round_doubled());
    assert!(state.players().iter().all(|p| p.score == 0));

    let doubled = play(&mut state, ContractKind::Normal, &[1, 3], 8).unwrap();
    assert!(doubled.is_doubled);
    assert_eq!(doubled.points, 4);
    assert_eq!(doubled.delta_for(&seats(&state, &[1])[0]), 4);
    assert!(!state.next_round_doubled());
}

#[test]
fn consecutive_passes_keep_the_flag_but_do_not_stack() {
    let mut state = started_game();
    play(&mut state, ContractKind::AllPassed, &[], 0).unwrap();
    let second = play(&mut state, ContractKind::AllPassed, &[], 0).unwrap();
    assert!(!second.is_doubled);
    assert!(state.next_round_doubled());

    let solo = play(&mut state, ContractKind::SoloSlim, &[0], 13).unwrap();
    assert_eq!(solo.points, 60, "doubled once, not twice");
}

#[test]
fn rejected_submission_leaves_state_untouched() {
    let mut state = started_game();
    play(&mut state, ContractKind::AllPassed, &[], 0).unwrap();
    let before = state.clone();

    let err = play(&mut state, ContractKind::Troel, &[2], 9).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::ParticipantCount));
    assert_eq!(state, before);
}

#[test]
fn finished_game_refuses_rounds_until_reopened() {
    let mut state = started_game();
    play(&mut state, ContractKind::Piccolo, &[3], 1).unwrap();
    state.finish().unwrap();
    assert_eq!(state.phase(), Phase::Finished);

    let before = state.clone();
    let err = play(&mut state, ContractKind::Piccolo, &[3], 1).unwrap_err();
    assert!(matches!(err, DomainError::PhaseMismatch { .. }));
    assert_eq!(state, before);

    state.unfinish().unwrap();
    assert_eq!(state.phase(), Phase::InProgress);
    assert_eq!(state.rounds().len(), 1, "history survives finish/reopen");
    let round = play(&mut state, ContractKind::Piccolo, &[3], 1).unwrap();
    assert_eq!(round.round_number, 2);
}

#[test]
fn finish_and_unfinish_only_from_their_phases() {
    let mut fresh = GameState::new();
    assert!(matches!(
        fresh.finish().unwrap_err(),
        DomainError::PhaseMismatch { .. }
    ));
    assert!(fresh.unfinish().is_err());

    let mut state = started_game();
    assert!(state.unfinish().is_err());
    state.finish().unwrap();
    assert!(state.finish().is_err());
}

#[test]
fn reset_returns_to_not_started_from_any_phase() {
    let mut state = started_game();
    play(&mut state, ContractKind::AllPassed, &[], 0).unwrap();
    state.reset();
    assert_eq!(state, GameState::new());

    let mut finished = started_game();
    finished.finish().unwrap();
    finished.reset();
    assert_eq!(finished.phase(), Phase::NotStarted);

    let mut fresh = GameState::new();
    fresh.reset();
    assert_eq!(fresh, GameState::new());
}

#[test]
fn committed_rounds_keep_seating_and_sides() {
    let mut state = started_game();
    let round = play(&mut state, ContractKind::Troel, &[0, 3], 9).unwrap();
    assert_eq!(round.all_players, state.seating());
    assert_eq!(round.active_player_ids.len(), 2);
    assert_eq!(round.defending_player_ids.len(), 2);
    assert_eq!(round.tricks_won, 9);
    assert_eq!(round.contract, ContractKind::Troel);
    assert!(state.check_consistency().is_ok());
}

#[test]
fn round_timestamp_is_wall_clock_millis() {
    let before = time::OffsetDateTime::now_utc().unix_timestamp() * 1000;
    let mut state = started_game();
    let round = play(&mut state, ContractKind::AllPassed, &[], 0).unwrap();
    let after = (time::OffsetDateTime::now_utc().unix_timestamp() + 1) * 1000;

    assert!(
        (before..=after).contains(&round.timestamp),
        "{before} <= {} <= {after}",
        round.timestamp
    );
}
