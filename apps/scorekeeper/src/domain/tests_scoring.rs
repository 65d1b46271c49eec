use std::collections::BTreeSet;

use crate::domain::contracts::ContractKind;
use crate::domain::scoring::{base_points, score_round, ScoredRound};
use crate::domain::state::PlayerId;
use crate::errors::domain::ValidationKind;

fn table() -> Vec<PlayerId> {
    ["n", "o", "z", "w"].into_iter().map(PlayerId::new).collect()
}

fn ids(raw: &[&str]) -> Vec<PlayerId> {
    raw.iter().copied().map(PlayerId::new).collect()
}

fn score(contract: ContractKind, active: &[&str], tricks: u8, doubled: bool) -> ScoredRound {
    score_round(contract, &ids(active), &table(), tricks, doubled)
        .expect("submission should be accepted")
}

fn base(contract: ContractKind, tricks: u8) -> i32 {
    base_points(contract.definition().expect("catalog entry"), tricks)
}

fn delta(scored: &ScoredRound, id: &str) -> i32 {
    scored.result[&PlayerId::new(id)]
}

#[test]
fn normal_team_win_with_overtricks() {
    // Normal, 2 active, 10 tricks -> 2 + |10 - 8| = 4
    let scored = score(ContractKind::Normal, &["n", "z"], 10, false);
    assert_eq!(scored.base_points, 4);
    assert_eq!(scored.points(), 4);
    assert_eq!(delta(&scored, "n"), 4);
    assert_eq!(delta(&scored, "z"), 4);
    assert_eq!(delta(&scored, "o"), -4);
    assert_eq!(delta(&scored, "w"), -4);
    assert_eq!(
        scored.defending_player_ids,
        ids(&["o", "w"]).into_iter().collect::<BTreeSet<_>>()
    );
}

#[test]
fn normal_stake_table() {
    assert_eq!(base(ContractKind::Normal, 8), 2);
    assert_eq!(base(ContractKind::Normal, 12), 6);
    // All thirteen doubles the value
    assert_eq!(base(ContractKind::Normal, 13), 14);
    assert_eq!(base(ContractKind::Normal, 7), -3);
    assert_eq!(base(ContractKind::Normal, 0), -10);
}

#[test]
fn alone_stake_table() {
    assert_eq!(base(ContractKind::Alone, 5), 2);
    assert_eq!(base(ContractKind::Alone, 8), 5);
    assert_eq!(base(ContractKind::Alone, 4), -3);
    assert_eq!(base(ContractKind::Alone, 0), -7);
}

#[test]
fn troel_stake_table() {
    assert_eq!(base(ContractKind::Troel, 8), 4);
    assert_eq!(base(ContractKind::Troel, 10), 8);
    assert_eq!(base(ContractKind::Troel, 12), 12);
    assert_eq!(base(ContractKind::Troel, 13), 20);
    assert_eq!(base(ContractKind::Troel, 7), -6);
    assert_eq!(base(ContractKind::Troel, 3), -14);
}

#[test]
fn troel_all_tricks_doubled() {
    // Troel is a team contract: 20 doubled to 40 for each active player
    let scored = score(ContractKind::Troel, &["o", "w"], 13, true);
    assert_eq!(scored.base_points, 40);
    assert!(scored.is_doubled);
    assert_eq!(delta(&scored, "o"), 40);
    assert_eq!(delta(&scored, "w"), 40);
    assert_eq!(delta(&scored, "n"), -40);
    assert_eq!(delta(&scored, "z"), -40);
}

#[test]
fn abondance_win_table_and_fixed_loss() {
    assert_eq!(base(ContractKind::Abondance, 9), 4);
    assert_eq!(base(ContractKind::Abondance, 10), 7);
    assert_eq!(base(ContractKind::Abondance, 11), 8);
    assert_eq!(base(ContractKind::Abondance, 12), 9);
    // Outside the table but still a win
    assert_eq!(base(ContractKind::Abondance, 13), 9);
    // Below the minimum is a loss, not a rejection
    assert_eq!(base(ContractKind::Abondance, 8), -4);
    assert_eq!(base(ContractKind::Abondance, 2), -4);
}

#[test]
fn exact_count_contracts() {
    assert_eq!(base(ContractKind::Miserie, 0), 7);
    assert_eq!(base(ContractKind::Miserie, 1), -7);
    assert_eq!(base(ContractKind::MiserieOnTable, 0), 14);
    assert_eq!(base(ContractKind::MiserieOnTable, 3), -14);
    assert_eq!(base(ContractKind::Piccolo, 1), 5);
    assert_eq!(base(ContractKind::Piccolo, 0), -5);
    assert_eq!(base(ContractKind::Piccolo, 2), -5);
    assert_eq!(base(ContractKind::Solo, 13), 25);
    assert_eq!(base(ContractKind::Solo, 12), -25);
    assert_eq!(base(ContractKind::SoloSlim, 13), 30);
    assert_eq!(base(ContractKind::SoloSlim, 0), -30);
}

#[test]
fn solo_win_pays_triple_to_the_soloist() {
    let scored = score(ContractKind::Solo, &["z"], 13, false);
    assert_eq!(scored.base_points, 25);
    assert_eq!(delta(&scored, "z"), 75);
    for defender in ["n", "o", "w"] {
        assert_eq!(delta(&scored, defender), -25);
    }
}

#[test]
fn solo_loss_costs_the_soloist_triple() {
    let scored = score(ContractKind::Miserie, &["w"], 2, false);
    assert_eq!(scored.base_points, -7);
    assert_eq!(scored.points(), 7);
    assert_eq!(delta(&scored, "w"), -21);
    assert_eq!(delta(&scored, "n"), 7);
}

#[test]
fn doubling_applies_after_the_sign() {
    let plain = score(ContractKind::Alone, &["n"], 3, false);
    let doubled = score(ContractKind::Alone, &["n"], 3, true);
    assert_eq!(plain.base_points, -4);
    assert_eq!(doubled.base_points, -8);
    assert_eq!(delta(&doubled, "n"), -24);
    assert_eq!(delta(&doubled, "o"), 8);
    assert_eq!(doubled.points(), 8);
}

#[test]
fn pass_round_is_all_zero() {
    let scored = score(ContractKind::AllPassed, &["n", "o"], 7, true);
    assert_eq!(scored.base_points, 0);
    assert_eq!(scored.tricks_won, 0);
    assert!(!scored.is_doubled, "a pass round is never itself doubled");
    assert!(scored.active_player_ids.is_empty());
    assert!(scored.defending_player_ids.is_empty());
    assert_eq!(scored.result.len(), 4);
    assert!(scored.result.values().all(|d| *d == 0));
}

#[test]
fn team_contract_with_one_active_player_is_rejected() {
    let err = score_round(ContractKind::Normal, &ids(&["n"]), &table(), 9, false).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::ParticipantCount));
}

#[test]
fn solo_contract_with_two_active_players_is_rejected() {
    let err =
        score_round(ContractKind::Piccolo, &ids(&["n", "o"]), &table(), 1, false).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::ParticipantCount));
}

#[test]
fn empty_active_set_is_rejected() {
    let err = score_round(ContractKind::Solo, &[], &table(), 13, false).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::ParticipantCount));
}

#[test]
fn duplicate_active_ids_count_once() {
    let err =
        score_round(ContractKind::Troel, &ids(&["n", "n"]), &table(), 9, false).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::ParticipantCount));

    let scored = score(ContractKind::Alone, &["o", "o"], 6, false);
    assert_eq!(delta(&scored, "o"), 9);
}

#[test]
fn stranger_is_rejected() {
    let err =
        score_round(ContractKind::Normal, &ids(&["n", "x"]), &table(), 8, false).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::UnknownPlayer));
}

#[test]
fn impossible_trick_count_is_rejected() {
    let err = score_round(ContractKind::Alone, &ids(&["n"]), &table(), 14, false).unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::TricksOutOfRange));
}

#[test]
fn short_table_is_rejected() {
    let err = score_round(
        ContractKind::AllPassed,
        &[],
        &ids(&["n", "o", "z"]),
        0,
        false,
    )
    .unwrap_err();
    assert_eq!(err.validation_kind(), Some(ValidationKind::PlayerCount));
}
