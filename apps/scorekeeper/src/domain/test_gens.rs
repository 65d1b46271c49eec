// Proptest generators for scoring inputs and round sequences.

use proptest::prelude::*;

use crate::domain::contracts::ContractKind;

/// Any contract except the pass pseudo-contract
pub fn played_contract() -> impl Strategy<Value = ContractKind> {
    prop_oneof![
        Just(ContractKind::Alone),
        Just(ContractKind::Normal),
        Just(ContractKind::Troel),
        Just(ContractKind::Piccolo),
        Just(ContractKind::Abondance),
        Just(ContractKind::Miserie),
        Just(ContractKind::MiserieOnTable),
        Just(ContractKind::Solo),
        Just(ContractKind::SoloSlim),
    ]
}

/// Any contract, with passes showing up often enough to chain
pub fn contract() -> impl Strategy<Value = ContractKind> {
    prop_oneof![
        1 => Just(ContractKind::AllPassed),
        3 => played_contract(),
    ]
}

pub fn tricks() -> impl Strategy<Value = u8> {
    0u8..=13u8
}

/// Distinct seats matching the contract's category (empty for a pass)
pub fn active_seats(contract: ContractKind) -> BoxedStrategy<Vec<usize>> {
    let wanted = contract
        .definition()
        .map(|def| def.category.active_players())
        .unwrap_or(0);
    if wanted == 0 {
        return Just(Vec::new()).boxed();
    }
    Just((0..4usize).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(move |mut seats| {
            seats.truncate(wanted);
            seats
        })
        .boxed()
}

/// A legal submission: (contract, active seats, tricks)
pub fn submission() -> impl Strategy<Value = (ContractKind, Vec<usize>, u8)> {
    (contract(), tricks()).prop_flat_map(|(contract, tricks)| {
        active_seats(contract).prop_map(move |seats| (contract, seats, tricks))
    })
}

/// A submission whose active side has the wrong size for its category
pub fn miscounted_submission() -> impl Strategy<Value = (ContractKind, Vec<usize>, u8)> {
    (played_contract(), tricks(), 0usize..=4usize)
        .prop_filter("active count must not match the category", |(c, _, n)| {
            let wanted = c.definition().map(|d| d.category.active_players());
            wanted != Some(*n)
        })
        .prop_map(|(contract, tricks, n)| (contract, (0..n).collect(), tricks))
}

