//! Contract catalog: every biddable game type with its category, target and
//! trick bounds.
//!
//! The catalog is constant data. `ContractKind::AllPassed` is deliberately
//! absent from it: a pass round has no target and no stake.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Declared game type for a round.
///
/// Serialized with the stable tokens used in the snapshot document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContractKind {
    #[serde(rename = "PASS")]
    AllPassed,
    #[serde(rename = "ALONE")]
    Alone,
    #[serde(rename = "NORMAL")]
    Normal,
    #[serde(rename = "TROEL")]
    Troel,
    #[serde(rename = "PICCOLO")]
    Piccolo,
    #[serde(rename = "ABONDANCE")]
    Abondance,
    #[serde(rename = "MISERIE")]
    Miserie,
    #[serde(rename = "MISERIE_TABLE")]
    MiserieOnTable,
    #[serde(rename = "SOLO")]
    Solo,
    #[serde(rename = "SOLO_SLIM")]
    SoloSlim,
}

impl ContractKind {
    pub const ALL: [ContractKind; 10] = [
        ContractKind::AllPassed,
        ContractKind::Alone,
        ContractKind::Normal,
        ContractKind::Troel,
        ContractKind::Piccolo,
        ContractKind::Abondance,
        ContractKind::Miserie,
        ContractKind::MiserieOnTable,
        ContractKind::Solo,
        ContractKind::SoloSlim,
    ];

    /// Stable token, identical to the serialized form.
    pub const fn token(self) -> &'static str {
        match self {
            ContractKind::AllPassed => "PASS",
            ContractKind::Alone => "ALONE",
            ContractKind::Normal => "NORMAL",
            ContractKind::Troel => "TROEL",
            ContractKind::Piccolo => "PICCOLO",
            ContractKind::Abondance => "ABONDANCE",
            ContractKind::Miserie => "MISERIE",
            ContractKind::MiserieOnTable => "MISERIE_TABLE",
            ContractKind::Solo => "SOLO",
            ContractKind::SoloSlim => "SOLO_SLIM",
        }
    }

    /// Table label as players call the contract.
    pub const fn label(self) -> &'static str {
        match self {
            ContractKind::AllPassed => "Iedereen Past",
            ContractKind::Alone => "Alleen Gaan",
            ContractKind::Normal => "Vraag & Mee",
            ContractKind::Troel => "Troel",
            ContractKind::Piccolo => "Piccolo",
            ContractKind::Abondance => "Abondance",
            ContractKind::Miserie => "Miserie",
            ContractKind::MiserieOnTable => "Miserie op Tafel",
            ContractKind::Solo => "Solo",
            ContractKind::SoloSlim => "Solo Slim",
        }
    }

    pub const fn is_pass(self) -> bool {
        matches!(self, ContractKind::AllPassed)
    }

    /// Catalog entry; `None` only for the pass pseudo-contract.
    pub fn definition(self) -> Option<&'static ContractDefinition> {
        CATALOG.iter().find(|def| def.kind == self)
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContractKind {
    type Err = DomainError;

    /// Accepts the stable token in any case, with `-` or `_` as separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        ContractKind::ALL
            .into_iter()
            .find(|kind| kind.token() == normalized)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::UnknownContract,
                    format!("unknown contract '{s}'"),
                )
            })
    }
}

/// Who attempts the contract: a pair (2 vs 2) or a single player (1 vs 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Team,
    Solo,
}

impl Category {
    /// Exact number of active players the category requires.
    pub const fn active_players(self) -> usize {
        match self {
            Category::Team => 2,
            Category::Solo => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractDefinition {
    pub kind: ContractKind,
    pub category: Category,
    /// Minimum trick count that counts as a win. Miserie and Piccolo are
    /// exact-count contracts and are judged by the scorer, not by this field.
    pub target: u8,
    pub min_tricks: u8,
    pub max_tricks: u8,
}

impl ContractDefinition {
    /// Trick count an input form should pre-fill.
    pub const fn default_tricks(&self) -> u8 {
        self.target
    }

    /// Trick counts an input form should offer. Counts outside this range
    /// are still scored.
    pub fn trick_range(&self) -> RangeInclusive<u8> {
        self.min_tricks..=self.max_tricks
    }
}

const fn entry(
    kind: ContractKind,
    category: Category,
    target: u8,
    min_tricks: u8,
    max_tricks: u8,
) -> ContractDefinition {
    ContractDefinition {
        kind,
        category,
        target,
        min_tricks,
        max_tricks,
    }
}

/// Team contracts first, then solo contracts, in table order.
pub const CATALOG: [ContractDefinition; 9] = [
    entry(ContractKind::Normal, Category::Team, 8, 0, 13),
    entry(ContractKind::Troel, Category::Team, 8, 0, 13),
    entry(ContractKind::Alone, Category::Solo, 5, 0, 13),
    entry(ContractKind::Piccolo, Category::Solo, 1, 0, 13),
    entry(ContractKind::Abondance, Category::Solo, 9, 9, 12),
    entry(ContractKind::Miserie, Category::Solo, 0, 0, 13),
    entry(ContractKind::MiserieOnTable, Category::Solo, 0, 0, 13),
    entry(ContractKind::Solo, Category::Solo, 13, 13, 13),
    entry(ContractKind::SoloSlim, Category::Solo, 13, 13, 13),
];

pub fn catalog() -> &'static [ContractDefinition] {
    &CATALOG
}
