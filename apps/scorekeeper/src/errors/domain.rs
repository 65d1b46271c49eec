//! Domain-level error type used by the engine, its services and the CLI.
//!
//! Every variant is a rejection: the command that produced it was not
//! applied and the game state is exactly what it was before the call.

use thiserror::Error;

use crate::domain::snapshot::SnapshotError;
use crate::domain::state::Phase;
use crate::errors::error_code::ErrorCode;

/// Validation error kinds (extend as needed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// A game needs exactly four players.
    PlayerCount,
    /// Wrong number of active players for the contract category.
    ParticipantCount,
    /// An active player id is not seated at the table.
    UnknownPlayer,
    /// Trick count outside 0..=13.
    TricksOutOfRange,
    /// Contract token did not match any known contract.
    UnknownContract,
}

/// Central domain error type
#[derive(Debug, Error)]
pub enum DomainError {
    /// Input validation or business rule violation
    #[error("validation error: {1}")]
    Validation(ValidationKind, String),
    /// Command not allowed in the current lifecycle phase
    #[error("phase mismatch: expected {expected}, game is {actual}")]
    PhaseMismatch { expected: Phase, actual: Phase },
    /// Persisted document could not be turned back into a game
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn phase_mismatch(expected: Phase, actual: Phase) -> Self {
        Self::PhaseMismatch { expected, actual }
    }

    /// Validation kind, if this is a validation error.
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(*kind),
            _ => None,
        }
    }

    /// Stable error code for reporting.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::PlayerCount => ErrorCode::InvalidPlayerCount,
                ValidationKind::ParticipantCount => ErrorCode::InvalidParticipants,
                ValidationKind::UnknownPlayer => ErrorCode::UnknownPlayer,
                ValidationKind::TricksOutOfRange => ErrorCode::TricksOutOfRange,
                ValidationKind::UnknownContract => ErrorCode::UnknownContract,
            },
            DomainError::PhaseMismatch { .. } => ErrorCode::PhaseMismatch,
            DomainError::Snapshot(SnapshotError::Malformed(_)) => ErrorCode::SnapshotMalformed,
            DomainError::Snapshot(SnapshotError::Inconsistent(_)) => {
                ErrorCode::SnapshotInconsistent
            }
        }
    }
}
