//! Error codes for the scorekeeper.
//!
//! All error codes are SCREAMING_SNAKE_CASE and are what the command line
//! driver prints when a command is rejected. Add new codes here; never pass
//! ad-hoc strings as error codes.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Game was started with other than four players
    InvalidPlayerCount,
    /// Active player count does not match the contract category
    InvalidParticipants,
    /// Active player is not seated at the table
    UnknownPlayer,
    /// Trick count outside 0..=13
    TricksOutOfRange,
    /// Unknown contract token
    UnknownContract,

    // Lifecycle
    /// Command not allowed in the current phase
    PhaseMismatch,

    // Persistence
    /// Snapshot document is not valid JSON for a game state
    SnapshotMalformed,
    /// Snapshot document parsed but breaks game invariants
    SnapshotInconsistent,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            Self::InvalidParticipants => "INVALID_PARTICIPANTS",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::TricksOutOfRange => "TRICKS_OUT_OF_RANGE",
            Self::UnknownContract => "UNKNOWN_CONTRACT",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::SnapshotMalformed => "SNAPSHOT_MALFORMED",
            Self::SnapshotInconsistent => "SNAPSHOT_INCONSISTENT",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
