//! Errors raised by move sources, rounds and matches.

use super::action::PlacementError;
use super::Marker;

/// Error a [`MoveSource`](crate::MoveSource) returns instead of an index.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveSourceError {
    /// Input was received but is not a position. The engine asks again.
    #[display("Unreadable move input: {:?}", _0)]
    Unreadable(String),
    /// No further input will ever arrive.
    #[display("Move source has no more input")]
    Exhausted,
}

impl std::error::Error for MoveSourceError {}

/// Error that aborts a round.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RoundError {
    /// The source seated for this marker ran dry mid-round.
    #[display("Move source for {} ran out of input", _0)]
    SourceExhausted(Marker),
    /// `step` was called on a round that already has an outcome.
    #[display("Round is already over")]
    AlreadyFinished,
}

impl std::error::Error for RoundError {}

/// Error that stops a match.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MatchError {
    /// Both players were given the same marker.
    #[display("Both players hold marker {}", _0)]
    DuplicateMarker(Marker),
    /// A round could not be completed.
    #[display("{}", _0)]
    Round(RoundError),
    /// `play_round` was called with no rounds left.
    #[display("No rounds remaining")]
    NoRoundsRemaining,
}

impl From<RoundError> for MatchError {
    fn from(err: RoundError) -> Self {
        Self::Round(err)
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::Round(err) => Some(err),
            MatchError::DuplicateMarker(_) | MatchError::NoRoundsRemaining => None,
        }
    }
}

/// Error from [`RoundEngine::replay`](crate::RoundEngine::replay).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ReplayError {
    /// The move at `step` (0-based) was refused by the board.
    #[display("Move {} rejected: {}", step, error)]
    Rejected {
        /// Position of the offending move in the sequence.
        step: usize,
        /// Board's reason.
        error: PlacementError,
    },
    /// Moves remain after the round already ended.
    #[display("Round ended before move {}", step)]
    TrailingMoves {
        /// Position of the first unused move.
        step: usize,
    },
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Rejected { error, .. } => Some(error),
            ReplayError::TrailingMoves { .. } => None,
        }
    }
}
