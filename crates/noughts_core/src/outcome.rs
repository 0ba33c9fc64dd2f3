//! Round outcome.

use super::Marker;
use serde::{Deserialize, Serialize};

/// Result of a round.
///
/// `Win` and `Tie` are terminal. A finished round never reports
/// `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    /// Marker completed a winning line.
    Win(Marker),
    /// Board filled with no winning line.
    Tie,
    /// Play continues.
    #[default]
    InProgress,
}

impl RoundOutcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Marker> {
        match self {
            RoundOutcome::Win(marker) => Some(*marker),
            RoundOutcome::Tie | RoundOutcome::InProgress => None,
        }
    }

    /// True for `Win` and `Tie`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundOutcome::InProgress)
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundOutcome::Win(marker) => write!(f, "{} wins", marker),
            RoundOutcome::Tie => write!(f, "Draw"),
            RoundOutcome::InProgress => write!(f, "In progress"),
        }
    }
}
