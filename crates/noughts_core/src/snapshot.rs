//! Read-only views handed to move sources and presentation sinks.
//!
//! Everything here is a plain value. Collaborators never see the live
//! board or the live players.

use super::action::{Move, MoveRejection};
use super::board::CELL_COUNT;
use super::outcome::RoundOutcome;
use super::{Cell, Marker, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Copy of the nine cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardSnapshot([Cell; CELL_COUNT]);

impl BoardSnapshot {
    /// Cell at `index`, `None` past 8.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.0.get(index).copied()
    }

    /// All cells in index order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.0
    }

    /// Indices of the empty cells.
    pub fn empty_indices(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| index)
            .collect()
    }
}

impl From<[Cell; CELL_COUNT]> for BoardSnapshot {
    fn from(cells: [Cell; CELL_COUNT]) -> Self {
        Self(cells)
    }
}

/// Renders the grid with 1-based numbers in empty cells.
///
/// ```text
///  o | 2 | x
/// ---+---+---
///  4 | 5 | 6
/// ---+---+---
///  7 | 8 | 9
/// ```
impl std::fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, chunk) in self.0.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
                writeln!(f, "---+---+---")?;
            }
            let symbols: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    Cell::Empty => (row * 3 + col + 1).to_string(),
                    Cell::Marked(marker) => marker.to_string(),
                })
                .collect();
            write!(f, " {} ", symbols.join(" | "))?;
        }
        Ok(())
    }
}

/// A player's standing at a point in the match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct ScoreSnapshot {
    /// Display name.
    name: String,
    /// Marker.
    marker: Marker,
    /// Rounds won.
    score: u32,
}

impl From<&Player> for ScoreSnapshot {
    fn from(player: &Player) -> Self {
        Self::new(player.name().clone(), *player.marker(), *player.score())
    }
}

/// Everything a presentation sink needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct Snapshot {
    /// 1-based number of the round being played, 0 before the first.
    round: u32,
    /// Rounds configured for the match.
    total_rounds: u32,
    /// Rounds not yet completed.
    rounds_remaining: u32,
    /// Board contents.
    board: BoardSnapshot,
    /// Marker whose move is awaited, `None` once the round is over.
    to_move: Option<Marker>,
    /// Marker that made the most recent move on `board`.
    last_mover: Option<Marker>,
    /// Outcome of the round on `board`; `None` when no round was played.
    outcome: Option<RoundOutcome>,
    /// Both players' scores.
    scores: [ScoreSnapshot; 2],
}

impl Snapshot {
    /// Marker the frame should show as current: the one to move, or the
    /// one who just finished the round.
    pub fn current(&self) -> Option<Marker> {
        self.to_move.or(self.last_mover)
    }

    /// Score entry for the player holding `marker`.
    pub fn score_for(&self, marker: Marker) -> Option<&ScoreSnapshot> {
        self.scores.iter().find(|entry| entry.marker == marker)
    }
}

/// Notification delivered to a [`PresentationSink`](crate::PresentationSink).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    /// A fresh board is ready.
    RoundStarted {
        /// State at round start.
        snapshot: Snapshot,
    },
    /// A move was placed.
    MoveApplied {
        /// The move.
        #[serde(rename = "move")]
        mv: Move,
        /// State after the move.
        snapshot: Snapshot,
    },
    /// A move attempt was refused; the same marker moves again.
    MoveRejected {
        /// Marker whose attempt was refused.
        marker: Marker,
        /// Why.
        rejection: MoveRejection,
        /// Unchanged state.
        snapshot: Snapshot,
    },
    /// A round reached a terminal outcome and scores were updated.
    RoundFinished {
        /// State after scoring.
        snapshot: Snapshot,
    },
    /// No rounds remain.
    MatchFinished {
        /// Final state.
        snapshot: Snapshot,
    },
}

impl MatchEvent {
    /// Snapshot carried by this event.
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            MatchEvent::RoundStarted { snapshot }
            | MatchEvent::MoveApplied { snapshot, .. }
            | MatchEvent::MoveRejected { snapshot, .. }
            | MatchEvent::RoundFinished { snapshot }
            | MatchEvent::MatchFinished { snapshot } => snapshot,
        }
    }
}
