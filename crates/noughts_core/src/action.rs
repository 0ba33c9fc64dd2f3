//! Moves and the ways a move can be refused.

use super::{Marker, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A placement that was applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// Marker that was placed.
    marker: Marker,
    /// Board index (0-8).
    index: usize,
}

impl Move {
    /// Named position of this move.
    pub fn position(&self) -> Option<Position> {
        Position::from_index(self.index)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position() {
            Some(pos) => write!(f, "{} -> {}", self.marker, pos.label()),
            None => write!(f, "{} -> {}", self.marker, self.index),
        }
    }
}

/// Why [`Board::place`](crate::Board::place) refused a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum PlacementError {
    /// Index is not one of the nine cells.
    #[display("Position {} is off the board", _0)]
    OutOfRange(usize),
    /// Cell already holds a marker.
    #[display("Position {} is already taken", _0)]
    CellOccupied(usize),
}

impl std::error::Error for PlacementError {}

/// Feedback sent back to a move source whose answer was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum MoveRejection {
    /// The index was read but the board refused it.
    #[display("{}", _0)]
    Placement(PlacementError),
    /// The input could not be read as a position.
    #[display("Could not read a position from {:?}", _0)]
    Unreadable(String),
}

impl From<PlacementError> for MoveRejection {
    fn from(err: PlacementError) -> Self {
        Self::Placement(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_display_uses_position_label() {
        assert_eq!(Move::new(Marker::X, 4).to_string(), "x -> Center");
        assert_eq!(Move::new(Marker::O, 11).to_string(), "o -> 11");
        assert_eq!(Move::new(Marker::O, 0).position(), Some(Position::TopLeft));
    }
}
