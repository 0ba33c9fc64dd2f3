//! The 3x3 board.

use super::action::PlacementError;
use super::outcome::RoundOutcome;
use super::rules;
use super::snapshot::BoardSnapshot;
use super::{Cell, Marker};
use tracing::{debug, instrument};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// 3x3 board for a single round.
///
/// Cells are stored in row-major order:
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
///
/// [`Board::place`] is the only mutator and never overwrites a marked cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
    last_mover: Option<Marker>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the cell at `index` for `marker`.
    ///
    /// # Errors
    ///
    /// [`PlacementError::OutOfRange`] if `index` is not 0-8,
    /// [`PlacementError::CellOccupied`] if the cell is already marked.
    /// The board is untouched on error.
    #[instrument(skip(self))]
    pub fn place(&mut self, index: usize, marker: Marker) -> Result<(), PlacementError> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(PlacementError::OutOfRange(index))?;
        if *cell != Cell::Empty {
            debug!(index, "Cell already occupied");
            return Err(PlacementError::CellOccupied(index));
        }
        *cell = Cell::Marked(marker);
        self.last_mover = Some(marker);
        Ok(())
    }

    /// Gets the cell at `index`, `None` past 8.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// All cells in index order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Marker of the most recent successful placement.
    pub fn last_mover(&self) -> Option<Marker> {
        self.last_mover
    }

    /// True if `marker` holds any complete winning line.
    pub fn is_win_for(&self, marker: Marker) -> bool {
        rules::is_win_for(&self.cells, marker)
    }

    /// True if no cell is empty.
    pub fn is_full(&self) -> bool {
        rules::is_full(&self.cells)
    }

    /// Classifies the board after the latest placement.
    ///
    /// A win for the marker that just moved takes precedence over a full
    /// board. Returns `None` while play can continue.
    #[instrument(skip(self))]
    pub fn is_terminal(&self) -> Option<RoundOutcome> {
        let mover = self.last_mover?;
        if self.is_win_for(mover) {
            Some(RoundOutcome::Win(mover))
        } else if self.is_full() {
            Some(RoundOutcome::Tie)
        } else {
            None
        }
    }

    /// Read-only copy of the cells.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from(self.cells)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.snapshot().fmt(f)
    }
}
