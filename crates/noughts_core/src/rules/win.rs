//! Win detection.

use crate::{Cell, Marker};
use tracing::instrument;

/// Three board indices forming a row, column or diagonal.
pub type WinLine = [usize; 3];

/// The eight winning lines of the 3x3 board.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns true if `marker` holds all three cells of any winning line.
///
/// Every line is checked on every call.
#[instrument(skip(cells))]
pub fn is_win_for(cells: &[Cell; 9], marker: Marker) -> bool {
    completed_line(cells, marker).is_some()
}

/// Returns the first winning line held entirely by `marker`.
pub fn completed_line(cells: &[Cell; 9], marker: Marker) -> Option<WinLine> {
    let target = Cell::Marked(marker);
    WIN_LINES
        .iter()
        .copied()
        .find(|line| line.iter().all(|&index| cells[index] == target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells_with(marker: Marker, indices: &[usize]) -> [Cell; 9] {
        let mut cells = [Cell::Empty; 9];
        for &index in indices {
            cells[index] = Cell::Marked(marker);
        }
        cells
    }

    #[test]
    fn test_no_winner_empty_board() {
        let cells = [Cell::Empty; 9];
        assert!(!is_win_for(&cells, Marker::O));
        assert!(!is_win_for(&cells, Marker::X));
    }

    #[test]
    fn test_every_line_wins() {
        for line in WIN_LINES {
            let cells = cells_with(Marker::X, &line);
            assert!(is_win_for(&cells, Marker::X), "line {line:?}");
            assert!(!is_win_for(&cells, Marker::O), "line {line:?}");
            assert_eq!(completed_line(&cells, Marker::X), Some(line));
        }
    }

    #[test]
    fn test_two_in_a_row_is_not_a_win() {
        let cells = cells_with(Marker::O, &[0, 1]);
        assert!(!is_win_for(&cells, Marker::O));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut cells = cells_with(Marker::O, &[0, 1]);
        cells[2] = Cell::Marked(Marker::X);
        assert!(!is_win_for(&cells, Marker::O));
        assert!(!is_win_for(&cells, Marker::X));
    }
}
