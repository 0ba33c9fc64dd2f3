//! Full-board detection.

use crate::Cell;
use tracing::instrument;

/// Checks if every cell is occupied.
///
/// A full board with no winner is a tie.
#[instrument(skip(cells))]
pub fn is_full(cells: &[Cell; 9]) -> bool {
    cells.iter().all(|cell| *cell != Cell::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Marker;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&[Cell::Empty; 9]));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut cells = [Cell::Marked(Marker::X); 9];
        cells[8] = Cell::Empty;
        assert!(!is_full(&cells));
    }

    #[test]
    fn test_full_board() {
        let mut cells = [Cell::Marked(Marker::X); 9];
        cells[4] = Cell::Marked(Marker::O);
        assert!(is_full(&cells));
    }
}
