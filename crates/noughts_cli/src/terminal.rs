//! Hot-seat move source reading positions from a terminal.

use noughts_core::{BoardSnapshot, Marker, MoveRejection, MoveSource, MoveSourceError, PlacementError, Position};
use std::io::{BufRead, Write};
use tracing::{debug, instrument, warn};

/// Reads one position per line.
///
/// Accepts `1`-`9` (numbered as drawn on the board) or a position name
/// such as `center` or `top-left`.
pub struct TerminalSource<R, W> {
    input: R,
    output: W,
    // Board from the latest prompt, used to list open cells on rejection.
    board: BoardSnapshot,
}

impl<R: BufRead, W: Write> TerminalSource<R, W> {
    /// Creates a source over `input`, prompting on `output`.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            board: BoardSnapshot::default(),
        }
    }

    fn write_line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{}", text).and_then(|_| self.output.flush()) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

/// Turns one line of input into a board index.
///
/// Numbers are taken as given (minus one) so off-board numbers reach the
/// board and come back as placement errors.
pub fn parse_position(line: &str) -> Result<usize, MoveSourceError> {
    let trimmed = line.trim();
    if let Ok(number) = trimmed.parse::<usize>() {
        return number
            .checked_sub(1)
            .ok_or_else(|| MoveSourceError::Unreadable(trimmed.to_string()));
    }
    Position::from_label(trimmed)
        .map(Position::to_index)
        .ok_or_else(|| MoveSourceError::Unreadable(trimmed.to_string()))
}

impl<R: BufRead, W: Write> MoveSource for TerminalSource<R, W> {
    #[instrument(skip(self, board))]
    fn next_move(&mut self, marker: Marker, board: &BoardSnapshot) -> Result<usize, MoveSourceError> {
        self.board = *board;
        if let Err(e) = write!(self.output, "Pick a position: ").and_then(|_| self.output.flush()) {
            warn!(error = %e, "Failed to write prompt");
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                debug!("Input closed");
                Err(MoveSourceError::Exhausted)
            }
            Ok(_) => {
                let parsed = parse_position(&line);
                debug!(?parsed, "Read position");
                parsed
            }
            Err(e) => {
                warn!(error = %e, "Failed to read position");
                Err(MoveSourceError::Exhausted)
            }
        }
    }

    fn reject(&mut self, _marker: Marker, rejection: &MoveRejection) {
        let message = match rejection {
            MoveRejection::Placement(PlacementError::OutOfRange(index)) => {
                format!("Position {} is off the board. Pick 1-9.", index + 1)
            }
            MoveRejection::Placement(PlacementError::CellOccupied(index)) => {
                format!("Position {} is already taken.", index + 1)
            }
            MoveRejection::Unreadable(text) => {
                format!("{:?} is not a position. Pick 1-9.", text)
            }
        };
        let open: Vec<String> = Position::valid_moves(&self.board)
            .into_iter()
            .map(|pos| (pos.to_index() + 1).to_string())
            .collect();
        self.write_line(&format!("{} Open positions: {}.", message, open.join(", ")));
    }
}
