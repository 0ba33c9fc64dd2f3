//! Noughts core - round and match logic for 3x3 tic-tac-toe
//!
//! # Architecture
//!
//! - **Board**: nine cells, placement legality, win/tie classification
//! - **RoundEngine**: alternates turns between two seated move sources
//!   until the board reaches a terminal outcome
//! - **Match**: owns both players and their scores across a configured
//!   number of rounds
//!
//! Input and rendering stay outside: a [`MoveSource`] answers with cell
//! indices and a [`PresentationSink`] receives value [`Snapshot`]s.
//!
//! # Example
//!
//! ```
//! use noughts_core::{Marker, Match, MatchEvent, Player, ScriptedSource, Seats};
//!
//! let mut game = Match::new(
//!     Player::new(Marker::O, "Player 1"),
//!     Player::new(Marker::X, "Player 2"),
//!     1,
//! )?;
//! let mut seats = Seats::shared(ScriptedSource::new([0, 3, 1, 4, 2]));
//! let mut events: Vec<MatchEvent> = Vec::new();
//!
//! let summary = game.run(&mut seats, &mut events)?;
//! assert_eq!(*summary.scores()[0].score(), 1);
//! # Ok::<(), noughts_core::MatchError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod error;
mod game_match;
mod outcome;
mod position;
pub mod rules;
mod round;
mod seat;
mod snapshot;
mod types;

// Crate-level exports - Domain types
pub use types::{Cell, Marker, Player};

// Crate-level exports - Board
pub use board::{Board, CELL_COUNT};
pub use position::Position;

// Crate-level exports - Moves and outcomes
pub use action::{Move, MoveRejection, PlacementError};
pub use outcome::RoundOutcome;

// Crate-level exports - Round and match engines
pub use game_match::{FirstMover, Match, MatchSummary, RoundRecord};
pub use round::{RoundContext, RoundEngine, RoundState};

// Crate-level exports - Collaborators
pub use seat::{MoveSource, PresentationSink, ScriptedSource, Seats};
pub use snapshot::{BoardSnapshot, MatchEvent, ScoreSnapshot, Snapshot};

// Crate-level exports - Errors
pub use error::{MatchError, MoveSourceError, ReplayError, RoundError};
