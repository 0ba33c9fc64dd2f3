//! Drives a single round from an empty board to a terminal outcome.

use super::action::{Move, MoveRejection, PlacementError};
use super::board::Board;
use super::error::{MoveSourceError, ReplayError, RoundError};
use super::outcome::RoundOutcome;
use super::seat::{PresentationSink, Seats};
use super::snapshot::{MatchEvent, ScoreSnapshot, Snapshot};
use super::Marker;
use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

/// Where a round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Waiting on the source seated for this marker.
    AwaitingMove(Marker),
    /// Round is over.
    Finished(RoundOutcome),
}

/// Match-level facts a round reports alongside its board.
///
/// Scores cannot change while a round is running, so the round carries a
/// copy taken when it started.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct RoundContext {
    /// 1-based round number.
    round: u32,
    /// Rounds configured for the match.
    total_rounds: u32,
    /// Rounds not yet completed, including this one.
    rounds_remaining: u32,
    /// Scores at round start.
    scores: [ScoreSnapshot; 2],
}

impl Default for RoundContext {
    fn default() -> Self {
        Self::new(
            1,
            1,
            1,
            [
                ScoreSnapshot::new("Player 1".to_string(), Marker::O, 0),
                ScoreSnapshot::new("Player 2".to_string(), Marker::X, 0),
            ],
        )
    }
}

/// One round of play.
///
/// Starts in `AwaitingMove(first_mover)`. Each successful placement either
/// ends the round or hands the turn to the other marker. Refused placements
/// and unreadable input leave the turn where it is.
#[derive(Debug, Clone)]
pub struct RoundEngine {
    board: Board,
    state: RoundState,
    first_mover: Marker,
    history: Vec<Move>,
    rejections: u32,
    context: RoundContext,
}

impl RoundEngine {
    /// Creates a standalone round with default context.
    pub fn new(first_mover: Marker) -> Self {
        Self::with_context(first_mover, RoundContext::default())
    }

    /// Creates a round that reports the given match context.
    #[instrument(skip(context), fields(round = context.round))]
    pub fn with_context(first_mover: Marker, context: RoundContext) -> Self {
        Self {
            board: Board::new(),
            state: RoundState::AwaitingMove(first_mover),
            first_mover,
            history: Vec::new(),
            rejections: 0,
            context,
        }
    }

    /// Applies `indices` in order with strict alternation from `first_mover`.
    ///
    /// # Errors
    ///
    /// Fails on the first index the board refuses, or if indices remain
    /// once the round has ended.
    #[instrument]
    pub fn replay(first_mover: Marker, indices: &[usize]) -> Result<Self, ReplayError> {
        let mut engine = Self::new(first_mover);
        for (step, &index) in indices.iter().enumerate() {
            let marker = match engine.state {
                RoundState::AwaitingMove(marker) => marker,
                RoundState::Finished(_) => return Err(ReplayError::TrailingMoves { step }),
            };
            engine
                .apply(marker, index)
                .map_err(|error| ReplayError::Rejected { step, error })?;
        }
        Ok(engine)
    }

    /// Current state.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// The live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Marker that opened the round.
    pub fn first_mover(&self) -> Marker {
        self.first_mover
    }

    /// Applied moves in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of refused attempts so far.
    pub fn rejections(&self) -> u32 {
        self.rejections
    }

    /// Match context this round reports.
    pub fn context(&self) -> &RoundContext {
        &self.context
    }

    /// Marker whose move is awaited, `None` once finished.
    pub fn to_move(&self) -> Option<Marker> {
        match self.state {
            RoundState::AwaitingMove(marker) => Some(marker),
            RoundState::Finished(_) => None,
        }
    }

    /// Outcome so far; `InProgress` until the round ends.
    pub fn outcome(&self) -> RoundOutcome {
        match self.state {
            RoundState::AwaitingMove(_) => RoundOutcome::InProgress,
            RoundState::Finished(outcome) => outcome,
        }
    }

    /// Marker that made the last applied move.
    pub fn last_mover(&self) -> Option<Marker> {
        self.board.last_mover()
    }

    /// Value copy of the round for collaborators.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.context.round,
            self.context.total_rounds,
            self.context.rounds_remaining,
            self.board.snapshot(),
            self.to_move(),
            self.last_mover(),
            Some(self.outcome()),
            self.context.scores.clone(),
        )
    }

    /// Plays the round to completion.
    ///
    /// Emits `RoundStarted` when called on a fresh round, then one
    /// `MoveApplied` or `MoveRejected` per attempt.
    ///
    /// # Errors
    ///
    /// [`RoundError::SourceExhausted`] if a seated source runs out of input.
    #[instrument(skip(self, seats, sink), fields(round = self.context.round, first_mover = %self.first_mover))]
    pub fn run(
        &mut self,
        seats: &mut Seats<'_>,
        sink: &mut dyn PresentationSink,
    ) -> Result<RoundOutcome, RoundError> {
        if self.history.is_empty() && self.rejections == 0 {
            sink.present(&MatchEvent::RoundStarted {
                snapshot: self.snapshot(),
            });
        }
        loop {
            if let RoundState::Finished(outcome) = self.step(seats, sink)? {
                info!(%outcome, moves = self.history.len(), rejections = self.rejections, "Round finished");
                return Ok(outcome);
            }
        }
    }

    /// Performs one move attempt for the marker on turn.
    ///
    /// # Errors
    ///
    /// [`RoundError::AlreadyFinished`] on a finished round,
    /// [`RoundError::SourceExhausted`] if the source has no more input.
    #[instrument(skip(self, seats, sink))]
    pub fn step(
        &mut self,
        seats: &mut Seats<'_>,
        sink: &mut dyn PresentationSink,
    ) -> Result<RoundState, RoundError> {
        let marker = match self.state {
            RoundState::AwaitingMove(marker) => marker,
            RoundState::Finished(_) => return Err(RoundError::AlreadyFinished),
        };

        let view = self.board.snapshot();
        let rejection = match seats.source_for(marker).next_move(marker, &view) {
            Ok(index) => match self.apply(marker, index) {
                Ok(state) => {
                    sink.present(&MatchEvent::MoveApplied {
                        mv: Move::new(marker, index),
                        snapshot: self.snapshot(),
                    });
                    return Ok(state);
                }
                Err(err) => MoveRejection::Placement(err),
            },
            Err(MoveSourceError::Unreadable(text)) => MoveRejection::Unreadable(text),
            Err(MoveSourceError::Exhausted) => {
                warn!(%marker, "Move source exhausted mid-round");
                return Err(RoundError::SourceExhausted(marker));
            }
        };

        self.rejections += 1;
        debug!(%marker, %rejection, "Move rejected");
        seats.source_for(marker).reject(marker, &rejection);
        sink.present(&MatchEvent::MoveRejected {
            marker,
            rejection,
            snapshot: self.snapshot(),
        });
        Ok(self.state)
    }

    fn apply(&mut self, marker: Marker, index: usize) -> Result<RoundState, PlacementError> {
        self.board.place(index, marker)?;
        let mv = Move::new(marker, index);
        self.history.push(mv);
        self.state = match self.board.is_terminal() {
            Some(outcome) => RoundState::Finished(outcome),
            None => RoundState::AwaitingMove(marker.opponent()),
        };
        debug!(%mv, state = ?self.state, "Move applied");
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedSource;

    #[test]
    fn test_new_round_awaits_first_mover() {
        let engine = RoundEngine::new(Marker::X);
        assert_eq!(engine.state(), RoundState::AwaitingMove(Marker::X));
        assert_eq!(engine.outcome(), RoundOutcome::InProgress);
    }

    #[test]
    fn test_replay_top_row_win() {
        let engine = RoundEngine::replay(Marker::O, &[0, 3, 1, 4, 2]).unwrap();
        assert_eq!(engine.state(), RoundState::Finished(RoundOutcome::Win(Marker::O)));
        assert_eq!(engine.to_move(), None);
        assert_eq!(engine.history().len(), 5);
    }

    #[test]
    fn test_replay_reports_rejected_step() {
        let err = RoundEngine::replay(Marker::O, &[4, 4]).unwrap_err();
        assert_eq!(
            err,
            ReplayError::Rejected {
                step: 1,
                error: PlacementError::CellOccupied(4),
            }
        );
    }

    #[test]
    fn test_replay_rejects_moves_after_finish() {
        let err = RoundEngine::replay(Marker::O, &[0, 3, 1, 4, 2, 5]).unwrap_err();
        assert_eq!(err, ReplayError::TrailingMoves { step: 5 });
    }

    #[test]
    fn test_invalid_moves_keep_the_turn() {
        let mut source = ScriptedSource::with_answers([
            Ok(4),
            Ok(4),
            Ok(12),
            Err(MoveSourceError::Unreadable("abc".to_string())),
            Ok(0),
        ]);
        let mut seats = Seats::shared(&mut source);
        let mut events: Vec<MatchEvent> = Vec::new();
        let mut engine = RoundEngine::new(Marker::O);

        assert_eq!(engine.step(&mut seats, &mut events), Ok(RoundState::AwaitingMove(Marker::X)));
        for _ in 0..3 {
            assert_eq!(engine.step(&mut seats, &mut events), Ok(RoundState::AwaitingMove(Marker::X)));
        }
        assert_eq!(engine.step(&mut seats, &mut events), Ok(RoundState::AwaitingMove(Marker::O)));
        assert_eq!(engine.rejections(), 3);
        drop(seats);

        assert_eq!(
            source.rejections(),
            &[
                (Marker::X, MoveRejection::Placement(PlacementError::CellOccupied(4))),
                (Marker::X, MoveRejection::Placement(PlacementError::OutOfRange(12))),
                (Marker::X, MoveRejection::Unreadable("abc".to_string())),
            ]
        );
    }

    #[test]
    fn test_exhausted_source_aborts() {
        let mut seats = Seats::shared(ScriptedSource::new([0, 1]));
        let mut events: Vec<MatchEvent> = Vec::new();
        let mut engine = RoundEngine::new(Marker::O);
        assert_eq!(
            engine.run(&mut seats, &mut events),
            Err(RoundError::SourceExhausted(Marker::O))
        );
    }

    #[test]
    fn test_step_after_finish_fails() {
        let mut engine = RoundEngine::replay(Marker::O, &[0, 3, 1, 4, 2]).unwrap();
        let mut seats = Seats::shared(ScriptedSource::new([8]));
        let mut events: Vec<MatchEvent> = Vec::new();
        assert_eq!(engine.step(&mut seats, &mut events), Err(RoundError::AlreadyFinished));
        assert!(events.is_empty());
    }
}
