//! Collaborator seams: where moves come from and where state goes.

use super::action::MoveRejection;
use super::error::MoveSourceError;
use super::snapshot::{BoardSnapshot, MatchEvent};
use super::Marker;
use std::collections::VecDeque;
use tracing::debug;

/// Something that can choose moves for a marker.
///
/// Calls block until an answer is available.
pub trait MoveSource {
    /// Picks a board index (0-8) for `marker` to play on `board`.
    ///
    /// Returning [`MoveSourceError::Unreadable`] makes the engine ask again;
    /// [`MoveSourceError::Exhausted`] aborts the round.
    fn next_move(&mut self, marker: Marker, board: &BoardSnapshot) -> Result<usize, MoveSourceError>;

    /// Told when the previous answer was refused. The next call is for the
    /// same marker.
    fn reject(&mut self, _marker: Marker, _rejection: &MoveRejection) {}
}

impl<S: MoveSource + ?Sized> MoveSource for &mut S {
    fn next_move(&mut self, marker: Marker, board: &BoardSnapshot) -> Result<usize, MoveSourceError> {
        (**self).next_move(marker, board)
    }

    fn reject(&mut self, marker: Marker, rejection: &MoveRejection) {
        (**self).reject(marker, rejection)
    }
}

/// Receives state updates to render.
pub trait PresentationSink {
    /// Handles one event.
    fn present(&mut self, event: &MatchEvent);
}

/// Collects every event; handy for tests and post-mortems.
impl PresentationSink for Vec<MatchEvent> {
    fn present(&mut self, event: &MatchEvent) {
        self.push(event.clone());
    }
}

/// Binds each marker to the source that chooses its moves.
pub enum Seats<'a> {
    /// One source plays both markers (hot-seat on a single terminal).
    Shared(Box<dyn MoveSource + 'a>),
    /// A separate source per marker.
    Split {
        /// Source for `o`.
        o: Box<dyn MoveSource + 'a>,
        /// Source for `x`.
        x: Box<dyn MoveSource + 'a>,
    },
}

impl<'a> Seats<'a> {
    /// One source for both markers.
    pub fn shared(source: impl MoveSource + 'a) -> Self {
        Seats::Shared(Box::new(source))
    }

    /// Separate sources for `o` and `x`.
    pub fn split(o: impl MoveSource + 'a, x: impl MoveSource + 'a) -> Self {
        Seats::Split {
            o: Box::new(o),
            x: Box::new(x),
        }
    }

    /// Source seated for `marker`.
    pub fn source_for(&mut self, marker: Marker) -> &mut (dyn MoveSource + 'a) {
        match (self, marker) {
            (Seats::Shared(source), _) => source.as_mut(),
            (Seats::Split { o, .. }, Marker::O) => o.as_mut(),
            (Seats::Split { x, .. }, Marker::X) => x.as_mut(),
        }
    }
}

impl std::fmt::Debug for Seats<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seats::Shared(_) => write!(f, "Seats::Shared"),
            Seats::Split { .. } => write!(f, "Seats::Split"),
        }
    }
}

/// Plays a fixed list of answers in order.
///
/// Answers are handed out regardless of which marker asks, so a single
/// script can drive a whole shared-seat match.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    answers: VecDeque<Result<usize, MoveSourceError>>,
    rejections: Vec<(Marker, MoveRejection)>,
}

impl ScriptedSource {
    /// Script of board indices.
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            answers: indices.into_iter().map(Ok).collect(),
            rejections: Vec::new(),
        }
    }

    /// Script that may include unreadable answers.
    pub fn with_answers(answers: impl IntoIterator<Item = Result<usize, MoveSourceError>>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            rejections: Vec::new(),
        }
    }

    /// Rejections reported so far.
    pub fn rejections(&self) -> &[(Marker, MoveRejection)] {
        &self.rejections
    }
}

impl MoveSource for ScriptedSource {
    fn next_move(&mut self, marker: Marker, _board: &BoardSnapshot) -> Result<usize, MoveSourceError> {
        let answer = self.answers.pop_front().unwrap_or(Err(MoveSourceError::Exhausted));
        debug!(%marker, ?answer, remaining = self.answers.len(), "Scripted answer");
        answer
    }

    fn reject(&mut self, marker: Marker, rejection: &MoveRejection) {
        self.rejections.push((marker, rejection.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_source_runs_dry() {
        let mut source = ScriptedSource::new([4]);
        let board = BoardSnapshot::default();
        assert_eq!(source.next_move(Marker::O, &board), Ok(4));
        assert_eq!(source.next_move(Marker::X, &board), Err(MoveSourceError::Exhausted));
    }

    #[test]
    fn test_split_seats_route_by_marker() {
        let mut seats = Seats::split(ScriptedSource::new([0]), ScriptedSource::new([8]));
        let board = BoardSnapshot::default();
        assert_eq!(seats.source_for(Marker::X).next_move(Marker::X, &board), Ok(8));
        assert_eq!(seats.source_for(Marker::O).next_move(Marker::O, &board), Ok(0));
    }

    #[test]
    fn test_shared_seat_serves_both_markers() {
        let mut seats = Seats::shared(ScriptedSource::new([1, 2]));
        let board = BoardSnapshot::default();
        assert_eq!(seats.source_for(Marker::O).next_move(Marker::O, &board), Ok(1));
        assert_eq!(seats.source_for(Marker::X).next_move(Marker::X, &board), Ok(2));
    }
}
