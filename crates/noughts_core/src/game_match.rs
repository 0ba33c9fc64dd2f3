//! Multi-round match with cumulative scoring.

use super::error::MatchError;
use super::outcome::RoundOutcome;
use super::round::{RoundContext, RoundEngine};
use super::seat::{PresentationSink, Seats};
use super::snapshot::{BoardSnapshot, MatchEvent, ScoreSnapshot, Snapshot};
use super::{Marker, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Who opens each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstMover {
    /// The same marker opens every round.
    Fixed(Marker),
    /// The given marker opens round 1, then the opener alternates.
    Alternate(Marker),
    /// Whoever made the final move of the previous round opens the next.
    /// The given marker opens round 1.
    PreviousFinisher(Marker),
}

impl Default for FirstMover {
    fn default() -> Self {
        FirstMover::Fixed(Marker::O)
    }
}

impl FirstMover {
    /// Opener for the round with 0-based index `round_index`.
    pub fn opener(&self, round_index: u32, previous_finisher: Option<Marker>) -> Marker {
        match *self {
            FirstMover::Fixed(marker) => marker,
            FirstMover::Alternate(marker) if round_index % 2 == 0 => marker,
            FirstMover::Alternate(marker) => marker.opponent(),
            FirstMover::PreviousFinisher(marker) => previous_finisher.unwrap_or(marker),
        }
    }
}

/// What happened in one completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct RoundRecord {
    /// 1-based round number.
    round: u32,
    /// Marker that opened the round.
    opener: Marker,
    /// Terminal outcome.
    outcome: RoundOutcome,
    /// Moves applied.
    moves: usize,
}

/// Final or interim standings of a match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Both players' scores.
    scores: [ScoreSnapshot; 2],
    /// Rounds configured.
    total_rounds: u32,
    /// Per-round results in order.
    rounds: Vec<RoundRecord>,
    /// Marker with the higher score, `None` when level.
    leader: Option<Marker>,
}

impl MatchSummary {
    /// Rounds completed.
    pub fn rounds_played(&self) -> usize {
        self.rounds.len()
    }

    /// Rounds that ended in a tie.
    pub fn ties(&self) -> usize {
        self.rounds
            .iter()
            .filter(|record| record.outcome == RoundOutcome::Tie)
            .count()
    }
}

/// Two players, a round budget, and the scores between them.
///
/// Each round gets a fresh [`RoundEngine`] and board. Scores are only
/// touched here, between rounds.
#[derive(Debug, Clone)]
pub struct Match {
    players: [Player; 2],
    total_rounds: u32,
    rounds_remaining: u32,
    first_mover: FirstMover,
    records: Vec<RoundRecord>,
    last_finisher: Option<Marker>,
    last_board: BoardSnapshot,
}

impl Match {
    /// Creates a match. Both players start on zero.
    ///
    /// # Errors
    ///
    /// [`MatchError::DuplicateMarker`] if both players hold the same marker.
    #[instrument(skip(player1, player2), fields(p1 = %player1.name(), p2 = %player2.name()))]
    pub fn new(player1: Player, player2: Player, total_rounds: u32) -> Result<Self, MatchError> {
        if player1.marker() == player2.marker() {
            return Err(MatchError::DuplicateMarker(*player1.marker()));
        }
        Ok(Self {
            players: [
                Player::new(*player1.marker(), player1.name()),
                Player::new(*player2.marker(), player2.name()),
            ],
            total_rounds,
            rounds_remaining: total_rounds,
            first_mover: FirstMover::default(),
            records: Vec::new(),
            last_finisher: None,
            last_board: BoardSnapshot::default(),
        })
    }

    /// Sets the opening policy.
    pub fn with_first_mover(mut self, first_mover: FirstMover) -> Self {
        self.first_mover = first_mover;
        self
    }

    /// Both players in construction order.
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Player holding `marker`.
    pub fn player(&self, marker: Marker) -> &Player {
        if *self.players[0].marker() == marker {
            &self.players[0]
        } else {
            &self.players[1]
        }
    }

    /// Rounds configured.
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Rounds still to play.
    pub fn rounds_remaining(&self) -> u32 {
        self.rounds_remaining
    }

    /// Opening policy.
    pub fn first_mover(&self) -> FirstMover {
        self.first_mover
    }

    /// True once no rounds remain.
    pub fn is_over(&self) -> bool {
        self.rounds_remaining == 0
    }

    /// Marker that will open the next round.
    pub fn next_opener(&self) -> Marker {
        let played = self.total_rounds - self.rounds_remaining;
        self.first_mover.opener(played, self.last_finisher)
    }

    /// Plays every remaining round, then reports the final standings.
    ///
    /// With zero rounds configured nothing is played and the final 0-0
    /// standings are reported at once.
    ///
    /// # Errors
    ///
    /// Propagates [`MatchError::Round`] if a round cannot complete.
    #[instrument(skip(self, seats, sink), fields(total_rounds = self.total_rounds))]
    pub fn run(
        &mut self,
        seats: &mut Seats<'_>,
        sink: &mut dyn PresentationSink,
    ) -> Result<MatchSummary, MatchError> {
        while !self.is_over() {
            self.play_round(seats, sink)?;
        }
        let summary = self.summary();
        info!(
            p1 = summary.scores[0].score(),
            p2 = summary.scores[1].score(),
            rounds = summary.rounds_played(),
            "Match finished"
        );
        let last_outcome = self.records.last().map(|record| record.outcome);
        sink.present(&MatchEvent::MatchFinished {
            snapshot: self.snapshot(last_outcome),
        });
        Ok(summary)
    }

    /// Plays exactly one round and applies its outcome to the scores.
    ///
    /// # Errors
    ///
    /// [`MatchError::NoRoundsRemaining`] if the match is over,
    /// [`MatchError::Round`] if the round cannot complete.
    #[instrument(skip(self, seats, sink), fields(remaining = self.rounds_remaining))]
    pub fn play_round(
        &mut self,
        seats: &mut Seats<'_>,
        sink: &mut dyn PresentationSink,
    ) -> Result<RoundOutcome, MatchError> {
        if self.is_over() {
            return Err(MatchError::NoRoundsRemaining);
        }

        let round = self.total_rounds - self.rounds_remaining + 1;
        let opener = self.next_opener();
        let context = RoundContext::new(
            round,
            self.total_rounds,
            self.rounds_remaining,
            self.score_snapshots(),
        );
        let mut engine = RoundEngine::with_context(opener, context);
        let outcome = engine.run(seats, sink)?;

        if let Some(marker) = outcome.winner() {
            self.player_mut(marker).award_round();
        }
        self.rounds_remaining -= 1;
        self.last_finisher = engine.last_mover();
        self.last_board = engine.board().snapshot();
        self.records
            .push(RoundRecord::new(round, opener, outcome, engine.history().len()));

        info!(round, %opener, %outcome, remaining = self.rounds_remaining, "Round scored");
        sink.present(&MatchEvent::RoundFinished {
            snapshot: self.snapshot(Some(outcome)),
        });
        Ok(outcome)
    }

    /// Current standings.
    pub fn summary(&self) -> MatchSummary {
        let [first, second] = &self.players;
        let leader = match first.score().cmp(second.score()) {
            std::cmp::Ordering::Greater => Some(*first.marker()),
            std::cmp::Ordering::Less => Some(*second.marker()),
            std::cmp::Ordering::Equal => None,
        };
        MatchSummary {
            scores: self.score_snapshots(),
            total_rounds: self.total_rounds,
            rounds: self.records.clone(),
            leader,
        }
    }

    /// Match-level view after a round; `outcome` is `None` before any round.
    fn snapshot(&self, outcome: Option<RoundOutcome>) -> Snapshot {
        Snapshot::new(
            self.total_rounds - self.rounds_remaining,
            self.total_rounds,
            self.rounds_remaining,
            self.last_board,
            None,
            self.last_finisher,
            outcome,
            self.score_snapshots(),
        )
    }

    fn score_snapshots(&self) -> [ScoreSnapshot; 2] {
        [
            ScoreSnapshot::from(&self.players[0]),
            ScoreSnapshot::from(&self.players[1]),
        ]
    }

    fn player_mut(&mut self, marker: Marker) -> &mut Player {
        if *self.players[0].marker() == marker {
            &mut self.players[0]
        } else {
            &mut self.players[1]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedSource;

    fn players() -> (Player, Player) {
        (Player::new(Marker::O, "Player 1"), Player::new(Marker::X, "Player 2"))
    }

    #[test]
    fn test_duplicate_marker_rejected() {
        let result = Match::new(
            Player::new(Marker::X, "a"),
            Player::new(Marker::X, "b"),
            1,
        );
        assert!(matches!(result, Err(MatchError::DuplicateMarker(Marker::X))));
    }

    #[test]
    fn test_fixed_opener_every_round() {
        let policy = FirstMover::Fixed(Marker::O);
        for round in 0..4 {
            assert_eq!(policy.opener(round, Some(Marker::X)), Marker::O);
        }
    }

    #[test]
    fn test_alternate_opener() {
        let policy = FirstMover::Alternate(Marker::X);
        assert_eq!(policy.opener(0, None), Marker::X);
        assert_eq!(policy.opener(1, None), Marker::O);
        assert_eq!(policy.opener(2, None), Marker::X);
    }

    #[test]
    fn test_previous_finisher_opener() {
        let policy = FirstMover::PreviousFinisher(Marker::O);
        assert_eq!(policy.opener(0, None), Marker::O);
        assert_eq!(policy.opener(1, Some(Marker::X)), Marker::X);
    }

    #[test]
    fn test_play_round_scores_winner() {
        let (p1, p2) = players();
        let mut game = Match::new(p1, p2, 2).unwrap();
        let mut seats = Seats::shared(ScriptedSource::new([0, 3, 1, 4, 2]));
        let mut events: Vec<MatchEvent> = Vec::new();

        let outcome = game.play_round(&mut seats, &mut events).unwrap();
        assert_eq!(outcome, RoundOutcome::Win(Marker::O));
        assert_eq!(*game.player(Marker::O).score(), 1);
        assert_eq!(*game.player(Marker::X).score(), 0);
        assert_eq!(game.rounds_remaining(), 1);
        assert!(matches!(events.last(), Some(MatchEvent::RoundFinished { .. })));
    }

    #[test]
    fn test_play_round_when_over_fails() {
        let (p1, p2) = players();
        let mut game = Match::new(p1, p2, 0).unwrap();
        let mut seats = Seats::shared(ScriptedSource::default());
        let mut events: Vec<MatchEvent> = Vec::new();
        assert_eq!(
            game.play_round(&mut seats, &mut events),
            Err(MatchError::NoRoundsRemaining)
        );
    }
}
