//! Command bodies for `play` and `replay`, independent of the process streams.

use crate::cli::OutputFormat;
use crate::config::{ConfigError, MatchConfig, prompt_round_count};
use crate::render::{JsonSink, TextSink, outcome_message};
use crate::terminal::TerminalSource;
use derive_getters::Getters;
use derive_more::Display;
use noughts_core::{
    FirstMover, Marker, Match, MatchError, MatchSummary, Move, Player,
    ReplayError, RoundEngine, Seats, Snapshot,
};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tracing::{info, instrument};

/// Error from running a command.
#[derive(Debug, Display)]
pub enum SessionError {
    /// A replay position below 1.
    #[display("Positions start at 1, got {}", _0)]
    InvalidPosition(usize),
    /// Round count could not be obtained.
    #[display("{}", _0)]
    Config(ConfigError),
    /// The match stopped early.
    #[display("{}", _0)]
    Match(MatchError),
    /// The replayed moves do not form a legal round.
    #[display("{}", _0)]
    Replay(ReplayError),
    /// Output could not be written.
    #[display("Failed to write output: {}", _0)]
    Io(std::io::Error),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::InvalidPosition(_) => None,
            SessionError::Config(err) => Some(err),
            SessionError::Match(err) => Some(err),
            SessionError::Replay(err) => Some(err),
            SessionError::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<MatchError> for SessionError {
    fn from(err: MatchError) -> Self {
        Self::Match(err)
    }
}

impl From<ReplayError> for SessionError {
    fn from(err: ReplayError) -> Self {
        Self::Replay(err)
    }
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io(std::io::Error::from(err))
    }
}

/// Plays a hot-seat match.
///
/// Frames or events go to `screen`; prompts and rejection notes go to
/// `prompts`. Callers pick `prompts` with [`OutputFormat::prompts_on_stderr`].
///
/// # Errors
///
/// Fails if the round count cannot be read or a round runs out of input.
#[instrument(skip(config, input, screen, prompts), fields(rounds = ?config.rounds()))]
pub fn play_match<R, S, P>(
    config: &MatchConfig,
    format: OutputFormat,
    mut input: R,
    mut screen: S,
    mut prompts: P,
) -> Result<MatchSummary, SessionError>
where
    R: BufRead,
    S: Write,
    P: Write,
{
    if format == OutputFormat::Text {
        writeln!(screen, "Welcome to Tic Tac Toe")?;
    }

    let total_rounds = match config.rounds() {
        Some(rounds) => *rounds,
        None => prompt_round_count(&mut input, &mut prompts)?,
    };

    let mut game = Match::new(
        Player::new(Marker::O, config.player_one()),
        Player::new(Marker::X, config.player_two()),
        total_rounds,
    )?
    .with_first_mover(FirstMover::from(*config.first_mover()));
    info!(total_rounds, first_mover = ?game.first_mover(), "Starting match");

    let mut seats = Seats::shared(TerminalSource::new(input, prompts));
    let summary = match format {
        OutputFormat::Text => game.run(&mut seats, &mut TextSink::new(&mut screen))?,
        OutputFormat::Json => game.run(&mut seats, &mut JsonSink::new(&mut screen))?,
    };
    info!(
        rounds_played = summary.rounds_played(),
        ties = summary.ties(),
        leader = ?summary.leader(),
        "Match finished"
    );
    Ok(summary)
}

/// A replayed round: the moves applied and the resulting state.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ReplayReport {
    /// Moves in order.
    moves: Vec<Move>,
    /// State after the last move.
    snapshot: Snapshot,
}

/// Converts 1-based positions to board indices.
///
/// # Errors
///
/// [`SessionError::InvalidPosition`] for `0`.
pub fn replay_indices(positions: &[usize]) -> Result<Vec<usize>, SessionError> {
    positions
        .iter()
        .map(|&position| {
            position
                .checked_sub(1)
                .ok_or(SessionError::InvalidPosition(position))
        })
        .collect()
}

/// Replays one round from 1-based positions.
///
/// # Errors
///
/// A `0` position, a refused placement, or moves after the round ended.
#[instrument]
pub fn replay_report(positions: &[usize], opener: Marker) -> Result<ReplayReport, SessionError> {
    let indices = replay_indices(positions)?;
    let engine = RoundEngine::replay(opener, &indices)?;
    let snapshot = engine.snapshot();
    info!(moves = engine.history().len(), outcome = ?snapshot.outcome(), "Replayed round");
    Ok(ReplayReport {
        moves: engine.history().to_vec(),
        snapshot,
    })
}

/// Writes a replay as a text frame or a single JSON line.
///
/// # Errors
///
/// Fails if `out` cannot be written.
pub fn write_replay<W: Write>(
    report: &ReplayReport,
    format: OutputFormat,
    mut out: W,
) -> Result<(), SessionError> {
    match format {
        OutputFormat::Text => {
            let message = outcome_message(&report.snapshot);
            TextSink::new(&mut out).render_snapshot(&report.snapshot, message.as_deref());
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
