//! Noughts - play or replay multi-round tic-tac-toe on a terminal.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use noughts_cli::{
    Cli, Command, FirstMoverSetting, MarkerArg, MatchConfig, OutputFormat, play_match,
    replay_report, write_replay,
};
use noughts_core::Marker;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // stdout carries the game, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play {
            rounds,
            config,
            player_one,
            player_two,
            first_mover,
            format,
        } => run_play(config, rounds, player_one, player_two, first_mover, format),
        Command::Replay {
            positions,
            opener,
            format,
        } => run_replay(positions, opener, format),
    }
}

/// Plays a hot-seat match on this terminal.
#[instrument(skip(player_one, player_two))]
fn run_play(
    config_path: Option<PathBuf>,
    rounds: Option<u32>,
    player_one: Option<String>,
    player_two: Option<String>,
    first_mover: Option<FirstMoverSetting>,
    format: OutputFormat,
) -> Result<()> {
    let config = match config_path {
        Some(path) => MatchConfig::from_file(&path)
            .with_context(|| format!("Loading {}", path.display()))?,
        None => MatchConfig::default(),
    }
    .with_overrides(rounds, player_one, player_two, first_mover);
    debug!(?config, "Resolved match config");

    let prompts: Box<dyn Write> = if format.prompts_on_stderr() {
        Box::new(std::io::stderr())
    } else {
        Box::new(std::io::stdout())
    };
    play_match(&config, format, std::io::stdin().lock(), std::io::stdout(), prompts)?;
    Ok(())
}

/// Rebuilds one round from 1-based positions and prints it.
#[instrument]
fn run_replay(positions: Vec<usize>, opener: MarkerArg, format: OutputFormat) -> Result<()> {
    let report = replay_report(&positions, Marker::from(opener))?;
    write_replay(&report, format, std::io::stdout().lock())?;
    Ok(())
}
