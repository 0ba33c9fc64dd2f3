//! Command-line interface for noughts.

use crate::config::FirstMoverSetting;
use clap::{Parser, Subcommand, ValueEnum};
use noughts_core::Marker;

/// Noughts - multi-round tic-tac-toe with cumulative scores
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Multi-round tic-tac-toe for two players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a hot-seat match on this terminal
    Play {
        /// Number of rounds. Prompted for when neither this nor the config sets it.
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Path to a TOML match config
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Name of the player holding `o`
        #[arg(long)]
        player_one: Option<String>,

        /// Name of the player holding `x`
        #[arg(long)]
        player_two: Option<String>,

        /// Who opens each round
        #[arg(long, value_enum)]
        first_mover: Option<FirstMoverSetting>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Replay one round from 1-based positions and show the result
    Replay {
        /// Positions 1-9, alternating markers from the opener
        #[arg(required = true, num_args = 1..)]
        positions: Vec<usize>,

        /// Marker that moves first
        #[arg(long, value_enum, default_value_t = MarkerArg::O)]
        opener: MarkerArg,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// How state is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Framed board for people
    Text,
    /// One JSON event per line
    Json,
}

impl OutputFormat {
    /// Prompts share stdout with text frames but would corrupt JSON lines.
    pub fn prompts_on_stderr(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// Marker choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarkerArg {
    /// Noughts
    O,
    /// Crosses
    X,
}

impl From<MarkerArg> for Marker {
    fn from(arg: MarkerArg) -> Self {
        match arg {
            MarkerArg::O => Marker::O,
            MarkerArg::X => Marker::X,
        }
    }
}
