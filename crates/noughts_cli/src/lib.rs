//! Noughts CLI - terminal front end for noughts_core
//!
//! # Architecture
//!
//! - **cli**: clap command definitions (`play`, `replay`)
//! - **config**: TOML match config, flag overrides, round-count prompt
//! - **terminal**: hot-seat [`MoveSource`](noughts_core::MoveSource) over stdin
//! - **render**: text and JSON [`PresentationSink`](noughts_core::PresentationSink)s
//! - **session**: `play` and `replay` bodies over injected streams

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod render;
mod session;
mod terminal;

// Crate-level exports - Command line
pub use cli::{Cli, Command, MarkerArg, OutputFormat};

// Crate-level exports - Configuration
pub use config::{ConfigError, FirstMoverSetting, MatchConfig, parse_round_count, prompt_round_count};

// Crate-level exports - Commands
pub use session::{
    ReplayReport, SessionError, play_match, replay_indices, replay_report, write_replay,
};

// Crate-level exports - Terminal I/O
pub use render::{JsonSink, TextSink, frame, outcome_message};
pub use terminal::{TerminalSource, parse_position};
