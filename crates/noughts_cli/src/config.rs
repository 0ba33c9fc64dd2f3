//! Match configuration: TOML file, command-line overrides, round prompt.

use clap::ValueEnum;
use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_core::{FirstMover, Marker};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Opening policy as written in config files and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FirstMoverSetting {
    /// `o` opens every round
    #[default]
    FixedO,
    /// `x` opens every round
    FixedX,
    /// `o` opens round 1, then openers alternate
    Alternate,
    /// Whoever moved last in the previous round opens the next
    PreviousFinisher,
}

impl From<FirstMoverSetting> for FirstMover {
    fn from(setting: FirstMoverSetting) -> Self {
        match setting {
            FirstMoverSetting::FixedO => FirstMover::Fixed(Marker::O),
            FirstMoverSetting::FixedX => FirstMover::Fixed(Marker::X),
            FirstMoverSetting::Alternate => FirstMover::Alternate(Marker::O),
            FirstMoverSetting::PreviousFinisher => FirstMover::PreviousFinisher(Marker::O),
        }
    }
}

/// Settings for one match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Rounds to play; prompted for when absent.
    #[serde(default)]
    rounds: Option<u32>,

    /// Name of the player holding `o`.
    #[serde(default = "default_player_one")]
    player_one: String,

    /// Name of the player holding `x`.
    #[serde(default = "default_player_two")]
    player_two: String,

    /// Who opens each round.
    #[serde(default)]
    first_mover: FirstMoverSetting,
}

fn default_player_one() -> String {
    "Player 1".to_string()
}

fn default_player_two() -> String {
    "Player 2".to_string()
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rounds: None,
            player_one: default_player_one(),
            player_two: default_player_two(),
            first_mover: FirstMoverSetting::default(),
        }
    }
}

impl MatchConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(rounds = ?config.rounds, first_mover = ?config.first_mover, "Config loaded");
        Ok(config)
    }

    /// Applies command-line values over the file values.
    pub fn with_overrides(
        mut self,
        rounds: Option<u32>,
        player_one: Option<String>,
        player_two: Option<String>,
        first_mover: Option<FirstMoverSetting>,
    ) -> Self {
        if rounds.is_some() {
            self.rounds = rounds;
        }
        if let Some(name) = player_one {
            self.player_one = name;
        }
        if let Some(name) = player_two {
            self.player_two = name;
        }
        if let Some(setting) = first_mover {
            self.first_mover = setting;
        }
        self
    }
}

/// Parses a round count typed by a person.
///
/// # Errors
///
/// Non-numeric and negative input.
#[instrument]
pub fn parse_round_count(input: &str) -> Result<u32, ConfigError> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ConfigError::new(format!("{:?} is not a number", trimmed)))?;
    if value < 0 {
        return Err(ConfigError::new(format!("Round count cannot be negative: {}", value)));
    }
    u32::try_from(value).map_err(|_| ConfigError::new(format!("Round count too large: {}", value)))
}

/// Asks for a round count until a valid one is entered.
///
/// # Errors
///
/// Fails only if input ends or cannot be read.
#[instrument(skip(input, output))]
pub fn prompt_round_count<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<u32, ConfigError> {
    loop {
        write!(output, "How many rounds do you want to play? ")
            .and_then(|_| output.flush())
            .map_err(|e| ConfigError::new(format!("Failed to write prompt: {}", e)))?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .map_err(|e| ConfigError::new(format!("Failed to read round count: {}", e)))?;
        if read == 0 {
            return Err(ConfigError::new("No round count given".to_string()));
        }

        match parse_round_count(&line) {
            Ok(rounds) => return Ok(rounds),
            Err(err) => {
                warn!(error = %err.message, "Rejected round count");
                writeln!(output, "{} Please enter a whole number of rounds.", err.message)
                    .map_err(|e| ConfigError::new(format!("Failed to write prompt: {}", e)))?;
            }
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_round_count() {
        assert_eq!(parse_round_count("3\n").unwrap(), 3);
        assert_eq!(parse_round_count(" 0 ").unwrap(), 0);
        assert!(parse_round_count("-1").is_err());
        assert!(parse_round_count("three").is_err());
        assert!(parse_round_count("").is_err());
    }

    #[test]
    fn test_prompt_retries_until_valid() {
        let input = Cursor::new("lots\n-2\n4\n");
        let mut output = Vec::new();
        let rounds = prompt_round_count(input, &mut output).unwrap();
        assert_eq!(rounds, 4);

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("How many rounds do you want to play?").count(), 3);
        assert!(printed.contains("cannot be negative"));
    }

    #[test]
    fn test_prompt_fails_at_end_of_input() {
        let input = Cursor::new("");
        assert!(prompt_round_count(input, Vec::new()).is_err());
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let config = MatchConfig::default().with_overrides(
            Some(5),
            Some("Ada".to_string()),
            None,
            Some(FirstMoverSetting::Alternate),
        );
        assert_eq!(config.rounds(), &Some(5));
        assert_eq!(config.player_one(), "Ada");
        assert_eq!(config.player_two(), "Player 2");
        assert_eq!(config.first_mover(), &FirstMoverSetting::Alternate);
    }

    #[test]
    fn test_first_mover_setting_maps_to_policy() {
        assert_eq!(FirstMover::from(FirstMoverSetting::FixedX), FirstMover::Fixed(Marker::X));
        assert_eq!(
            FirstMover::from(FirstMoverSetting::PreviousFinisher),
            FirstMover::PreviousFinisher(Marker::O)
        );
    }
}
