//! Match config loading and a scripted terminal session.

use noughts_cli::{FirstMoverSetting, MatchConfig, TerminalSource, TextSink};
use noughts_core::{FirstMover, Marker, Match, Player, Seats};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_full_config_file() {
    let file = write_config(
        r#"
rounds = 3
player_one = "Ada"
player_two = "Grace"
first_mover = "previous-finisher"
"#,
    );

    let config = MatchConfig::from_file(file.path()).expect("config loads");

    assert_eq!(config.rounds(), &Some(3));
    assert_eq!(config.player_one(), "Ada");
    assert_eq!(config.player_two(), "Grace");
    assert_eq!(config.first_mover(), &FirstMoverSetting::PreviousFinisher);
}

#[test]
fn test_missing_fields_use_defaults() {
    let file = write_config("rounds = 1\n");

    let config = MatchConfig::from_file(file.path()).expect("config loads");

    assert_eq!(config.player_one(), "Player 1");
    assert_eq!(config.player_two(), "Player 2");
    assert_eq!(config.first_mover(), &FirstMoverSetting::FixedO);
}

#[test]
fn test_negative_rounds_are_rejected() {
    let file = write_config("rounds = -2\n");
    assert!(MatchConfig::from_file(file.path()).is_err());
}

#[test]
fn test_unknown_policy_is_rejected() {
    let file = write_config("first_mover = \"coin-toss\"\n");
    let err = MatchConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = MatchConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_scripted_terminal_session() {
    // Round 1: o takes the top row after x retries a taken cell.
    let input = Cursor::new("1\n1\n4\n2\nnine\n5\n3\n");
    let mut prompts = Vec::new();
    let mut screen = Vec::new();

    let summary = {
        let mut game = Match::new(
            Player::new(Marker::O, "Ada"),
            Player::new(Marker::X, "Grace"),
            1,
        )
        .expect("distinct markers")
        .with_first_mover(FirstMover::from(FirstMoverSetting::FixedO));
        let mut seats = Seats::shared(TerminalSource::new(input, &mut prompts));
        let mut sink = TextSink::new(&mut screen);
        game.run(&mut seats, &mut sink).expect("match runs")
    };

    assert_eq!(summary.leader(), &Some(Marker::O));

    let prompts = String::from_utf8(prompts).unwrap();
    assert!(prompts.contains("Position 1 is already taken."));
    assert!(prompts.contains("\"nine\" is not a position."));

    let screen = String::from_utf8(screen).unwrap();
    assert!(screen.contains("Ada wins."));
    assert!(screen.contains("Ada: 1  |  Grace: 0"));
    assert!(screen.contains("Match over. Ada wins 1 to 0."));
}
