//! Presentation sinks for the terminal.

use noughts_core::{MatchEvent, PresentationSink, RoundOutcome, Snapshot};
use std::io::Write;
use tracing::warn;

/// Draws a framed board for people.
pub struct TextSink<W> {
    output: W,
}

impl<W: Write> TextSink<W> {
    /// Creates a sink writing to `output`.
    pub fn new(output: W) -> Self {
        Self { output }
    }

    /// Writes one frame for `snapshot`, with an optional closing message.
    pub fn render_snapshot(&mut self, snapshot: &Snapshot, message: Option<&str>) {
        let text = frame(snapshot, message);
        if let Err(e) = self.output.write_all(text.as_bytes()).and_then(|_| self.output.flush()) {
            warn!(error = %e, "Failed to write frame");
        }
    }
}

impl<W: Write> PresentationSink for TextSink<W> {
    fn present(&mut self, event: &MatchEvent) {
        match event {
            MatchEvent::RoundStarted { snapshot } => self.render_snapshot(snapshot, None),
            // The finished board is drawn once, with the result.
            MatchEvent::MoveApplied { snapshot, .. }
                if !snapshot.outcome().is_some_and(|outcome| outcome.is_terminal()) =>
            {
                self.render_snapshot(snapshot, None)
            }
            MatchEvent::MoveApplied { .. } => {}
            // The move source tells the player what went wrong.
            MatchEvent::MoveRejected { .. } => {}
            MatchEvent::RoundFinished { snapshot } => {
                let message = outcome_message(snapshot);
                self.render_snapshot(snapshot, message.as_deref());
            }
            MatchEvent::MatchFinished { snapshot } => {
                let line = match_result(snapshot);
                if let Err(e) = writeln!(self.output, "{}", line).and_then(|_| self.output.flush()) {
                    warn!(error = %e, "Failed to write match result");
                }
            }
        }
    }
}

/// Writes each event as one JSON object per line.
pub struct JsonSink<W> {
    output: W,
}

impl<W: Write> JsonSink<W> {
    /// Creates a sink writing to `output`.
    pub fn new(output: W) -> Self {
        Self { output }
    }
}

impl<W: Write> PresentationSink for JsonSink<W> {
    fn present(&mut self, event: &MatchEvent) {
        let written = serde_json::to_writer(&mut self.output, event)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(self.output))
            .and_then(|_| self.output.flush());
        if let Err(e) = written {
            warn!(error = %e, "Failed to write event");
        }
    }
}

/// `"{name} wins."`, `"Draw."`, or nothing while the round is live.
pub fn outcome_message(snapshot: &Snapshot) -> Option<String> {
    match snapshot.outcome().as_ref()? {
        RoundOutcome::Win(marker) => {
            let name = snapshot
                .score_for(*marker)
                .map(|entry| entry.name().clone())
                .unwrap_or_else(|| marker.to_string());
            Some(format!("{} wins.", name))
        }
        RoundOutcome::Tie => Some("Draw.".to_string()),
        RoundOutcome::InProgress => None,
    }
}

fn match_result(snapshot: &Snapshot) -> String {
    let [first, second] = snapshot.scores();
    let leader = if first.score() > second.score() {
        Some(first)
    } else if second.score() > first.score() {
        Some(second)
    } else {
        None
    };
    match leader {
        Some(entry) => format!(
            "Match over. {} wins {} to {}.",
            entry.name(),
            first.score().max(second.score()),
            first.score().min(second.score())
        ),
        None => format!("Match over. Level at {} each.", first.score()),
    }
}

/// Renders the full frame as a string.
pub fn frame(snapshot: &Snapshot, message: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str("\n---------\n");
    out.push_str(&format!(
        "  Rounds: {} of {}\n\n",
        snapshot.rounds_remaining(),
        snapshot.total_rounds()
    ));

    if let Some(marker) = snapshot.current() {
        let name = snapshot
            .score_for(marker)
            .map(|entry| entry.name().as_str())
            .unwrap_or("?");
        out.push_str(&format!("  Current player: {}\n", name));
        out.push_str(&format!("    Marker: {}\n\n", marker));
    }

    out.push_str("  Board\n\n");
    for line in snapshot.board().to_string().lines() {
        out.push_str(&format!("   {}\n", line));
    }

    let [first, second] = snapshot.scores();
    out.push_str("\n  Scores\n\n");
    out.push_str(&format!(
        "    {}: {}  |  {}: {}\n",
        first.name(),
        first.score(),
        second.name(),
        second.score()
    ));

    if let Some(message) = message {
        out.push_str(&format!("\n  {}\n", message));
    }
    out.push_str("---------\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_core::{Marker, RoundEngine};

    #[test]
    fn test_frame_shows_turn_and_board() {
        let engine = RoundEngine::replay(Marker::O, &[0, 4]).unwrap();
        let text = frame(&engine.snapshot(), None);

        assert!(text.contains("Rounds: 1 of 1"));
        assert!(text.contains("Current player: Player 1"));
        assert!(text.contains("Marker: o"));
        assert!(text.contains("    o | 2 | 3 "));
        assert!(text.contains("    4 | x | 6 "));
        assert!(text.contains("Player 1: 0  |  Player 2: 0"));
    }

    #[test]
    fn test_finished_round_message() {
        let engine = RoundEngine::replay(Marker::X, &[0, 3, 1, 4, 2]).unwrap();
        let snapshot = engine.snapshot();
        assert_eq!(outcome_message(&snapshot), Some("Player 2 wins.".to_string()));

        let text = frame(&snapshot, outcome_message(&snapshot).as_deref());
        assert!(text.contains("Current player: Player 2"));
        assert!(text.contains("Marker: x"));
        assert!(text.contains("Player 2 wins."));
    }

    #[test]
    fn test_text_sink_skips_rejections() {
        let engine = RoundEngine::new(Marker::O);
        let mut output = Vec::new();
        {
            let mut sink = TextSink::new(&mut output);
            sink.present(&MatchEvent::MoveRejected {
                marker: Marker::O,
                rejection: noughts_core::MoveRejection::Unreadable("q".to_string()),
                snapshot: engine.snapshot(),
            });
        }
        assert!(output.is_empty());
    }

    #[test]
    fn test_json_sink_writes_one_line_per_event() {
        let engine = RoundEngine::new(Marker::O);
        let mut output = Vec::new();
        {
            let mut sink = JsonSink::new(&mut output);
            sink.present(&MatchEvent::RoundStarted { snapshot: engine.snapshot() });
            sink.present(&MatchEvent::MatchFinished { snapshot: engine.snapshot() });
        }
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "round_started");
        assert_eq!(first["snapshot"]["to_move"], "o");
    }
}
