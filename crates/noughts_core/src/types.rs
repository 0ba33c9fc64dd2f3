//! Core domain types for noughts and crosses.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::instrument;

/// Symbol a player places on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    /// Nought.
    #[display("o")]
    O,
    /// Cross.
    #[display("x")]
    X,
}

impl Marker {
    /// Returns the other marker.
    pub fn opponent(self) -> Self {
        match self {
            Marker::O => Marker::X,
            Marker::X => Marker::O,
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Cell holds a marker.
    Marked(Marker),
}

impl Cell {
    /// Returns the marker in this cell, if any.
    pub fn marker(self) -> Option<Marker> {
        match self {
            Cell::Empty => None,
            Cell::Marked(marker) => Some(marker),
        }
    }
}

/// One of the two participants of a match.
///
/// Marker and name are fixed at construction. The score is only ever
/// raised by [`Match`](crate::Match) between rounds.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Marker this player places.
    marker: Marker,
    /// Display name.
    name: String,
    /// Rounds won so far.
    score: u32,
}

impl Player {
    /// Creates a player with a zero score.
    #[instrument(skip(name), fields(name = %name.as_ref()))]
    pub fn new(marker: Marker, name: impl AsRef<str>) -> Self {
        Self {
            marker,
            name: name.as_ref().to_string(),
            score: 0,
        }
    }

    pub(crate) fn award_round(&mut self) {
        self.score += 1;
    }
}
