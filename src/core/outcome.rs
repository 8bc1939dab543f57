//! Result codes returned by board operations.
//!
//! Every rejection leaves the board untouched; the caller re-prompts the
//! same participant.

use serde::{Deserialize, Serialize};

use crate::error::NotationError;

/// Closed set of board operation results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The operation was applied.
    Accepted,
    /// Notation has the wrong shape.
    InvalidNotation,
    /// Notation is well-formed but names a point off the board.
    InvalidPosition,
    /// The point already holds a stone.
    PlaceTaken,
    /// The second consecutive pass ended the game, or the game is already over.
    GameEnded,
    /// Reserved: placement would leave the placed group without liberties.
    /// Self-capture is currently resolved by the capture pass instead.
    IllegalSuicide,
    /// Reserved: placement would repeat an earlier position.
    IllegalKo,
}

impl Outcome {
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Outcome::Accepted)
    }

    /// Human-readable text for relaying to the participant.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Outcome::Accepted => "Accepted",
            Outcome::InvalidNotation => "Invalid move notation, use a column letter and a row number like c3",
            Outcome::InvalidPosition => "That position is outside the board",
            Outcome::PlaceTaken => "That place is already taken",
            Outcome::GameEnded => "The game has ended",
            Outcome::IllegalSuicide => "Suicide moves are not allowed",
            Outcome::IllegalKo => "Ko: that move repeats an earlier position",
        }
    }
}

impl From<NotationError> for Outcome {
    fn from(err: NotationError) -> Self {
        match err {
            NotationError::Malformed => Outcome::InvalidNotation,
            NotationError::OutOfBounds => Outcome::InvalidPosition,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
