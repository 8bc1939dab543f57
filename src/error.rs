//! Error types for caller-contract violations.
//!
//! Board moves report their result as an `Outcome`; the enums here cover the
//! cases where the caller asked for something the current state does not
//! allow (wrong turn, wrong phase, unknown session). None of them leave state
//! half-modified.

use thiserror::Error;

/// Why move notation could not be resolved to a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("notation must be a lowercase column letter followed by a row number")]
    Malformed,
    #[error("position is outside the board")]
    OutOfBounds,
}

/// Configuration values that could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("size can be only 9, 13 or 19 (got {0})")]
    UnsupportedSize(u32),
    #[error("expected a number, got {0:?}")]
    NotANumber(String),
}

/// Dead-stone negotiation called out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NegotiationError {
    #[error("the game has not ended yet")]
    NotEnded,
    #[error("the opponent has not finished marking dead stones")]
    OpponentNotReady,
    #[error("dead stones were already committed")]
    AlreadyCommitted,
    #[error("the game has already been scored")]
    AlreadyScored,
}

/// Session-level rejections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("you are not playing in this game")]
    NotAParticipant,
    #[error("not your turn")]
    NotYourTurn,
    #[error("the game is over, dead stones are being negotiated")]
    GameOver,
    #[error("the game is closed")]
    Closed,
    #[error("chat message is empty")]
    EmptyMessage,
    #[error("chat message is longer than {max} characters")]
    MessageTooLong { max: usize },
    #[error(transparent)]
    Negotiation(#[from] NegotiationError),
}

/// Lobby and registry rejections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    #[error("a game named {0:?} already exists")]
    NameTaken(String),
    #[error("no game named {0:?}")]
    NotFound(String),
    #[error("game {0:?} belongs to another player")]
    NotOwner(String),
    #[error("no game is being created")]
    NoDraft,
    #[error("the game {0} has not been set")]
    DraftIncomplete(&'static str),
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("the player name {0:?} is already taken")]
    PlayerNameTaken(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}
