//! Engine configuration types.
//!
//! - `BoardSize`: the three supported board sizes
//! - `RenderConfig`: glyphs used by the text renderer
//! - `LobbyConfig`: limits enforced on names and chat messages
//! - `EngineConfig`: combines all configuration
//!
//! All types are plain data with `Default` values, so a host can load them
//! from any serde format or build them with the `with_*` methods.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;

/// Supported board sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BoardSize {
    Nine,
    Thirteen,
    #[default]
    Nineteen,
}

impl BoardSize {
    pub const ALL: [BoardSize; 3] = [BoardSize::Nine, BoardSize::Thirteen, BoardSize::Nineteen];

    /// Number of lines in each direction.
    #[must_use]
    pub const fn lines(self) -> usize {
        match self {
            BoardSize::Nine => 9,
            BoardSize::Thirteen => 13,
            BoardSize::Nineteen => 19,
        }
    }

    /// Total number of intersections.
    #[must_use]
    pub const fn area(self) -> usize {
        self.lines() * self.lines()
    }
}

impl TryFrom<u32> for BoardSize {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            9 => Ok(BoardSize::Nine),
            13 => Ok(BoardSize::Thirteen),
            19 => Ok(BoardSize::Nineteen),
            other => Err(ConfigError::UnsupportedSize(other)),
        }
    }
}

impl From<BoardSize> for u32 {
    fn from(size: BoardSize) -> Self {
        size.lines() as u32
    }
}

impl FromStr for BoardSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::NotANumber(s.to_string()));
        }
        let value: u32 = trimmed
            .parse()
            .map_err(|_| ConfigError::UnsupportedSize(u32::MAX))?;
        BoardSize::try_from(value)
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0}x{0}", self.lines())
    }
}

/// Glyphs used when rendering a board as text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub black: char,
    pub white: char,
    pub empty: char,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            black: 'X',
            white: 'O',
            empty: '.',
        }
    }
}

impl RenderConfig {
    /// Replace the stone glyphs.
    #[must_use]
    pub fn with_stones(mut self, black: char, white: char) -> Self {
        self.black = black;
        self.white = white;
        self
    }

    /// Replace the empty-point glyph.
    #[must_use]
    pub fn with_empty(mut self, empty: char) -> Self {
        self.empty = empty;
        self
    }
}

/// Limits applied to user-supplied text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyConfig {
    /// Longest accepted offer or player name, in characters.
    pub max_name_len: usize,

    /// Longest accepted chat message, in characters.
    pub max_chat_len: usize,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            max_name_len: 64,
            max_chat_len: 1024,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub lobby: LobbyConfig,
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    #[must_use]
    pub fn with_max_name_len(mut self, len: usize) -> Self {
        self.lobby.max_name_len = len;
        self
    }

    #[must_use]
    pub fn with_max_chat_len(mut self, len: usize) -> Self {
        self.lobby.max_chat_len = len;
        self
    }
}
