//! Append-only chat log attached to a session.
//!
//! Backed by an `im::Vector`, so handing a snapshot to a renderer while the
//! session keeps appending is an O(1) clone.

use im::Vector;
use serde::{Deserialize, Serialize};

/// One chat line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub sender: String,
    pub text: String,
}

impl std::fmt::Display for ChatEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.sender, self.text)
    }
}

/// Ordered chat history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    entries: Vector<ChatEntry>,
}

impl Chat {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: impl Into<String>, sender: impl Into<String>) {
        self.entries.push_back(ChatEntry {
            sender: sender.into(),
            text: text.into(),
        });
    }

    /// Whole history, one `sender: text` line per entry.
    #[must_use]
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatEntry> {
        self.entries.iter()
    }

    /// Cheap copy of the current history.
    #[must_use]
    pub fn snapshot(&self) -> Vector<ChatEntry> {
        self.entries.clone()
    }
}
