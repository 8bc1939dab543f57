//! Pending game offers and the drafts they are built from.
//!
//! An offer exists from creation until a second participant joins it. Its
//! fields are gathered one conversational turn at a time in an
//! `OfferDraft`; nothing is checked until the draft is finished.

use serde::{Deserialize, Serialize};

use crate::core::{BoardSize, Participant};
use crate::error::LobbyError;

/// Identifier assigned to an offer at creation. Increases monotonically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OfferId(pub u64);

impl std::fmt::Display for OfferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Offer({})", self.0)
    }
}

/// A game waiting for an opponent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOffer {
    pub id: OfferId,
    pub creator: Participant,
    pub name: String,
    pub size: BoardSize,
}

impl std::fmt::Display for PendingOffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}\n    size: {}", self.creator, self.name, self.size)
    }
}

/// An offer under construction by one creator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OfferDraft {
    creator: Participant,
    name: Option<String>,
    size: Option<BoardSize>,
}

impl OfferDraft {
    #[must_use]
    pub fn new(creator: Participant) -> Self {
        Self {
            creator,
            name: None,
            size: None,
        }
    }

    #[must_use]
    pub fn creator(&self) -> &Participant {
        &self.creator
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn size(&self) -> Option<BoardSize> {
        self.size
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_size(&mut self, size: BoardSize) -> &mut Self {
        self.size = Some(size);
        self
    }

    /// Check that every required field is present.
    pub fn finish(&self) -> Result<(String, BoardSize), LobbyError> {
        let name = self.name.clone().ok_or(LobbyError::DraftIncomplete("name"))?;
        let size = self.size.ok_or(LobbyError::DraftIncomplete("size"))?;
        Ok((name, size))
    }
}

/// Registry key for a name as typed by a user.
pub(crate) fn lookup_key(raw: &str) -> &str {
    raw.trim()
}

/// Trim and bound a user-chosen name.
pub(crate) fn normalize_name(raw: &str, max_len: usize) -> Result<String, LobbyError> {
    let name = lookup_key(raw);
    if name.is_empty() {
        return Err(LobbyError::InvalidName("name is empty".to_string()));
    }
    if name.chars().count() > max_len {
        return Err(LobbyError::InvalidName(format!("name is longer than {max_len} characters")));
    }
    Ok(name.to_string())
}
