//! Unique display names for participants.

use rustc_hash::FxHashMap;

use crate::core::{Participant, ParticipantId};
use crate::error::LobbyError;

/// Registered participants, unique by display name.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    names: FxHashMap<ParticipantId, String>,
    owners: FxHashMap<String, ParticipantId>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` under `name`, releasing any name it held before.
    ///
    /// Fails if another participant already holds `name`.
    pub fn register(&mut self, id: ParticipantId, name: &str) -> Result<Participant, LobbyError> {
        match self.owners.get(name) {
            Some(&owner) if owner != id => {
                return Err(LobbyError::PlayerNameTaken(name.to_string()));
            }
            Some(_) => return Ok(Participant::new(id, name)),
            None => {}
        }

        if let Some(previous) = self.names.insert(id, name.to_string()) {
            self.owners.remove(&previous);
        }
        self.owners.insert(name.to_string(), id);
        Ok(Participant::new(id, name))
    }

    #[must_use]
    pub fn name_of(&self, id: ParticipantId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn participant(&self, id: ParticipantId) -> Option<Participant> {
        self.name_of(id).map(|name| Participant::new(id, name))
    }

    #[must_use]
    pub fn is_taken(&self, name: &str) -> bool {
        self.owners.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
