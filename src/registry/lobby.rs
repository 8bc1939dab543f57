//! The lobby: pending offers, live sessions, drafts and the roster.
//!
//! ## Locking
//!
//! - Offers and sessions share one registry lock so a name is unique across
//!   both at all times.
//! - Drafts and the roster each have their own lock.
//! - Every session sits behind its own mutex inside a `SessionHandle`.
//!
//! Session operations clone the handle under the registry lock, release it,
//! and only then lock the session. Distinct sessions never contend; two
//! moves on the same session are serialized by its mutex.

use std::ops::Deref;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use super::offer::{lookup_key, normalize_name, OfferDraft, OfferId, PendingOffer};
use super::roster::Roster;
use crate::core::{BoardSize, EngineConfig, Outcome, Participant, ParticipantId};
use crate::error::{LobbyError, SessionError};
use crate::session::{Event, Reply, Session};

/// Shared, lockable reference to a live session.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    name: Arc<str>,
    creator: ParticipantId,
    opponent: ParticipantId,
    inner: Arc<Mutex<Session>>,
}

impl SessionHandle {
    fn new(session: Session) -> Self {
        Self {
            name: Arc::from(session.name()),
            creator: session.creator().id,
            opponent: session.opponent().id,
            inner: Arc::new(Mutex::new(session)),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `who` plays in this session. Does not take the session lock.
    #[must_use]
    pub fn involves(&self, who: ParticipantId) -> bool {
        self.creator == who || self.opponent == who
    }

    /// Read access to the session, holding its lock until dropped.
    ///
    /// State changes go through `Lobby`, which drops sessions from the
    /// registry once they close.
    ///
    /// ```compile_fail
    /// use rust_go::{BoardSize, EngineConfig, Lobby, Participant, ParticipantId};
    ///
    /// let lobby = Lobby::new(EngineConfig::default());
    /// let alice = Participant::new(ParticipantId(1), "alice");
    /// lobby.create_offer(alice.clone(), "g", BoardSize::Nine).unwrap();
    /// let joined = lobby.join_offer("g", alice).unwrap();
    /// joined.session.lock().resign(ParticipantId(1)).unwrap();
    /// ```
    pub fn lock(&self) -> SessionView<'_> {
        SessionView(self.inner.lock())
    }

    fn lock_mut(&self) -> MutexGuard<'_, Session> {
        self.inner.lock()
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &SessionHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Locked, read-only view of a session.
pub struct SessionView<'a>(MutexGuard<'a, Session>);

impl Deref for SessionView<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.0
    }
}

/// Result of joining an offer.
#[derive(Debug)]
pub struct Joined {
    pub session: SessionHandle,
    /// Tells the creator who joined.
    pub reply: Reply,
}

#[derive(Default)]
struct Tables {
    offers: FxHashMap<String, PendingOffer>,
    sessions: FxHashMap<String, SessionHandle>,
    next_offer: u64,
}

impl Tables {
    fn name_taken(&self, name: &str) -> bool {
        self.offers.contains_key(name) || self.sessions.contains_key(name)
    }
}

/// Process-wide registry of offers and sessions.
#[derive(Default)]
pub struct Lobby {
    config: EngineConfig,
    tables: Mutex<Tables>,
    drafts: Mutex<FxHashMap<ParticipantId, OfferDraft>>,
    roster: Mutex<Roster>,
}

impl Lobby {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Roster ===

    /// Register or rename a participant.
    pub fn register_player(&self, id: ParticipantId, name: &str) -> Result<Participant, LobbyError> {
        let name = normalize_name(name, self.config.lobby.max_name_len)?;
        let participant = self.roster.lock().register(id, &name)?;
        info!(participant = %id, name = %participant.name, "Player registered");
        Ok(participant)
    }

    #[must_use]
    pub fn player(&self, id: ParticipantId) -> Option<Participant> {
        self.roster.lock().participant(id)
    }

    // === Offers ===

    /// Whether `name` is free for a new offer right now.
    #[must_use]
    pub fn name_available(&self, name: &str) -> bool {
        !self.tables.lock().name_taken(lookup_key(name))
    }

    /// Create a pending offer.
    pub fn create_offer(&self, creator: Participant, name: &str, size: BoardSize) -> Result<OfferId, LobbyError> {
        let name = normalize_name(name, self.config.lobby.max_name_len)?;
        let mut tables = self.tables.lock();
        if tables.name_taken(&name) {
            return Err(LobbyError::NameTaken(name));
        }

        let id = OfferId(tables.next_offer);
        tables.next_offer += 1;
        info!(offer = %id, name = %name, creator = %creator.id, %size, "Offer created");
        tables.offers.insert(
            name.clone(),
            PendingOffer {
                id,
                creator,
                name,
                size,
            },
        );
        Ok(id)
    }

    /// Delete a pending offer. Only its creator may do so.
    pub fn delete_offer(&self, name: &str, requester: ParticipantId) -> Result<PendingOffer, LobbyError> {
        let name = lookup_key(name);
        let mut tables = self.tables.lock();
        let offer = tables
            .offers
            .get(name)
            .ok_or_else(|| LobbyError::NotFound(name.to_string()))?;
        if offer.creator.id != requester {
            return Err(LobbyError::NotOwner(name.to_string()));
        }

        let removed = tables
            .offers
            .remove(name)
            .ok_or_else(|| LobbyError::NotFound(name.to_string()))?;
        info!(offer = %removed.id, name = %name, "Offer deleted");
        Ok(removed)
    }

    /// Join a pending offer, consuming it and starting a session.
    pub fn join_offer(&self, name: &str, opponent: Participant) -> Result<Joined, LobbyError> {
        let name = lookup_key(name);
        let mut tables = self.tables.lock();
        let offer = tables
            .offers
            .remove(name)
            .ok_or_else(|| LobbyError::NotFound(name.to_string()))?;

        let creator_id = offer.creator.id;
        let opponent_name = opponent.name.clone();
        let session = Session::new(offer.name.clone(), offer.creator, opponent, offer.size, &self.config);
        let handle = SessionHandle::new(session);
        tables.sessions.insert(offer.name.clone(), handle.clone());
        drop(tables);

        info!(offer = %offer.id, name = %offer.name, "Session started");
        let mut reply = Reply::new(Outcome::Accepted);
        reply.push(
            creator_id,
            Event::OpponentJoined {
                opponent: opponent_name,
                session: offer.name,
            },
        );
        Ok(Joined {
            session: handle,
            reply,
        })
    }

    /// All pending offers in creation order.
    #[must_use]
    pub fn list_offers(&self) -> Vec<PendingOffer> {
        let mut offers: Vec<_> = self.tables.lock().offers.values().cloned().collect();
        offers.sort_by_key(|o| o.id);
        offers
    }

    /// Pending offers created by `creator`, in creation order.
    #[must_use]
    pub fn offers_by(&self, creator: ParticipantId) -> Vec<PendingOffer> {
        let mut offers: Vec<_> = self
            .tables
            .lock()
            .offers
            .values()
            .filter(|o| o.creator.id == creator)
            .cloned()
            .collect();
        offers.sort_by_key(|o| o.id);
        offers
    }

    // === Drafts ===

    /// Start building an offer, replacing any unfinished draft.
    pub fn begin_draft(&self, creator: Participant) {
        debug!(creator = %creator.id, "Draft started");
        self.drafts.lock().insert(creator.id, OfferDraft::new(creator));
    }

    /// Set the draft's name. Rejects names already in use.
    pub fn set_draft_name(&self, creator: ParticipantId, name: &str) -> Result<(), LobbyError> {
        let name = normalize_name(name, self.config.lobby.max_name_len)?;
        if !self.name_available(&name) {
            return Err(LobbyError::NameTaken(name));
        }
        let mut drafts = self.drafts.lock();
        let draft = drafts.get_mut(&creator).ok_or(LobbyError::NoDraft)?;
        draft.set_name(name);
        Ok(())
    }

    pub fn set_draft_size(&self, creator: ParticipantId, size: BoardSize) -> Result<(), LobbyError> {
        let mut drafts = self.drafts.lock();
        let draft = drafts.get_mut(&creator).ok_or(LobbyError::NoDraft)?;
        draft.set_size(size);
        Ok(())
    }

    #[must_use]
    pub fn draft(&self, creator: ParticipantId) -> Option<OfferDraft> {
        self.drafts.lock().get(&creator).cloned()
    }

    /// Discard the draft.
    pub fn cancel_draft(&self, creator: ParticipantId) -> Result<(), LobbyError> {
        if self.drafts.lock().remove(&creator).is_none() {
            return Err(LobbyError::NoDraft);
        }
        debug!(creator = %creator, "Draft cancelled");
        Ok(())
    }

    /// Validate the draft and create the offer. The draft survives a
    /// failed submission so the creator can fix it.
    pub fn submit_draft(&self, creator: ParticipantId) -> Result<OfferId, LobbyError> {
        let draft = self.draft(creator).ok_or(LobbyError::NoDraft)?;
        let (name, size) = draft.finish()?;
        let id = self.create_offer(draft.creator().clone(), &name, size)?;
        self.drafts.lock().remove(&creator);
        Ok(id)
    }

    // === Sessions ===

    #[must_use]
    pub fn session(&self, name: &str) -> Option<SessionHandle> {
        self.tables.lock().sessions.get(lookup_key(name)).cloned()
    }

    #[must_use]
    pub fn session_count(&self) -> usize {
        self.tables.lock().sessions.len()
    }

    /// Live sessions `who` plays in, ordered by name.
    #[must_use]
    pub fn sessions_of(&self, who: ParticipantId) -> Vec<SessionHandle> {
        let mut handles: Vec<_> = self
            .tables
            .lock()
            .sessions
            .values()
            .filter(|h| h.involves(who))
            .cloned()
            .collect();
        handles.sort_by(|a, b| a.name().cmp(b.name()));
        handles
    }

    /// Run `f` on the named session under its lock. A session that `f`
    /// leaves closed is removed from the registry.
    pub fn with_session<R>(&self, name: &str, f: impl FnOnce(&mut Session) -> R) -> Result<R, LobbyError> {
        let handle = self
            .session(name)
            .ok_or_else(|| LobbyError::NotFound(lookup_key(name).to_string()))?;

        let (result, closed) = {
            let mut session = handle.lock_mut();
            let result = f(&mut session);
            (result, session.is_closed())
        };

        if closed {
            self.remove_session(&handle);
        }
        Ok(result)
    }

    // === Session operations ===

    pub fn place_stone(&self, name: &str, who: ParticipantId, notation: &str) -> Result<Reply, LobbyError> {
        self.dispatch(name, |s| s.place_stone(who, notation))
    }

    pub fn pass(&self, name: &str, who: ParticipantId) -> Result<Reply, LobbyError> {
        self.dispatch(name, |s| s.pass(who))
    }

    pub fn resign(&self, name: &str, who: ParticipantId) -> Result<Reply, LobbyError> {
        self.dispatch(name, |s| s.resign(who))
    }

    pub fn mark_dead(&self, name: &str, who: ParticipantId, notation: &str) -> Result<Reply, LobbyError> {
        self.dispatch(name, |s| s.mark_dead(who, notation))
    }

    pub fn commit(&self, name: &str, who: ParticipantId) -> Result<Reply, LobbyError> {
        self.dispatch(name, |s| s.commit(who))
    }

    pub fn review_and_decide(&self, name: &str, who: ParticipantId, agree: bool) -> Result<Reply, LobbyError> {
        self.dispatch(name, |s| s.review_and_decide(who, agree))
    }

    pub fn chat(&self, name: &str, who: ParticipantId, text: &str) -> Result<Reply, LobbyError> {
        self.dispatch(name, |s| s.chat(who, text))
    }

    /// Render the board for a participant of the session.
    pub fn render(&self, name: &str, who: ParticipantId) -> Result<String, LobbyError> {
        self.with_session(name, |s| {
            if s.involves(who) {
                Ok(s.render())
            } else {
                Err(SessionError::NotAParticipant)
            }
        })?
        .map_err(LobbyError::from)
    }

    fn dispatch(
        &self,
        name: &str,
        op: impl FnOnce(&mut Session) -> Result<Reply, SessionError>,
    ) -> Result<Reply, LobbyError> {
        Ok(self.with_session(name, op)??)
    }

    fn remove_session(&self, handle: &SessionHandle) {
        let mut tables = self.tables.lock();
        let same = tables
            .sessions
            .get(handle.name())
            .is_some_and(|current| current.ptr_eq(handle));
        if same {
            tables.sessions.remove(handle.name());
            info!(name = %handle.name(), "Session closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Participant {
        Participant::new(ParticipantId(1), "alice")
    }

    fn bob() -> Participant {
        Participant::new(ParticipantId(2), "bob")
    }

    #[test]
    fn test_offer_names_unique() {
        let lobby = Lobby::default();

        lobby.create_offer(alice(), "evening", BoardSize::Nine).unwrap();

        assert_eq!(
            lobby.create_offer(bob(), "evening", BoardSize::Nineteen),
            Err(LobbyError::NameTaken("evening".to_string()))
        );
    }

    #[test]
    fn test_live_session_blocks_name() {
        let lobby = Lobby::default();
        lobby.create_offer(alice(), "evening", BoardSize::Nine).unwrap();
        lobby.join_offer("evening", bob()).unwrap();

        assert!(!lobby.name_available("evening"));
        assert!(matches!(
            lobby.create_offer(bob(), "evening", BoardSize::Nine),
            Err(LobbyError::NameTaken(_))
        ));
    }

    #[test]
    fn test_join_consumes_offer() {
        let lobby = Lobby::default();
        lobby.create_offer(alice(), "evening", BoardSize::Nine).unwrap();

        let joined = lobby.join_offer("evening", bob()).unwrap();

        assert!(lobby.list_offers().is_empty());
        assert_eq!(joined.session.name(), "evening");
        assert_eq!(joined.reply.notices[0].to, ParticipantId(1));
        assert!(matches!(
            lobby.join_offer("evening", bob()),
            Err(LobbyError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_requires_owner() {
        let lobby = Lobby::default();
        lobby.create_offer(alice(), "evening", BoardSize::Nine).unwrap();

        assert_eq!(
            lobby.delete_offer("evening", ParticipantId(2)),
            Err(LobbyError::NotOwner("evening".to_string()))
        );
        assert!(lobby.delete_offer("evening", ParticipantId(1)).is_ok());
        assert_eq!(
            lobby.delete_offer("evening", ParticipantId(1)),
            Err(LobbyError::NotFound("evening".to_string()))
        );
    }

    #[test]
    fn test_resign_removes_session() {
        let lobby = Lobby::default();
        lobby.create_offer(alice(), "evening", BoardSize::Nine).unwrap();
        lobby.join_offer("evening", bob()).unwrap();

        lobby.resign("evening", ParticipantId(2)).unwrap();

        assert_eq!(lobby.session_count(), 0);
        assert!(matches!(
            lobby.pass("evening", ParticipantId(1)),
            Err(LobbyError::NotFound(_))
        ));
        assert!(lobby.name_available("evening"));
    }
}
