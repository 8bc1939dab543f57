//! Registries: pending offers, live sessions, offer drafts and player names.
//!
//! A `Lobby` is an owned value, not a global. Hosts create one and share it
//! (it is `Send + Sync`) across whatever handles inbound commands.

pub mod offer;
pub mod roster;
pub mod lobby;

pub use offer::{OfferDraft, OfferId, PendingOffer};
pub use roster::Roster;
pub use lobby::{Joined, Lobby, SessionHandle, SessionView};
