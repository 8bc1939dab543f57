//! Sessions: a paired game with turn enforcement, negotiation and chat.
//!
//! ## Key Types
//!
//! - `Session`: the per-game state machine
//! - `Phase` / `Closure`: where a session is in its lifecycle
//! - `Chat`: append-only message log
//! - `Reply` / `Notice` / `Event`: what the host must relay, and to whom
//! - `Notifier`: the seam towards the transport

pub mod chat;
pub mod notice;
pub mod live;

pub use chat::{Chat, ChatEntry};
pub use notice::{Event, Notice, Notifier, Reply};
pub use live::{Closure, Phase, Session};
