//! # rust-go
//!
//! A two-player Go session engine for asynchronous messaging transports.
//!
//! ## Design Principles
//!
//! 1. **Outcomes, not exceptions**: board operations return a closed set of
//!    `Outcome` codes; contract violations are typed errors. Nothing in the
//!    engine panics on user input.
//!
//! 2. **Snapshots over mutation**: groups are recomputed from scratch after
//!    every placement with an iterative flood fill.
//!
//! 3. **Transport-agnostic**: operations return `Reply` values listing who
//!    must be told what; delivery happens behind the `Notifier` trait.
//!
//! ## Modules
//!
//! - `core`: colors, points, outcomes, participants, configuration
//! - `board`: grid, groups, placement, capture, rendering
//! - `negotiation`: dead-stone marking protocol and final scoring
//! - `session`: per-game state machine, chat, notifications
//! - `registry`: lobby with offers, sessions, drafts and the roster
//! - `error`: error types

pub mod core;
pub mod error;
pub mod board;
pub mod negotiation;
pub mod session;
pub mod registry;

// Re-export commonly used types
pub use crate::core::{
    BoardSize, Cell, Color, ColorMap, EngineConfig, LobbyConfig, Outcome, Participant,
    ParticipantId, Point, RenderConfig,
};

pub use crate::error::{ConfigError, LobbyError, NegotiationError, NotationError, SessionError};

pub use crate::board::{Board, Grid, Group, GroupId, Groups};

pub use crate::negotiation::{Decision, ScoreCard, TakeOffNegotiation};

pub use crate::session::{Chat, ChatEntry, Closure, Event, Notice, Notifier, Phase, Reply, Session};

pub use crate::registry::{
    Joined, Lobby, OfferDraft, OfferId, PendingOffer, Roster, SessionHandle, SessionView,
};
