//! Core engine types: colors, points, outcomes, participants, configuration.
//!
//! These are the building blocks shared by the board, the negotiation
//! protocol, sessions and the lobby.

pub mod color;
pub mod point;
pub mod outcome;
pub mod participant;
pub mod config;

pub use color::{Cell, Color, ColorMap};
pub use point::{Point, MAX_COLUMNS};
pub use outcome::Outcome;
pub use participant::{Participant, ParticipantId};
pub use config::{BoardSize, EngineConfig, LobbyConfig, RenderConfig};
