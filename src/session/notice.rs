//! Notifications produced by session and lobby operations.
//!
//! The engine never talks to a transport. Every operation returns a `Reply`
//! listing who must be told what; the host hands it to its `Notifier`.

use serde::{Deserialize, Serialize};

use crate::core::{Color, Outcome, ParticipantId, Point};
use crate::negotiation::ScoreCard;

/// Something a participant should be told.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    OpponentJoined { opponent: String, session: String },
    StonePlaced { by: Color, point: Point, captured: u32 },
    Passed { by: Color },
    GameEnded,
    Rejected { outcome: Outcome },
    MarkedDead { by: Color, point: Point },
    NothingToMark { point: Point },
    Committed { by: Color },
    Agreed { by: Color },
    ProposalRejected { by: Color },
    Scored(ScoreCard),
    Resigned { by: String },
    Chat { sender: String, text: String },
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::OpponentJoined { opponent, session } => {
                write!(f, "Player {opponent} connected to your game {session}")
            }
            Event::StonePlaced { by, point, captured: 0 } => write!(f, "{by} played {point}"),
            Event::StonePlaced { by, point, captured } => {
                write!(f, "{by} played {point}, {captured} stone(s) removed")
            }
            Event::Passed { by } => write!(f, "{by} passed"),
            Event::GameEnded => {
                write!(f, "Both players passed. Mark dead stones, then commit")
            }
            Event::Rejected { outcome } => write!(f, "{outcome}"),
            Event::MarkedDead { by, point } => write!(f, "{by} marked {point} as dead"),
            Event::NothingToMark { point } => write!(f, "There is no stone at {point}"),
            Event::Committed { by } => write!(f, "{by} finished marking dead stones"),
            Event::Agreed { by } => write!(f, "{by} accepted the dead stones"),
            Event::ProposalRejected { by } => {
                write!(f, "{by} rejected the dead stones, mark them again")
            }
            Event::Scored(card) => write!(f, "Game over\n{card}"),
            Event::Resigned { by } => write!(f, "{by} resigned"),
            Event::Chat { sender, text } => write!(f, "{sender}: {text}"),
        }
    }
}

/// An event addressed to one participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub to: ParticipantId,
    pub event: Event,
}

impl Notice {
    #[must_use]
    pub fn new(to: ParticipantId, event: Event) -> Self {
        Self { to, event }
    }
}

/// Result of a session operation: the board outcome plus notices to relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub outcome: Outcome,
    pub notices: Vec<Notice>,
}

impl Reply {
    #[must_use]
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            notices: Vec::new(),
        }
    }

    /// A board rejection, reported to the caller only.
    #[must_use]
    pub fn rejected(to: ParticipantId, outcome: Outcome) -> Self {
        Self {
            outcome,
            notices: vec![Notice::new(to, Event::Rejected { outcome })],
        }
    }

    pub fn push(&mut self, to: ParticipantId, event: Event) {
        self.notices.push(Notice::new(to, event));
    }

    /// Notices addressed to `who`.
    pub fn notices_for(&self, who: ParticipantId) -> impl Iterator<Item = &Event> {
        self.notices.iter().filter(move |n| n.to == who).map(|n| &n.event)
    }

    /// Hand every notice to the transport.
    pub fn deliver_to(&self, notifier: &dyn Notifier) {
        for notice in &self.notices {
            notifier.deliver(notice);
        }
    }
}

/// Transport seam: delivers a notice to its addressee.
pub trait Notifier {
    fn deliver(&self, notice: &Notice);
}
