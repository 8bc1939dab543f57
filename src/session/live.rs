//! A live game between two participants.
//!
//! ## Phases
//!
//! ```text
//! InPlay ──two passes──▶ AwaitingAgreement ──mutual agreement──▶ Closed
//!    │                          │
//!    └─────────resign───────────┴──────────────────────────────▶ Closed
//! ```
//!
//! The creator plays Black and the opponent White. When both seats resolve
//! to the same identity, that participant may act for either color.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::chat::Chat;
use super::notice::{Event, Reply};
use crate::board::Board;
use crate::core::{BoardSize, Color, EngineConfig, Outcome, Participant, ParticipantId, RenderConfig};
use crate::error::SessionError;
use crate::negotiation::{Decision, ScoreCard};

/// How a closed session ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Closure {
    Resigned(ParticipantId),
    Scored(ScoreCard),
}

/// Session lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    InPlay,
    AwaitingAgreement,
    Closed(Closure),
}

/// Which colors a participant may act for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Seat {
    Single(Color),
    Both,
}

impl Seat {
    fn plays(self, color: Color) -> bool {
        match self {
            Seat::Single(own) => own == color,
            Seat::Both => true,
        }
    }
}

/// A paired game: two participants, one board, one chat log.
#[derive(Clone, Debug)]
pub struct Session {
    name: String,
    creator: Participant,
    opponent: Participant,
    board: Board,
    chat: Chat,
    phase: Phase,
    glyphs: RenderConfig,
    max_chat_len: usize,
}

impl Session {
    pub fn new(
        name: impl Into<String>,
        creator: Participant,
        opponent: Participant,
        size: BoardSize,
        config: &EngineConfig,
    ) -> Self {
        Self {
            name: name.into(),
            creator,
            opponent,
            board: Board::new(size),
            chat: Chat::new(),
            phase: Phase::InPlay,
            glyphs: config.render.clone(),
            max_chat_len: config.lobby.max_chat_len,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Black.
    #[must_use]
    pub fn creator(&self) -> &Participant {
        &self.creator
    }

    /// White.
    #[must_use]
    pub fn opponent(&self) -> &Participant {
        &self.opponent
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn chat_log(&self) -> &Chat {
        &self.chat
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.phase, Phase::Closed(_))
    }

    /// Creator and opponent are the same identity.
    #[must_use]
    pub fn is_self_play(&self) -> bool {
        self.creator.id == self.opponent.id
    }

    #[must_use]
    pub fn involves(&self, who: ParticipantId) -> bool {
        self.creator.id == who || self.opponent.id == who
    }

    /// The participant on the other side of `who`.
    pub fn other_participant(&self, who: ParticipantId) -> Result<&Participant, SessionError> {
        if who == self.opponent.id {
            Ok(&self.creator)
        } else if who == self.creator.id {
            Ok(&self.opponent)
        } else {
            Err(SessionError::NotAParticipant)
        }
    }

    /// Color seated by `who`, if they hold exactly one.
    #[must_use]
    pub fn color_of(&self, who: ParticipantId) -> Option<Color> {
        match self.seat(who) {
            Ok(Seat::Single(color)) => Some(color),
            _ => None,
        }
    }

    /// Current board as text.
    #[must_use]
    pub fn render(&self) -> String {
        self.board.render(&self.glyphs)
    }

    // === Play ===

    /// Place a stone for the color to move.
    pub fn place_stone(&mut self, who: ParticipantId, notation: &str) -> Result<Reply, SessionError> {
        let color = self.turn_check(who)?;

        let point = match self.board.point(notation) {
            Ok(point) => point,
            Err(outcome) => return Ok(Reply::rejected(who, outcome)),
        };

        let before = self.board.prisoners(Color::Black) + self.board.prisoners(Color::White);
        let outcome = self.board.place_at(point);
        if !outcome.is_accepted() {
            debug!(session = %self.name, %color, %point, ?outcome, "Placement rejected");
            return Ok(Reply::rejected(who, outcome));
        }
        let captured = self.board.prisoners(Color::Black) + self.board.prisoners(Color::White) - before;

        let mut reply = Reply::new(outcome);
        self.notify_both(&mut reply, Event::StonePlaced { by: color, point, captured });
        Ok(reply)
    }

    /// Pass. The second consecutive pass opens dead-stone negotiation.
    pub fn pass(&mut self, who: ParticipantId) -> Result<Reply, SessionError> {
        let color = self.turn_check(who)?;

        let outcome = self.board.pass();
        let mut reply = Reply::new(outcome);
        self.notify_both(&mut reply, Event::Passed { by: color });

        if self.board.is_ended() {
            self.phase = Phase::AwaitingAgreement;
            info!(session = %self.name, "Both players passed, negotiating dead stones");
            self.notify_both(&mut reply, Event::GameEnded);
        }
        Ok(reply)
    }

    /// Resign. Allowed from either participant in any open phase; scores
    /// are left untouched.
    pub fn resign(&mut self, who: ParticipantId) -> Result<Reply, SessionError> {
        self.ensure_open()?;
        self.seat(who)?;

        let by = if who == self.creator.id {
            self.creator.name.clone()
        } else {
            self.opponent.name.clone()
        };
        self.phase = Phase::Closed(Closure::Resigned(who));
        info!(session = %self.name, resigned = %by, "Resignation");

        let mut reply = Reply::new(Outcome::Accepted);
        self.notify_both(&mut reply, Event::Resigned { by });
        Ok(reply)
    }

    // === Dead-stone negotiation ===

    /// Mark the group at `notation` as dead.
    pub fn mark_dead(&mut self, who: ParticipantId, notation: &str) -> Result<Reply, SessionError> {
        self.ensure_open()?;
        let seat = self.seat(who)?;
        let color = self.marking_color(seat);

        let outcome = self.board.mark_dead(color, notation)?;
        match outcome {
            Outcome::PlaceTaken => {
                let mut reply = Reply::new(outcome);
                if let Ok(point) = self.board.point(notation) {
                    self.notify_both(&mut reply, Event::MarkedDead { by: color, point });
                }
                Ok(reply)
            }
            Outcome::Accepted => {
                let mut reply = Reply::new(outcome);
                if let Ok(point) = self.board.point(notation) {
                    reply.push(who, Event::NothingToMark { point });
                }
                Ok(reply)
            }
            rejected => Ok(Reply::rejected(who, rejected)),
        }
    }

    /// Finish marking.
    pub fn commit(&mut self, who: ParticipantId) -> Result<Reply, SessionError> {
        self.ensure_open()?;
        let seat = self.seat(who)?;
        let color = self.marking_color(seat);

        self.board.commit_dead(color)?;

        let mut reply = Reply::new(Outcome::Accepted);
        self.notify_both(&mut reply, Event::Committed { by: color });
        Ok(reply)
    }

    /// Accept or reject the other color's committed marks.
    pub fn review_and_decide(&mut self, who: ParticipantId, agree: bool) -> Result<Reply, SessionError> {
        self.ensure_open()?;
        let seat = self.seat(who)?;
        let color = self.reviewing_color(seat);

        let decision = self.board.review_dead(color, agree)?;

        let mut reply = Reply::new(Outcome::Accepted);
        match decision {
            Decision::Waiting => self.notify_both(&mut reply, Event::Agreed { by: color }),
            Decision::Rejected => self.notify_both(&mut reply, Event::ProposalRejected { by: color }),
            Decision::Finalized(card) => {
                info!(session = %self.name, leader = ?card.leader(), "Session scored");
                self.notify_both(&mut reply, Event::Agreed { by: color });
                self.notify_both(&mut reply, Event::Scored(card.clone()));
                self.phase = Phase::Closed(Closure::Scored(card));
            }
        }
        Ok(reply)
    }

    // === Chat ===

    /// Append a chat message and forward it to the other participant.
    pub fn chat(&mut self, who: ParticipantId, text: &str) -> Result<Reply, SessionError> {
        self.ensure_open()?;
        self.seat(who)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        if text.chars().count() > self.max_chat_len {
            return Err(SessionError::MessageTooLong {
                max: self.max_chat_len,
            });
        }

        let sender = if who == self.creator.id {
            self.creator.name.clone()
        } else {
            self.opponent.name.clone()
        };
        self.chat.append(text, sender.clone());

        let mut reply = Reply::new(Outcome::Accepted);
        let other = self.other_participant(who)?.id;
        reply.push(
            other,
            Event::Chat {
                sender,
                text: text.to_string(),
            },
        );
        Ok(reply)
    }

    // === Internals ===

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.is_closed() {
            return Err(SessionError::Closed);
        }
        Ok(())
    }

    fn seat(&self, who: ParticipantId) -> Result<Seat, SessionError> {
        if self.is_self_play() && who == self.creator.id {
            Ok(Seat::Both)
        } else if who == self.creator.id {
            Ok(Seat::Single(Color::Black))
        } else if who == self.opponent.id {
            Ok(Seat::Single(Color::White))
        } else {
            warn!(session = %self.name, participant = %who, "Access by non-participant");
            Err(SessionError::NotAParticipant)
        }
    }

    /// Shared gate for placements and passes. Returns the color to move.
    fn turn_check(&self, who: ParticipantId) -> Result<Color, SessionError> {
        self.ensure_open()?;
        let seat = self.seat(who)?;
        if self.phase == Phase::AwaitingAgreement {
            return Err(SessionError::GameOver);
        }
        let color = self.board.current_move();
        if !seat.plays(color) {
            debug!(session = %self.name, participant = %who, to_move = %color, "Not your turn");
            return Err(SessionError::NotYourTurn);
        }
        Ok(color)
    }

    /// Self-play marks for Black until Black commits, then for White.
    fn marking_color(&self, seat: Seat) -> Color {
        match seat {
            Seat::Single(color) => color,
            Seat::Both => Color::ALL
                .into_iter()
                .find(|&c| !self.board.takeoff().is_ready(c))
                .unwrap_or(Color::White),
        }
    }

    /// Self-play reviews for the first color that still owes an agreement
    /// on a committed proposal.
    fn reviewing_color(&self, seat: Seat) -> Color {
        match seat {
            Seat::Single(color) => color,
            Seat::Both => {
                let takeoff = self.board.takeoff();
                Color::ALL
                    .into_iter()
                    .find(|&c| !takeoff.has_agreed(c) && takeoff.is_ready(c.opponent()))
                    .unwrap_or(Color::Black)
            }
        }
    }

    fn notify_both(&self, reply: &mut Reply, event: Event) {
        if !self.is_self_play() {
            reply.push(self.opponent.id, event.clone());
        }
        reply.push(self.creator.id, event);
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} vs {} \n    {}",
            self.name,
            self.creator,
            self.opponent,
            self.board.size()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: ParticipantId = ParticipantId(1);
    const BOB: ParticipantId = ParticipantId(2);

    fn session() -> Session {
        Session::new(
            "friendly",
            Participant::new(ALICE, "alice"),
            Participant::new(BOB, "bob"),
            BoardSize::Nine,
            &EngineConfig::default(),
        )
    }

    #[test]
    fn test_turn_enforcement() {
        let mut s = session();

        assert_eq!(s.place_stone(BOB, "a0"), Err(SessionError::NotYourTurn));
        assert_eq!(s.pass(BOB), Err(SessionError::NotYourTurn));
        assert!(s.place_stone(ALICE, "a0").unwrap().outcome.is_accepted());
        assert_eq!(s.place_stone(ALICE, "b0"), Err(SessionError::NotYourTurn));
        assert!(s.place_stone(BOB, "b0").unwrap().outcome.is_accepted());
    }

    #[test]
    fn test_stranger_rejected() {
        let mut s = session();

        assert_eq!(s.place_stone(ParticipantId(9), "a0"), Err(SessionError::NotAParticipant));
        assert_eq!(s.resign(ParticipantId(9)), Err(SessionError::NotAParticipant));
        assert_eq!(s.chat(ParticipantId(9), "hi"), Err(SessionError::NotAParticipant));
    }

    #[test]
    fn test_rejected_move_notifies_only_caller() {
        let mut s = session();

        let reply = s.place_stone(ALICE, "zz").unwrap();

        assert_eq!(reply.outcome, Outcome::InvalidNotation);
        assert_eq!(reply.notices.len(), 1);
        assert_eq!(reply.notices[0].to, ALICE);
        assert_eq!(s.board().current_move(), Color::Black);
    }

    #[test]
    fn test_passes_open_negotiation() {
        let mut s = session();

        s.pass(ALICE).unwrap();
        let reply = s.pass(BOB).unwrap();

        assert_eq!(reply.outcome, Outcome::GameEnded);
        assert_eq!(s.phase(), &Phase::AwaitingAgreement);
        assert!(reply.notices_for(ALICE).any(|e| *e == Event::GameEnded));
        assert_eq!(s.place_stone(BOB, "a0"), Err(SessionError::GameOver));
        assert_eq!(s.place_stone(ALICE, "a0"), Err(SessionError::GameOver));
    }

    #[test]
    fn test_resign_closes_and_notifies() {
        let mut s = session();

        let reply = s.resign(BOB).unwrap();

        assert!(s.is_closed());
        assert_eq!(s.phase(), &Phase::Closed(Closure::Resigned(BOB)));
        let to_alice: Vec<_> = reply.notices_for(ALICE).collect();
        assert_eq!(to_alice, vec![&Event::Resigned { by: "bob".into() }]);
        assert_eq!(s.pass(ALICE), Err(SessionError::Closed));
        assert_eq!(s.board().prisoners(Color::Black), 0);
    }

    #[test]
    fn test_negotiation_before_end_is_rejected() {
        let mut s = session();

        assert_eq!(
            s.commit(ALICE),
            Err(SessionError::Negotiation(crate::error::NegotiationError::NotEnded))
        );
    }

    #[test]
    fn test_chat() {
        let mut s = session();

        let reply = s.chat(ALICE, "  gl hf ").unwrap();

        assert_eq!(s.chat_log().render(), "alice: gl hf");
        assert_eq!(reply.notices.len(), 1);
        assert_eq!(reply.notices[0].to, BOB);
        assert_eq!(s.chat(BOB, "   "), Err(SessionError::EmptyMessage));
    }

    #[test]
    fn test_display() {
        assert_eq!(session().to_string(), "friendly: alice vs bob \n    9x9");
    }

    #[test]
    fn test_other_participant() {
        let s = session();

        assert_eq!(s.other_participant(ALICE).unwrap().id, BOB);
        assert_eq!(s.other_participant(BOB).unwrap().id, ALICE);
        assert_eq!(s.color_of(BOB), Some(Color::White));
    }
}
