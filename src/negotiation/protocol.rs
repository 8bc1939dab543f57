//! Marking, committing and reviewing dead stones on an ended board.
//!
//! Each color marks points it considers part of dead groups, commits when
//! done, and then reviews the other color's committed marks. A rejection by
//! either side wipes both proposals; agreement by both sides scores the game.

use tracing::{debug, info};

use super::scoring::ScoreCard;
use crate::board::Board;
use crate::core::{Color, Outcome};
use crate::error::NegotiationError;

/// Result of reviewing the other side's proposal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Agreement recorded; the other side has not agreed yet.
    Waiting,
    /// Proposal rejected; both sides start marking again.
    Rejected,
    /// Both sides agreed and the game was scored.
    Finalized(ScoreCard),
}

impl Board {
    /// Flag the group at `notation` as dead on behalf of `color`.
    ///
    /// Returns `PlaceTaken` when an occupied point was marked and `Accepted`
    /// when the point is empty (nothing to mark). Notation errors come back
    /// as `InvalidNotation` / `InvalidPosition`. Marks are only ever added.
    pub fn mark_dead(&mut self, color: Color, notation: &str) -> Result<Outcome, NegotiationError> {
        self.ensure_negotiating()?;
        if self.takeoff.is_ready(color) {
            return Err(NegotiationError::AlreadyCommitted);
        }

        let point = match self.point(notation) {
            Ok(point) => point,
            Err(outcome) => return Ok(outcome),
        };
        if self.grid.get(point).is_empty() {
            return Ok(Outcome::Accepted);
        }

        self.takeoff.mark(color, point);
        debug!(%color, %point, "Marked dead");
        Ok(Outcome::PlaceTaken)
    }

    /// Declare `color`'s marking complete. Repeated commits are harmless.
    pub fn commit_dead(&mut self, color: Color) -> Result<(), NegotiationError> {
        self.ensure_negotiating()?;
        self.takeoff.commit(color);
        debug!(%color, marked = self.takeoff.marked(color).len(), "Dead stones committed");
        Ok(())
    }

    /// Accept or reject the other color's committed proposal.
    pub fn review_dead(&mut self, color: Color, agree: bool) -> Result<Decision, NegotiationError> {
        self.ensure_negotiating()?;
        let other = color.opponent();
        if !self.takeoff.is_ready(other) {
            return Err(NegotiationError::OpponentNotReady);
        }

        if !agree {
            self.takeoff.reset();
            info!(%color, "Dead stone proposal rejected, negotiation restarted");
            return Ok(Decision::Rejected);
        }

        self.takeoff.agree(color);
        if !self.takeoff.has_agreed(other) {
            debug!(%color, "Agreed, waiting for the other side");
            return Ok(Decision::Waiting);
        }

        Ok(Decision::Finalized(self.finalize()))
    }

    fn ensure_negotiating(&self) -> Result<(), NegotiationError> {
        if !self.ended {
            return Err(NegotiationError::NotEnded);
        }
        if self.takeoff.is_scored() {
            return Err(NegotiationError::AlreadyScored);
        }
        Ok(())
    }
}
