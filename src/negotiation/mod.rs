//! Dead-stone negotiation and final scoring.
//!
//! Only reachable once the board has ended. Operations are methods on
//! `Board` scoped to one color:
//!
//! - `mark_dead`: flag a point whose group the caller considers dead
//! - `commit_dead`: marking complete
//! - `review_dead`: accept or reject the other color's committed marks
//!
//! Mutual acceptance removes the marked groups and tallies territory.

pub mod takeoff;
pub mod protocol;
pub mod scoring;

pub use takeoff::{Proposal, TakeOffNegotiation};
pub use protocol::Decision;
pub use scoring::ScoreCard;
