//! Shared helpers for integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use rust_go::{BoardSize, EngineConfig, Participant, ParticipantId, Session};
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize test logging once.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then defaults to `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub const ALICE: ParticipantId = ParticipantId(100);
pub const BOB: ParticipantId = ParticipantId(200);

pub fn alice() -> Participant {
    Participant::new(ALICE, "alice")
}

pub fn bob() -> Participant {
    Participant::new(BOB, "bob")
}

/// Alice (Black) against Bob (White).
pub fn session(size: BoardSize) -> Session {
    init_logging();
    Session::new("test game", alice(), bob(), size, &EngineConfig::default())
}

/// Play alternating moves, Alice first, asserting each is accepted.
pub fn play(session: &mut Session, moves: &[&str]) {
    for (i, m) in moves.iter().enumerate() {
        let who = if session.board().current_move() == rust_go::Color::Black {
            ALICE
        } else {
            BOB
        };
        let reply = session
            .place_stone(who, m)
            .unwrap_or_else(|e| panic!("move {i} ({m}) failed: {e}"));
        assert!(reply.outcome.is_accepted(), "move {i} ({m}): {:?}", reply.outcome);
    }
}

/// Both players pass, starting with whoever is to move.
pub fn pass_twice(session: &mut Session) {
    for _ in 0..2 {
        let who = if session.board().current_move() == rust_go::Color::Black {
            ALICE
        } else {
            BOB
        };
        session.pass(who).unwrap();
    }
}
