//! Dead-stone negotiation driven through sessions.

mod support;

use rust_go::{
    BoardSize, Closure, Color, EngineConfig, Event, NegotiationError, Outcome, Participant, Phase,
    Point, Session, SessionError,
};
use support::{ALICE, BOB};

/// Black walls off columns a-d along e, White walls off g-i along f, and
/// White leaves a lone stone at b4 inside Black's area. Ends with both
/// players passed.
fn walled_game(session: &mut Session) {
    let mut moves = Vec::new();
    for row in 0..8 {
        moves.push(format!("e{row}"));
        moves.push(if row == 0 { "b4".to_string() } else { format!("f{}", row - 1) });
    }
    moves.push("e8".to_string());
    moves.push("f7".to_string());
    let moves: Vec<&str> = moves.iter().map(String::as_str).collect();
    support::play(session, &moves);

    // Black passes, White closes the wall, then both pass.
    session.pass(ALICE).unwrap();
    session.place_stone(BOB, "f8").unwrap();
    support::pass_twice(session);
    assert_eq!(session.phase(), &Phase::AwaitingAgreement);
}

fn ended_session() -> Session {
    let mut session = support::session(BoardSize::Nine);
    walled_game(&mut session);
    session
}

// =============================================================================
// Agreement
// =============================================================================

/// Both sides agree: b4 is removed, territory counted.
#[test]
fn test_mutual_agreement_scores() {
    let mut session = ended_session();
    assert_eq!(session.board().prisoners(Color::Black), 0);
    assert_eq!(session.board().prisoners(Color::White), 0);

    let reply = session.mark_dead(ALICE, "b4").unwrap();
    assert_eq!(reply.outcome, Outcome::PlaceTaken);
    assert_eq!(reply.notices.len(), 2);

    session.commit(ALICE).unwrap();
    let reply = session.review_and_decide(BOB, true).unwrap();
    assert!(reply.notices_for(ALICE).any(|e| *e == Event::Agreed { by: Color::White }));
    assert_eq!(session.phase(), &Phase::AwaitingAgreement);

    session.commit(BOB).unwrap();
    let reply = session.review_and_decide(ALICE, true).unwrap();

    let card = match session.phase() {
        Phase::Closed(Closure::Scored(card)) => card.clone(),
        other => panic!("expected scored session, got {other:?}"),
    };
    assert_eq!(card.removed[Color::White], 1);
    assert_eq!(card.removed[Color::Black], 0);
    assert_eq!(card.territory[Color::Black], 36);
    assert_eq!(card.territory[Color::White], 27);
    assert_eq!(card.totals[Color::Black], 37);
    assert_eq!(card.totals[Color::White], 27);
    assert_eq!(card.leader(), Some(Color::Black));

    assert_eq!(session.board().grid().get(Point::new(1, 4)).color(), None);
    assert!(reply.notices_for(BOB).any(|e| matches!(e, Event::Scored(_))));
    assert!(reply.notices_for(ALICE).any(|e| matches!(e, Event::Scored(_))));
}

/// One agreement alone does not score.
#[test]
fn test_single_agreement_waits() {
    let mut session = ended_session();

    session.commit(ALICE).unwrap();
    session.review_and_decide(BOB, true).unwrap();

    assert_eq!(session.phase(), &Phase::AwaitingAgreement);
    assert!(session.board().takeoff().has_agreed(Color::White));
    assert!(!session.board().takeoff().is_scored());
}

/// Agreeing without any marks still counts territory.
#[test]
fn test_agreement_without_marks() {
    let mut session = ended_session();

    session.commit(ALICE).unwrap();
    session.commit(BOB).unwrap();
    session.review_and_decide(ALICE, true).unwrap();
    session.review_and_decide(BOB, true).unwrap();

    let Phase::Closed(Closure::Scored(card)) = session.phase() else {
        panic!("expected scored session");
    };
    // b4 stays, so Black's area is no longer bordered by Black alone.
    assert_eq!(card.territory[Color::Black], 0);
    assert_eq!(card.territory[Color::White], 27);
}

// =============================================================================
// Rejection and ordering
// =============================================================================

/// A rejection clears both proposals and readiness.
#[test]
fn test_rejection_restarts_marking() {
    let mut session = ended_session();

    session.mark_dead(ALICE, "b4").unwrap();
    session.commit(ALICE).unwrap();
    session.mark_dead(BOB, "e0").unwrap();
    session.commit(BOB).unwrap();

    let reply = session.review_and_decide(BOB, false).unwrap();

    assert!(reply
        .notices_for(ALICE)
        .any(|e| *e == Event::ProposalRejected { by: Color::White }));
    let takeoff = session.board().takeoff();
    for color in Color::ALL {
        assert!(takeoff.marked(color).is_empty());
        assert!(!takeoff.is_ready(color));
        assert!(!takeoff.has_agreed(color));
    }
    assert_eq!(session.phase(), &Phase::AwaitingAgreement);

    assert_eq!(
        session.review_and_decide(BOB, true),
        Err(SessionError::Negotiation(NegotiationError::OpponentNotReady))
    );
    // Marking is open again.
    assert_eq!(session.mark_dead(ALICE, "b4").unwrap().outcome, Outcome::PlaceTaken);
}

/// Black rejecting clears both sides just the same.
#[test]
fn test_black_rejection_restarts_marking() {
    let mut session = ended_session();

    session.mark_dead(BOB, "e0").unwrap();
    session.commit(BOB).unwrap();
    session.mark_dead(ALICE, "b4").unwrap();
    session.commit(ALICE).unwrap();
    session.review_and_decide(BOB, true).unwrap();

    let reply = session.review_and_decide(ALICE, false).unwrap();

    assert!(reply
        .notices_for(BOB)
        .any(|e| *e == Event::ProposalRejected { by: Color::Black }));
    let takeoff = session.board().takeoff();
    for color in Color::ALL {
        assert!(takeoff.marked(color).is_empty());
        assert!(!takeoff.is_ready(color));
        assert!(!takeoff.has_agreed(color));
    }
    assert_eq!(session.phase(), &Phase::AwaitingAgreement);
    assert_eq!(
        session.review_and_decide(ALICE, true),
        Err(SessionError::Negotiation(NegotiationError::OpponentNotReady))
    );
}

#[test]
fn test_review_before_opponent_commits() {
    let mut session = ended_session();

    assert_eq!(
        session.review_and_decide(ALICE, true),
        Err(SessionError::Negotiation(NegotiationError::OpponentNotReady))
    );
}

#[test]
fn test_mark_after_commit_rejected() {
    let mut session = ended_session();

    session.commit(ALICE).unwrap();
    session.commit(ALICE).unwrap();

    assert_eq!(
        session.mark_dead(ALICE, "b4"),
        Err(SessionError::Negotiation(NegotiationError::AlreadyCommitted))
    );
    assert!(session.mark_dead(BOB, "b4").is_ok());
}

#[test]
fn test_mark_empty_and_invalid_points() {
    let mut session = ended_session();

    let reply = session.mark_dead(BOB, "a0").unwrap();
    assert_eq!(reply.outcome, Outcome::Accepted);
    assert_eq!(reply.notices_for(ALICE).count(), 0);
    assert!(reply
        .notices_for(BOB)
        .any(|e| *e == Event::NothingToMark { point: Point::new(0, 0) }));

    assert_eq!(session.mark_dead(BOB, "z9").unwrap().outcome, Outcome::InvalidPosition);
    assert_eq!(session.mark_dead(BOB, "9a").unwrap().outcome, Outcome::InvalidNotation);
    assert!(session.board().takeoff().marked(Color::White).is_empty());
}

#[test]
fn test_negotiation_requires_ended_game() {
    let mut session = support::session(BoardSize::Nine);
    support::play(&mut session, &["c3"]);

    assert_eq!(
        session.mark_dead(ALICE, "c3"),
        Err(SessionError::Negotiation(NegotiationError::NotEnded))
    );
    assert_eq!(
        session.commit(BOB),
        Err(SessionError::Negotiation(NegotiationError::NotEnded))
    );
}

#[test]
fn test_scored_session_rejects_everything() {
    let mut session = ended_session();
    session.commit(ALICE).unwrap();
    session.commit(BOB).unwrap();
    session.review_and_decide(ALICE, true).unwrap();
    session.review_and_decide(BOB, true).unwrap();
    assert!(session.is_closed());

    assert_eq!(session.mark_dead(ALICE, "b4"), Err(SessionError::Closed));
    assert_eq!(session.commit(BOB), Err(SessionError::Closed));
    assert_eq!(session.review_and_decide(ALICE, true), Err(SessionError::Closed));
    assert_eq!(session.place_stone(ALICE, "a0"), Err(SessionError::Closed));
}

/// Stones captured in play stay credited to their own color on top of the
/// final score.
#[test]
fn test_in_play_captures_carry_into_totals() {
    let mut session = support::session(BoardSize::Nine);
    // White a0 is captured by Black a1 + b0.
    support::play(&mut session, &["a1", "a0", "b0"]);
    assert_eq!(session.board().prisoners(Color::White), 1);
    support::pass_twice(&mut session);

    session.commit(ALICE).unwrap();
    session.commit(BOB).unwrap();
    session.review_and_decide(ALICE, true).unwrap();
    session.review_and_decide(BOB, true).unwrap();

    let Phase::Closed(Closure::Scored(card)) = session.phase() else {
        panic!("expected scored session");
    };
    // Every empty region touches only Black stones.
    assert_eq!(card.territory[Color::Black], 79);
    assert_eq!(card.totals[Color::Black], 79);
    assert_eq!(card.totals[Color::White], 1);
}

// =============================================================================
// Self-play
// =============================================================================

/// One identity holding both seats negotiates for both colors in turn.
#[test]
fn test_self_play_negotiation() {
    support::init_logging();
    let solo = Participant::new(ALICE, "alice");
    let mut session = Session::new("solo", solo.clone(), solo, BoardSize::Nine, &EngineConfig::default());

    for m in ["c3", "c4"] {
        session.place_stone(ALICE, m).unwrap();
    }
    session.pass(ALICE).unwrap();
    session.pass(ALICE).unwrap();
    assert_eq!(session.phase(), &Phase::AwaitingAgreement);

    // Black marks the white stone, then White marks nothing.
    session.mark_dead(ALICE, "c4").unwrap();
    session.commit(ALICE).unwrap();
    assert!(session.board().takeoff().is_ready(Color::Black));
    session.commit(ALICE).unwrap();
    assert!(session.board().takeoff().is_ready(Color::White));

    let reply = session.review_and_decide(ALICE, true).unwrap();
    assert_eq!(reply.notices.len(), 1);
    assert!(session.board().takeoff().has_agreed(Color::Black));

    session.review_and_decide(ALICE, true).unwrap();

    let Phase::Closed(Closure::Scored(card)) = session.phase() else {
        panic!("expected scored session");
    };
    assert_eq!(card.removed[Color::White], 1);
    assert_eq!(card.totals[Color::Black], 1 + 80);
}
