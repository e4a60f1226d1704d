mod common;

use common::{server, session};
use five_hundred::agents::{AgentTable, BotAgent};
use five_hundred::api::{routes, Phase, HUMAN_SEAT, SEATS};
use five_hundred::client::ClientError;
use five_hundred::deck::HAND_SIZE;
use five_hundred::engine::{Move, TableEngine};

fn all_bots() -> AgentTable {
    let mut table = AgentTable::human_vs_bots(SEATS);
    table.set_agent(HUMAN_SEAT, Some(Box::new(BotAgent::new())));
    table
}

#[test]
fn start_creates_session_then_deals() {
    let mut s = session(7);
    s.start().unwrap();
    let snap = s.snapshot().unwrap();
    assert_eq!(snap.session_id, "fake-tester");
    assert_eq!(snap.phase, Phase::Bidding);
    assert_eq!(snap.hands.len(), SEATS);
    assert!(snap.hands.iter().all(|h| h.len() == HAND_SIZE));
    assert_eq!(s.current_seat(), Some(1), "left of the first dealer bids first");
    assert_eq!(server(&s).count(routes::SESSION), 1);
    assert_eq!(server(&s).count(routes::DEAL), 1);

    // A second start reuses the session.
    s.start().unwrap();
    assert_eq!(server(&s).count(routes::SESSION), 1);
    assert_eq!(server(&s).count(routes::DEAL), 2);
}

#[test]
fn bots_finish_a_hand() {
    let mut contracts = 0;
    for seed in 0..20 {
        let mut s = session(seed);
        s.start().unwrap();
        let mut table = all_bots();
        let moves = table.run_bots(&mut s, 200).unwrap();
        let snap = s.snapshot().unwrap();
        assert_eq!(snap.phase, Phase::Completed, "seed {seed} stopped after {moves} moves");
        assert_eq!(s.current_seat(), None);
        if let Some(play) = &snap.play {
            contracts += 1;
            assert_eq!(play.completed_tricks.len(), HAND_SIZE);
            assert_eq!(play.tricks_won[0] + play.tricks_won[1], HAND_SIZE as u8);
            assert!(snap.hands.iter().all(|h| h.is_empty()));
            assert!(s.status().starts_with("Hand complete"));
        }
    }
    assert!(contracts > 0, "some deal out of twenty should reach play");
}

#[test]
fn events_track_each_move() {
    let mut s = session(3);
    s.start().unwrap();
    assert_eq!(s.events_len(), 1);
    let mut table = all_bots();
    // Bidding always takes at least four calls.
    let moves = table.run_bots(&mut s, 3).unwrap();
    assert_eq!(moves, 3);
    assert_eq!(s.events_len(), 4);
    let recent = s.events_recent_offset(2, 0);
    assert_eq!(recent.len(), 2);
    assert!(recent.iter().all(|e| e.seat.is_some()));
    let first = s.events_recent_offset(1, 3);
    assert_eq!(first[0].text, "New hand dealt");
}

#[test]
fn out_of_turn_move_surfaces_server_error() {
    let mut s = session(11);
    s.start().unwrap();
    let before = s.snapshot().cloned();
    let wrong = (s.current_seat().unwrap() + 1) % SEATS;
    let err = s.submit(wrong, Move::Pass).unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 409, .. }));
    assert!(s.status().starts_with("Error"));
    assert!(s.last_error().is_some_and(|e| e.contains("not your turn")));
    assert_eq!(s.snapshot().cloned(), before, "a rejected move keeps the old snapshot");
}

#[test]
fn failed_deal_keeps_session_usable() {
    let mut s = session(5);
    s.start().unwrap();
    s.client_mut().transport_mut().fail_next(503, "busy");
    assert!(s.new_hand().is_err());
    assert!(s.last_error().is_some_and(|e| e.contains("busy")));
    s.new_hand().unwrap();
    assert_eq!(s.last_error(), None);
    assert_eq!(s.snapshot().map(|snap| snap.phase), Some(Phase::Bidding));
}

#[test]
fn dealer_rotates_between_hands() {
    let mut s = session(9);
    s.start().unwrap();
    let first = s.snapshot().and_then(|snap| snap.bidding.as_ref()).map(|b| b.dealer);
    s.new_hand().unwrap();
    let second = s.snapshot().and_then(|snap| snap.bidding.as_ref()).map(|b| b.dealer);
    assert_eq!(first, Some(0));
    assert_eq!(second, Some(1));
}
