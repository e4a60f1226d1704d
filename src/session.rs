use crate::api::{Phase, SessionSnapshot, HUMAN_SEAT};
use crate::bidding::Seat;
use crate::client::{ClientError, GameClient};
use crate::deck::Deck;
use crate::engine::{Move, TableEngine};
use crate::transport::Transport;
use std::collections::HashSet;
use tracing::{error, info, warn};

/// One line of the session log shown in the history overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SessionEvent {
    pub seat: Option<Seat>,
    pub text: String,
}

/// Client-side view of one server session.
///
/// Holds the latest snapshot and the user-visible status line. Every call
/// goes through the server; nothing here changes game state on its own.
#[derive(Debug)]
pub struct Session<T: Transport> {
    client: GameClient<T>,
    player_name: String,
    seed: Option<u64>,
    snapshot: Option<SessionSnapshot>,
    status: String,
    last_error: Option<String>,
    events: Vec<SessionEvent>,
}

impl<T: Transport> Session<T> {
    pub fn new(client: GameClient<T>, player_name: &str) -> Self {
        Self {
            client,
            player_name: player_name.to_string(),
            seed: None,
            snapshot: None,
            status: "Not connected: press Space to deal.".to_string(),
            last_error: None,
            events: Vec::new(),
        }
    }

    /// Ask the server for reproducible deals.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn client(&self) -> &GameClient<T> {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut GameClient<T> {
        &mut self.client
    }

    pub fn session_id(&self) -> Option<&str> {
        self.snapshot.as_ref().map(|s| s.session_id.as_str())
    }

    pub fn events_len(&self) -> usize {
        self.events.len()
    }

    /// Up to `n` events, skipping the newest `offset`.
    pub fn events_recent_offset(&self, n: usize, offset: usize) -> Vec<SessionEvent> {
        if n == 0 {
            return Vec::new();
        }
        let len = self.events.len();
        let end = len.saturating_sub(offset);
        let start = end.saturating_sub(n);
        self.events[start..end].to_vec()
    }

    /// Create a session if there is none, then deal a hand.
    pub fn start(&mut self) -> Result<(), ClientError> {
        if self.snapshot.is_none() {
            let created = self.client.create_session(&self.player_name, self.seed);
            let snap = self.check(created)?;
            self.apply(snap);
        }
        self.new_hand()
    }

    /// Deal the next hand in the current session.
    pub fn new_hand(&mut self) -> Result<(), ClientError> {
        let id = self.require_session()?;
        let dealt = self.client.deal(&id);
        let snap = self.check(dealt)?;
        self.events.clear();
        self.record(None, "New hand dealt".to_string());
        self.apply(snap);
        Ok(())
    }

    fn require_session(&mut self) -> Result<String, ClientError> {
        match self.session_id() {
            Some(id) => Ok(id.to_string()),
            None => self.check(Err(ClientError::NoSession)),
        }
    }

    /// Log and surface a failed call; pass successes through.
    fn check<V>(&mut self, result: Result<V, ClientError>) -> Result<V, ClientError> {
        if let Err(err) = &result {
            error!(%err, "request failed");
            self.status = format!("Error: {err}");
            self.last_error = Some(err.to_string());
        }
        result
    }

    fn record(&mut self, seat: Option<Seat>, text: String) {
        self.events.push(SessionEvent { seat, text });
    }

    fn apply(&mut self, snap: SessionSnapshot) {
        check_hands(&snap);
        if snap.is_hand_over() && !self.snapshot.as_ref().is_some_and(|s| s.is_hand_over()) {
            if let Some(play) = &snap.play {
                info!(scores = ?play.scores, tricks = ?play.tricks_won, "hand complete");
                self.record(
                    None,
                    format!("Hand complete: scores {} / {}", play.scores[0], play.scores[1]),
                );
            }
        }
        self.status = describe(&snap);
        self.last_error = None;
        self.snapshot = Some(snap);
    }
}

impl<T: Transport> TableEngine for Session<T> {
    fn snapshot(&self) -> Option<&SessionSnapshot> {
        self.snapshot.as_ref()
    }

    fn submit(&mut self, seat: Seat, mv: Move) -> Result<(), ClientError> {
        let id = self.require_session()?;
        info!(seat, %mv, "submitting move");
        let result = match mv {
            Move::Bid { tricks, trump } => self.client.bid(&id, seat, tricks, trump),
            Move::Pass => self.client.pass(&id, seat),
            Move::RevealKitty => self.client.reveal_kitty(&id, seat),
            Move::Play(card) => self.client.play_card(&id, seat, card),
        };
        let snap = self.check(result)?;
        self.record(Some(seat), mv.to_string());
        self.apply(snap);
        Ok(())
    }
}

/// Warn about cards that cannot come from a 500 deck or appear twice.
fn check_hands(snap: &SessionSnapshot) {
    let mut seen = HashSet::new();
    let cards = snap.hands.iter().flat_map(|h| h.as_slice().iter()).chain(snap.kitty.iter());
    for card in cards {
        if !Deck::contains(*card) {
            warn!(%card, "server dealt a card outside the 500 deck");
        }
        if !seen.insert(*card) {
            warn!(%card, "card appears more than once in the snapshot");
        }
    }
}

fn seat_name(seat: Seat) -> String {
    if seat == HUMAN_SEAT {
        "You".to_string()
    } else {
        format!("P{}", seat + 1)
    }
}

/// One-line status text for a snapshot.
pub fn describe(snap: &SessionSnapshot) -> String {
    let actor = snap.current_seat();
    match (snap.phase, actor) {
        (Phase::Bidding, Some(HUMAN_SEAT)) => match snap.high_bid() {
            Some(high) => format!("Your bid: {} holds {high}.", seat_name(high.seat)),
            None => "Your bid: no bids yet.".to_string(),
        },
        (Phase::Bidding, Some(seat)) => format!("Bidding: waiting for {}.", seat_name(seat)),
        (Phase::Kitty, Some(HUMAN_SEAT)) => "You won the contract: press K to take the kitty.".to_string(),
        (Phase::Kitty, Some(seat)) => format!("{} takes the kitty.", seat_name(seat)),
        (Phase::Playing, Some(HUMAN_SEAT)) => "Your lead or follow: pick a card.".to_string(),
        (Phase::Playing, Some(seat)) => format!("Play: waiting for {}.", seat_name(seat)),
        (Phase::Completed, _) => match &snap.play {
            Some(p) => format!(
                "Hand complete: tricks {}/{}, scores {}/{}. Space deals again.",
                p.tricks_won[0], p.tricks_won[1], p.scores[0], p.scores[1]
            ),
            None => "Hand complete: Space deals again.".to_string(),
        },
        (Phase::Bidding, None) => "Bidding complete.".to_string(),
        (phase, _) => format!("Server phase: {}.", phase.label()),
    }
}
