#![allow(dead_code)]

use five_hundred::api::{
    routes, BidRequest, CreateSessionRequest, DealRequest, KittyRequest, PassRequest,
    PlayCardRequest, PlayedCard, Trick, SEATS,
};
use five_hundred::bidding::{contract_value, Bid, BidAction, Seat, MAX_TRICKS, MIN_TRICKS};
use five_hundred::cards::{effective_suit, Card, Suit};
use five_hundred::client::{ClientError, GameClient};
use five_hundred::deck::{Deck, KITTY_SIZE};
use five_hundred::session::Session;
use five_hundred::transport::Transport;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// In-memory rules server speaking the same JSON routes as the real one.
/// Rules are simplified: passing is final, the declarer drops its three
/// weakest cards after taking the kitty, and must-follow is enforced.
#[derive(Debug, Default)]
pub struct FakeServer {
    pub seed: u64,
    pub requests: Vec<String>,
    fail_next: Option<(u16, String)>,
    reject_moves: bool,
    session: Option<String>,
    deals: u64,
    phase: &'static str,
    dealer: Seat,
    hands: Vec<Vec<Card>>,
    kitty: Vec<Card>,
    bid_seat: Seat,
    high: Option<Bid>,
    passed: [bool; SEATS],
    history: Vec<BidAction>,
    play_seat: Seat,
    tricks_won: [u8; 2],
    scores: [i32; 2],
    completed: Vec<Trick>,
    trick: Vec<PlayedCard>,
}

impl FakeServer {
    pub fn new(seed: u64) -> Self {
        Self { seed, phase: "waiting", ..Self::default() }
    }

    /// Make the next request fail with `status` before touching any state.
    pub fn fail_next(&mut self, status: u16, message: &str) {
        self.fail_next = Some((status, message.to_string()));
    }

    /// Answer every move route with a 409 from now on.
    pub fn reject_moves(&mut self) {
        self.reject_moves = true;
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests.iter().filter(|p| p.as_str() == path).count()
    }

    pub fn hand_of(&self, seat: Seat) -> &[Card] {
        &self.hands[seat]
    }

    fn reject<V>(&self, status: u16, message: &str) -> Result<V, ClientError> {
        Err(ClientError::Status { status, message: message.to_string() })
    }

    fn check_session(&self, id: &str) -> Result<(), ClientError> {
        if self.session.as_deref() != Some(id) {
            return self.reject(404, "unknown session");
        }
        Ok(())
    }

    fn trump_suit(&self) -> Option<Suit> {
        self.high.and_then(|b| b.trump.suit())
    }

    fn create(&mut self, req: CreateSessionRequest) -> Result<(), ClientError> {
        if let Some(seed) = req.seed {
            self.seed = seed;
        }
        self.session = Some(format!("fake-{}", req.player_name.to_lowercase()));
        Ok(())
    }

    fn deal(&mut self, req: DealRequest) -> Result<(), ClientError> {
        self.check_session(&req.session_id)?;
        let mut deck = Deck::five_hundred();
        deck.shuffle_seeded(self.seed.wrapping_add(self.deals));
        let (hands, kitty) = deck.deal();
        self.dealer = (self.deals as usize) % SEATS;
        self.deals += 1;
        self.hands = hands.to_vec();
        self.kitty = kitty;
        self.phase = "bidding";
        self.bid_seat = (self.dealer + 1) % SEATS;
        self.high = None;
        self.passed = [false; SEATS];
        self.history.clear();
        self.tricks_won = [0, 0];
        self.completed.clear();
        self.trick.clear();
        Ok(())
    }

    fn bid(&mut self, req: BidRequest) -> Result<(), ClientError> {
        self.check_session(&req.session_id)?;
        if self.phase != "bidding" || req.seat != self.bid_seat {
            return self.reject(409, "not your turn to bid");
        }
        if !(MIN_TRICKS..=MAX_TRICKS).contains(&req.tricks) {
            return self.reject(400, "tricks out of range");
        }
        if self.high.is_some_and(|h| contract_value(req.tricks, req.trump) <= h.value()) {
            return self.reject(409, "bid must beat the high bid");
        }
        self.high = Some(Bid { seat: req.seat, tricks: req.tricks, trump: req.trump });
        self.history.push(BidAction::Bid { seat: req.seat, tricks: req.tricks, trump: req.trump });
        self.advance_bidding();
        Ok(())
    }

    fn pass(&mut self, req: PassRequest) -> Result<(), ClientError> {
        self.check_session(&req.session_id)?;
        if self.phase != "bidding" || req.seat != self.bid_seat {
            return self.reject(409, "not your turn to pass");
        }
        self.passed[req.seat] = true;
        self.history.push(BidAction::Pass { seat: req.seat });
        self.advance_bidding();
        Ok(())
    }

    fn advance_bidding(&mut self) {
        let passes = self.passed.iter().filter(|p| **p).count();
        match self.high {
            None if passes == SEATS => self.phase = "completed",
            Some(_) if passes == SEATS - 1 => self.phase = "kitty",
            _ => {
                let mut next = (self.bid_seat + 1) % SEATS;
                while self.passed[next] {
                    next = (next + 1) % SEATS;
                }
                self.bid_seat = next;
            }
        }
    }

    fn kitty(&mut self, req: KittyRequest) -> Result<(), ClientError> {
        self.check_session(&req.session_id)?;
        let Some(high) = self.high else {
            return self.reject(409, "no contract");
        };
        if self.phase != "kitty" || req.seat != high.seat {
            return self.reject(409, "only the declarer takes the kitty");
        }
        let trump = self.trump_suit();
        let hand = &mut self.hands[high.seat];
        hand.append(&mut self.kitty);
        hand.sort_by_key(|c| power(*c, trump, None));
        hand.drain(..KITTY_SIZE);
        self.phase = "playing";
        self.play_seat = high.seat;
        Ok(())
    }

    fn play(&mut self, req: PlayCardRequest) -> Result<(), ClientError> {
        self.check_session(&req.session_id)?;
        if self.phase != "playing" || req.seat != self.play_seat {
            return self.reject(409, "not your turn to play");
        }
        let trump = self.trump_suit();
        let hand = &self.hands[req.seat];
        let Some(pos) = hand.iter().position(|c| *c == req.card) else {
            return self.reject(409, "card not in hand");
        };
        if let Some(led) = self.trick.first().and_then(|p| effective_suit(p.card, trump)) {
            let can_follow = hand.iter().any(|c| effective_suit(*c, trump) == Some(led));
            if can_follow && effective_suit(req.card, trump) != Some(led) {
                return self.reject(409, "must follow suit");
            }
        }
        self.hands[req.seat].remove(pos);
        self.trick.push(PlayedCard { seat: req.seat, card: req.card });
        self.play_seat = (req.seat + 1) % SEATS;
        if self.trick.len() == SEATS {
            self.finish_trick();
        }
        Ok(())
    }

    fn finish_trick(&mut self) {
        let trump = self.trump_suit();
        let led = self.trick.first().and_then(|p| effective_suit(p.card, trump));
        let cards = std::mem::take(&mut self.trick);
        let leader = cards[0].seat;
        let winner = cards
            .iter()
            .max_by_key(|p| power(p.card, trump, led))
            .map(|p| p.seat)
            .unwrap_or(leader);
        self.tricks_won[winner % 2] += 1;
        self.completed.push(Trick { leader, cards, winner });
        self.play_seat = winner;
        if self.hands.iter().all(|h| h.is_empty()) {
            self.score_hand();
        }
    }

    fn score_hand(&mut self) {
        if let Some(high) = self.high {
            let team = high.seat % 2;
            let value = high.value() as i32;
            if self.tricks_won[team] >= high.tricks {
                self.scores[team] += value;
            } else {
                self.scores[team] -= value;
            }
            self.scores[1 - team] += 10 * self.tricks_won[1 - team] as i32;
        }
        self.phase = "completed";
    }

    fn snapshot(&self) -> Value {
        let bidding = if self.hands.is_empty() {
            Value::Null
        } else {
            json!({
                "dealer": self.dealer,
                "currentSeat": self.bid_seat,
                "highBid": self.high,
                "completed": self.phase != "bidding",
                "history": self.history,
            })
        };
        let started = self.phase == "playing" || !self.completed.is_empty();
        let play = if started {
            json!({
                "currentSeat": self.play_seat,
                "contract": self.high,
                "tricksWon": self.tricks_won,
                "scores": self.scores,
                "completedTricks": self.completed,
                "currentTrick": self.trick,
            })
        } else {
            Value::Null
        };
        let kitty: &[Card] = if self.phase == "kitty" { &self.kitty } else { &[] };
        json!({
            "sessionId": self.session,
            "phase": self.phase,
            "hands": self.hands,
            "kitty": kitty,
            "bidding": bidding,
            "play": play,
        })
    }
}

/// Weakest first: off-suit cards, then the led suit, then trumps.
fn power(card: Card, trump: Option<Suit>, led: Option<Suit>) -> u8 {
    match (card, trump) {
        (Card::Joker, _) => 100,
        (c, Some(t)) if c.is_right_bower(t) => 90,
        (c, Some(t)) if c.is_left_bower(t) => 80,
        (Card::Suited { rank, suit }, Some(t)) if suit == t => 50 + rank.value(),
        (Card::Suited { rank, suit }, _) if Some(suit) == led => 20 + rank.value(),
        (Card::Suited { rank, .. }, _) => rank.value(),
    }
}

fn parse<R: DeserializeOwned>(body: &str) -> Result<R, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Status { status: 400, message: e.to_string() })
}

impl Transport for FakeServer {
    fn post_json(&mut self, path: &str, body: &str) -> Result<String, ClientError> {
        self.requests.push(path.to_string());
        if let Some((status, message)) = self.fail_next.take() {
            return Err(ClientError::Status { status, message });
        }
        if self.reject_moves && path != routes::SESSION && path != routes::DEAL {
            return self.reject(409, "move rejected");
        }
        match path {
            routes::SESSION => self.create(parse(body)?)?,
            routes::DEAL => self.deal(parse(body)?)?,
            routes::BID => self.bid(parse(body)?)?,
            routes::PASS => self.pass(parse(body)?)?,
            routes::KITTY => self.kitty(parse(body)?)?,
            routes::PLAY => self.play(parse(body)?)?,
            _ => return self.reject(404, "no such route"),
        }
        Ok(self.snapshot().to_string())
    }
}

pub fn session(seed: u64) -> Session<FakeServer> {
    Session::new(GameClient::new(FakeServer::new(seed)), "Tester")
}

pub fn server<'a>(session: &'a Session<FakeServer>) -> &'a FakeServer {
    session.client().transport()
}
