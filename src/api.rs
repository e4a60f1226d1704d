//! Wire shapes exchanged with the rules server.
//!
//! Every route answers with a [`SessionSnapshot`]. The client never edits a
//! snapshot; it renders it and sends the next request.

use crate::bidding::{Bid, BidAction, Contract, Seat, Trump};
use crate::cards::Card;
use crate::hand::Hand;
use serde::{Deserialize, Serialize};

pub const SEATS: usize = 4;
pub const HUMAN_SEAT: Seat = 0;

/// Side a seat plays for: seats 0 and 2 are team 0, seats 1 and 3 team 1.
pub const fn team_of(seat: Seat) -> usize {
    seat % 2
}

/// Stage of the hand as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Phase {
    #[default]
    Bidding,
    Kitty,
    Playing,
    Completed,
    #[serde(other)]
    Unknown,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Bidding => "Bidding",
            Phase::Kitty => "Kitty",
            Phase::Playing => "Playing",
            Phase::Completed => "Hand complete",
            Phase::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiddingState {
    pub dealer: Seat,
    pub current_seat: Seat,
    #[serde(default)]
    pub high_bid: Option<Bid>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub history: Vec<BidAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    pub leader: Seat,
    pub cards: Vec<PlayedCard>,
    pub winner: Seat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayState {
    pub current_seat: Seat,
    #[serde(default)]
    pub contract: Option<Contract>,
    #[serde(default)]
    pub tricks_won: [u8; 2],
    #[serde(default)]
    pub scores: [i32; 2],
    #[serde(default)]
    pub completed_tricks: Vec<Trick>,
    #[serde(default)]
    pub current_trick: Vec<PlayedCard>,
}

impl PlayState {
    /// Card that opened the trick in progress, if any.
    pub fn led_card(&self) -> Option<Card> {
        self.current_trick.first().map(|p| p.card)
    }
}

/// Full session state returned by every route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: String,
    pub phase: Phase,
    #[serde(default)]
    pub hands: Vec<Hand>,
    #[serde(default)]
    pub kitty: Vec<Card>,
    #[serde(default)]
    pub bidding: Option<BiddingState>,
    #[serde(default)]
    pub play: Option<PlayState>,
}

impl SessionSnapshot {
    /// Seat expected to act next, or `None` when nobody is.
    pub fn current_seat(&self) -> Option<Seat> {
        match self.phase {
            Phase::Bidding => self.bidding.as_ref().filter(|b| !b.completed).map(|b| b.current_seat),
            Phase::Kitty => self.contract().map(|c| c.seat),
            Phase::Playing => self.play.as_ref().map(|p| p.current_seat),
            Phase::Completed | Phase::Unknown => None,
        }
    }

    pub fn hand(&self, seat: Seat) -> Option<&Hand> {
        self.hands.get(seat)
    }

    /// The contract, from the play state or from the finished auction.
    pub fn contract(&self) -> Option<Contract> {
        self.play
            .as_ref()
            .and_then(|p| p.contract)
            .or_else(|| self.bidding.as_ref().filter(|b| b.completed).and_then(|b| b.high_bid))
    }

    pub fn trump(&self) -> Option<Trump> {
        self.contract().map(|c| c.trump)
    }

    pub fn high_bid(&self) -> Option<&Bid> {
        self.bidding.as_ref().and_then(|b| b.high_bid.as_ref())
    }

    pub fn is_hand_over(&self) -> bool {
        matches!(self.phase, Phase::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub player_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidRequest {
    pub session_id: String,
    pub seat: Seat,
    pub tricks: u8,
    pub trump: Trump,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassRequest {
    pub session_id: String,
    pub seat: Seat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KittyRequest {
    pub session_id: String,
    pub seat: Seat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayCardRequest {
    pub session_id: String,
    pub seat: Seat,
    pub card: Card,
}

/// Route paths, relative to the configured base URL.
pub mod routes {
    pub const SESSION: &str = "/api/session";
    pub const DEAL: &str = "/api/deal";
    pub const BID: &str = "/api/bid";
    pub const PASS: &str = "/api/pass";
    pub const KITTY: &str = "/api/kitty";
    pub const PLAY: &str = "/api/play";
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIDDING_JSON: &str = r#"{
        "sessionId": "s-1",
        "phase": "bidding",
        "hands": [[{"suit":"hearts","rank":"A","isJoker":false}], [], [], []],
        "bidding": {
            "dealer": 3,
            "currentSeat": 1,
            "highBid": {"seat": 0, "tricks": 6, "trump": "spades"},
            "completed": false,
            "history": [{"action":"bid","seat":0,"tricks":6,"trump":"spades"}]
        }
    }"#;

    #[test]
    fn decodes_bidding_snapshot() {
        let snap: SessionSnapshot = serde_json::from_str(BIDDING_JSON).unwrap();
        assert_eq!(snap.phase, Phase::Bidding);
        assert_eq!(snap.current_seat(), Some(1));
        assert_eq!(snap.hand(0).map(Hand::len), Some(1));
        assert!(snap.kitty.is_empty());
        assert_eq!(snap.high_bid().map(|b| b.tricks), Some(6));
        assert_eq!(snap.contract(), None);
    }

    #[test]
    fn unknown_phase_is_tolerated() {
        let snap: SessionSnapshot =
            serde_json::from_str(r#"{"sessionId":"s","phase":"discarding"}"#).unwrap();
        assert_eq!(snap.phase, Phase::Unknown);
        assert_eq!(snap.current_seat(), None);
    }

    #[test]
    fn kitty_phase_acts_for_contract_winner() {
        let snap: SessionSnapshot = serde_json::from_str(
            r#"{"sessionId":"s","phase":"kitty","bidding":{"dealer":0,"currentSeat":2,
                "highBid":{"seat":2,"tricks":7,"trump":"hearts"},"completed":true}}"#,
        )
        .unwrap();
        assert_eq!(snap.current_seat(), Some(2));
        assert_eq!(snap.trump(), Some(Trump::Hearts));
    }

    #[test]
    fn requests_are_camel_case() {
        let req = PassRequest { session_id: "abc".into(), seat: 3 };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"sessionId":"abc","seat":3}"#);
        let create = CreateSessionRequest { player_name: "Ann".into(), seed: None };
        assert_eq!(serde_json::to_string(&create).unwrap(), r#"{"playerName":"Ann"}"#);
    }

    #[test]
    fn teams_alternate() {
        assert_eq!(team_of(0), team_of(2));
        assert_ne!(team_of(0), team_of(1));
    }
}
