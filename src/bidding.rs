//! Bids, contracts and the scripted bidder.
//!
//! The server resolves the auction; the client only needs to know how bids
//! rank against each other (the Avondale value ladder) and how a bot picks
//! one.

use crate::cards::{Rank, Suit};
use crate::hand::Hand;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seat index, 0..4. Seat 0 is the local human.
pub type Seat = usize;

pub const MIN_TRICKS: u8 = 6;
pub const MAX_TRICKS: u8 = 10;

/// Trump named by a bid: one of the suits or no-trumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trump {
    Spades,
    Clubs,
    Diamonds,
    Hearts,
    NoTrumps,
}

impl Trump {
    pub const ALL: [Trump; 5] =
        [Trump::Spades, Trump::Clubs, Trump::Diamonds, Trump::Hearts, Trump::NoTrumps];

    pub const fn suit(self) -> Option<Suit> {
        match self {
            Trump::Spades => Some(Suit::Spades),
            Trump::Clubs => Some(Suit::Clubs),
            Trump::Diamonds => Some(Suit::Diamonds),
            Trump::Hearts => Some(Suit::Hearts),
            Trump::NoTrumps => None,
        }
    }

    /// Value added on top of the six-trick base.
    pub const fn step(self) -> u32 {
        match self {
            Trump::Spades => 0,
            Trump::Clubs => 20,
            Trump::Diamonds => 40,
            Trump::Hearts => 60,
            Trump::NoTrumps => 80,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Trump::Spades => "♠",
            Trump::Clubs => "♣",
            Trump::Diamonds => "♦",
            Trump::Hearts => "♥",
            Trump::NoTrumps => "NT",
        }
    }
}

impl From<Suit> for Trump {
    fn from(suit: Suit) -> Self {
        match suit {
            Suit::Spades => Trump::Spades,
            Suit::Clubs => Trump::Clubs,
            Suit::Diamonds => Trump::Diamonds,
            Suit::Hearts => Trump::Hearts,
        }
    }
}

impl fmt::Display for Trump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrumpParseError {
    #[error("invalid trump: '{0}'")]
    Invalid(String),
}

impl FromStr for Trump {
    type Err = TrumpParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        match t.as_str() {
            "n" | "nt" | "notrumps" | "no-trumps" => Ok(Trump::NoTrumps),
            _ => Suit::from_str(&t)
                .map(Trump::from)
                .map_err(|_| TrumpParseError::Invalid(s.to_string())),
        }
    }
}

/// Value of a contract on the Avondale ladder: 6♠ is 40, each trump step
/// adds 20 and each extra trick adds 100.
///
/// ```
/// use five_hundred::bidding::{contract_value, Trump};
///
/// assert_eq!(contract_value(6, Trump::Spades), 40);
/// assert_eq!(contract_value(7, Trump::Hearts), 200);
/// assert_eq!(contract_value(10, Trump::NoTrumps), 520);
/// ```
pub const fn contract_value(tricks: u8, trump: Trump) -> u32 {
    let extra = tricks.saturating_sub(MIN_TRICKS) as u32;
    40 + 100 * extra + trump.step()
}

/// A trick-count bid made by a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bid {
    pub seat: Seat,
    pub tricks: u8,
    pub trump: Trump,
}

impl Bid {
    pub fn value(&self) -> u32 {
        contract_value(self.tricks, self.trump)
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tricks, self.trump)
    }
}

/// The bid the auction resolved to.
pub type Contract = Bid;

/// One entry of the auction history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum BidAction {
    Bid { seat: Seat, tricks: u8, trump: Trump },
    Pass { seat: Seat },
}

impl BidAction {
    pub fn seat(&self) -> Seat {
        match *self {
            BidAction::Bid { seat, .. } | BidAction::Pass { seat } => seat,
        }
    }

    pub fn label(&self) -> String {
        match *self {
            BidAction::Bid { tricks, trump, .. } => format!("{tricks}{trump}"),
            BidAction::Pass { .. } => "Pass".to_string(),
        }
    }
}

/// Every (tricks, trump) pair in ascending value order.
pub fn contracts_ascending() -> impl Iterator<Item = (u8, Trump)> {
    (MIN_TRICKS..=MAX_TRICKS).flat_map(|t| Trump::ALL.into_iter().map(move |tr| (t, tr)))
}

const CAPACITY_BASE: u32 = 12;
const CAPACITY_STEP: u32 = 3;
const JOKER_BONUS: u32 = 2;

fn rank_points(rank: Rank) -> u32 {
    match rank {
        Rank::Ace => 4,
        Rank::King => 3,
        Rank::Queen => 2,
        Rank::Jack => 1,
        _ => 0,
    }
}

/// Per-suit strength of a hand, scored in a single pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuitScores([u32; 4]);

impl SuitScores {
    /// Rank points plus one per card held in the suit; each joker adds two
    /// to every suit.
    pub fn score(hand: &Hand) -> Self {
        let mut scores = [0u32; 4];
        let mut jokers = 0u32;
        for card in hand.as_slice() {
            match (card.rank(), card.suit()) {
                (Some(rank), Some(suit)) => scores[suit.index()] += 1 + rank_points(rank),
                _ => jokers += 1,
            }
        }
        for s in &mut scores {
            *s += jokers * JOKER_BONUS;
        }
        Self(scores)
    }

    pub fn get(&self, suit: Suit) -> u32 {
        self.0[suit.index()]
    }

    /// Tricks the hand is expected to take with `suit` as trumps.
    pub fn capacity(&self, suit: Suit) -> Option<u8> {
        let score = self.get(suit);
        if score < CAPACITY_BASE {
            return None;
        }
        let extra = (score - CAPACITY_BASE) / CAPACITY_STEP;
        Some((MIN_TRICKS as u32 + extra).min(MAX_TRICKS as u32) as u8)
    }

    /// Suit with the highest score; ties go to the higher-ranked suit.
    pub fn best(&self) -> Suit {
        Suit::ALL.into_iter().max_by_key(|s| (self.get(*s), *s)).unwrap_or(Suit::Hearts)
    }
}

/// Pick the cheapest contract that beats `high_bid` and that the hand can
/// support, or `None` to pass.
///
/// No-trumps is never chosen.
pub fn choose_bid(hand: &Hand, high_bid: Option<&Bid>, seat: Seat) -> Option<Bid> {
    let scores = SuitScores::score(hand);
    let floor = high_bid.map(Bid::value);
    contracts_ascending()
        .filter(|(tricks, trump)| floor.map_or(true, |f| contract_value(*tricks, *trump) > f))
        .find(|(tricks, trump)| {
            trump.suit().and_then(|s| scores.capacity(s)).is_some_and(|cap| *tricks <= cap)
        })
        .map(|(tricks, trump)| Bid { seat, tricks, trump })
}
