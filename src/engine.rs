// Table boundary. Agents (human or bot) see the latest server snapshot and
// submit moves through this trait, so they never touch the HTTP client or UI
// state directly. It is implemented for `Session`.

use crate::api::SessionSnapshot;
use crate::bidding::{Seat, Trump};
use crate::cards::Card;
use crate::client::ClientError;
use std::fmt;

/// A move a seat can send to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Move {
    Bid { tricks: u8, trump: Trump },
    Pass,
    RevealKitty,
    Play(Card),
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Bid { tricks, trump } => write!(f, "bid {tricks}{trump}"),
            Move::Pass => f.write_str("pass"),
            Move::RevealKitty => f.write_str("reveal kitty"),
            Move::Play(card) => write!(f, "play {card}"),
        }
    }
}

pub trait TableEngine {
    // Queries
    fn snapshot(&self) -> Option<&SessionSnapshot>;
    fn current_seat(&self) -> Option<Seat> {
        self.snapshot().and_then(SessionSnapshot::current_seat)
    }

    // Actions
    fn submit(&mut self, seat: Seat, mv: Move) -> Result<(), ClientError>;
}
