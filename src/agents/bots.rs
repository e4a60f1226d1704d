use crate::api::{Phase, SessionSnapshot};
use crate::bidding::{choose_bid, Seat};
use crate::cards::{effective_suit, Card, Suit};
use crate::client::ClientError;
use crate::engine::{Move, TableEngine};
use crate::hand::Hand;
use tracing::debug;

use super::{AgentKind, PlayerAgent};

/// Scripted opponent: heuristic bidding, takes the kitty when it wins the
/// contract, and plays by simple follow-suit rules.
#[derive(Debug, Default)]
pub struct BotAgent;

impl BotAgent {
    pub fn new() -> Self {
        Self
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    fn on_turn(&mut self, engine: &mut dyn TableEngine, seat: Seat) -> Result<bool, ClientError> {
        let Some(snap) = engine.snapshot() else {
            return Ok(false);
        };
        if snap.current_seat() != Some(seat) {
            return Ok(false);
        }
        let Some(mv) = decide(snap, seat) else {
            return Ok(false);
        };
        debug!(seat, %mv, "bot decision");
        engine.submit(seat, mv)?;
        Ok(true)
    }
}

fn decide(snap: &SessionSnapshot, seat: Seat) -> Option<Move> {
    match snap.phase {
        Phase::Bidding => {
            let hand = snap.hand(seat).filter(|h| !h.is_empty())?;
            // Never raise our own standing bid.
            if snap.high_bid().is_some_and(|b| b.seat == seat) {
                return Some(Move::Pass);
            }
            Some(match choose_bid(hand, snap.high_bid(), seat) {
                Some(bid) => Move::Bid { tricks: bid.tricks, trump: bid.trump },
                None => Move::Pass,
            })
        }
        Phase::Kitty => snap.hand(seat).filter(|h| !h.is_empty()).map(|_| Move::RevealKitty),
        Phase::Playing => {
            let hand = snap.hand(seat)?;
            let led = snap.play.as_ref().and_then(|p| p.led_card());
            let trump = snap.trump().and_then(|t| t.suit());
            choose_play(hand, led, trump).map(Move::Play)
        }
        _ => None,
    }
}

/// Rough trick-taking power of a card once trumps are known.
fn card_power(card: Card, trump: Option<Suit>) -> u8 {
    match (card, trump) {
        (Card::Joker, _) => 100,
        (c, Some(t)) if c.is_right_bower(t) => 90,
        (c, Some(t)) if c.is_left_bower(t) => 80,
        (Card::Suited { rank, suit }, Some(t)) if suit == t => 40 + rank.value(),
        (Card::Suited { rank, .. }, _) => rank.value(),
    }
}

/// Pick a card: lead the strongest card; otherwise follow the led suit with
/// the weakest card that follows, or throw the weakest card held.
pub fn choose_play(hand: &Hand, led: Option<Card>, trump: Option<Suit>) -> Option<Card> {
    let cards = hand.as_slice().iter().copied();
    let Some(led) = led else {
        return cards.max_by_key(|c| card_power(*c, trump));
    };
    let led_suit = effective_suit(led, trump);
    let following = cards
        .clone()
        .filter(|c| led_suit.is_some() && effective_suit(*c, trump) == led_suit)
        .min_by_key(|c| card_power(*c, trump));
    following.or_else(|| cards.min_by_key(|c| card_power(*c, trump)))
}
