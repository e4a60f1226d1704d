use crate::cards::{parse_cards, Card, CardParseError, Suit};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Display order for two cards: jokers first, then suit order, then rank
/// descending.
///
/// ```
/// use five_hundred::cards::{Card, Rank, Suit};
/// use five_hundred::hand::display_order;
/// use std::cmp::Ordering;
///
/// let ah = Card::new(Rank::Ace, Suit::Hearts);
/// assert_eq!(display_order(&Card::JOKER, &ah), Ordering::Less);
/// ```
pub fn display_order(a: &Card, b: &Card) -> Ordering {
    match (a, b) {
        (Card::Joker, Card::Joker) => Ordering::Equal,
        (Card::Joker, _) => Ordering::Less,
        (_, Card::Joker) => Ordering::Greater,
        (Card::Suited { rank: ra, suit: sa }, Card::Suited { rank: rb, suit: sb }) => {
            sa.cmp(sb).then_with(|| rb.cmp(ra))
        }
    }
}

/// Sort cards in place for display.
pub fn sort_hand(cards: &mut [Card]) {
    cards.sort_by(display_order);
}

/// The cards a seat holds, as last reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn has_joker(&self) -> bool {
        self.cards.iter().any(|c| c.is_joker())
    }

    pub fn joker_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_joker()).count()
    }

    /// Cards whose printed suit is `suit`.
    pub fn cards_of(&self, suit: Suit) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied().filter(move |c| c.suit() == Some(suit))
    }

    /// Remove one copy of `card`; returns whether it was held.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|c| *c == card) {
            Some(i) => {
                self.cards.remove(i);
                true
            }
            None => false,
        }
    }

    /// A copy of this hand in display order.
    pub fn sorted(&self) -> Hand {
        let mut cards = self.cards.clone();
        sort_hand(&mut cards);
        Hand { cards }
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}

impl FromStr for Hand {
    type Err = CardParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cards(s).map(Hand::new)
    }
}
