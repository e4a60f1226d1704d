use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Cards dealt to each of the four seats.
pub const HAND_SIZE: usize = 10;
/// Cards set aside for the contract winner.
pub const KITTY_SIZE: usize = 3;

/// The 43-card four-player 500 deck: five through ace in every suit, the
/// red fours and one joker.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use five_hundred::deck::Deck;
    ///
    /// let deck = Deck::five_hundred();
    /// assert_eq!(deck.len(), 43);
    /// ```
    pub fn five_hundred() -> Self {
        let mut cards = Vec::with_capacity(43);
        for s in Suit::ALL {
            for r in Rank::ALL {
                if Self::holds_rank(r, s) {
                    cards.push(Card::new(r, s));
                }
            }
        }
        cards.push(Card::JOKER);
        Self { cards }
    }

    fn holds_rank(rank: Rank, suit: Suit) -> bool {
        match rank {
            Rank::Two | Rank::Three => false,
            Rank::Four => matches!(suit, Suit::Diamonds | Suit::Hearts),
            _ => true,
        }
    }

    /// Whether `card` belongs to a four-player 500 deck.
    pub fn contains(card: Card) -> bool {
        match card {
            Card::Joker => true,
            Card::Suited { rank, suit } => Self::holds_rank(rank, suit),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Draw `n` cards from the top of the deck.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.cards.pop()).collect()
    }

    /// Split the deck into four hands and the kitty.
    pub fn deal(mut self) -> ([Vec<Card>; 4], Vec<Card>) {
        let hands = [
            self.draw_n(HAND_SIZE),
            self.draw_n(HAND_SIZE),
            self.draw_n(HAND_SIZE),
            self.draw_n(HAND_SIZE),
        ];
        let kitty = self.draw_n(KITTY_SIZE);
        (hands, kitty)
    }
}
