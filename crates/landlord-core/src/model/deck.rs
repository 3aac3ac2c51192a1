use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Cards in one physical deck: 52 ordinary cards plus both jokers.
pub const CARDS_PER_DECK: usize = 54;

/// Most copies whose per-rank totals still fit a `u8` count (4 × 63 = 252).
pub const MAX_DECK_COPIES: u8 = 63;

/// Deck composition shared by every table in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckConfig {
    pub copies: u8,
}

impl DeckConfig {
    pub const fn single() -> Self {
        Self { copies: 1 }
    }

    pub const fn with_copies(copies: u8) -> Self {
        Self { copies }
    }

    pub const fn total_cards(self) -> usize {
        CARDS_PER_DECK * self.copies as usize
    }

    /// How many cards of `rank` the full composition holds.
    pub const fn rank_total(self, rank: Rank) -> u8 {
        if rank.is_joker() {
            self.copies
        } else {
            self.copies.saturating_mul(4)
        }
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self::single()
    }
}

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard(config: DeckConfig) -> Self {
        let mut cards = Vec::with_capacity(config.total_cards());
        for _ in 0..config.copies {
            for suit in Suit::ALL.iter().copied() {
                for rank in Rank::ORDERED.iter().copied().filter(|r| !r.is_joker()) {
                    cards.push(Card::new(rank, suit));
                }
            }
            cards.push(Card::BLACK_JOKER);
            cards.push(Card::RED_JOKER);
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(config: DeckConfig, rng: &mut R) -> Self {
        let mut deck = Self::standard(config);
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(config: DeckConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(config, &mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
