use crate::model::card::Card;
use crate::model::rank::Rank;
use serde::{Deserialize, Serialize};

/// Multiset of ranks: how many cards of each rank a group of cards holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RankCounts {
    counts: [u8; Rank::COUNT],
}

impl RankCounts {
    pub const fn new() -> Self {
        Self {
            counts: [0; Rank::COUNT],
        }
    }

    pub fn from_cards<I>(cards: I) -> Self
    where
        I: IntoIterator<Item = Card>,
    {
        let mut counts = Self::new();
        for card in cards {
            counts.add(card.rank, 1);
        }
        counts
    }

    pub fn get(&self, rank: Rank) -> u8 {
        self.counts[rank.index()]
    }

    pub fn set(&mut self, rank: Rank, count: u8) {
        self.counts[rank.index()] = count;
    }

    pub fn add(&mut self, rank: Rank, count: u8) {
        let slot = &mut self.counts[rank.index()];
        *slot = slot.saturating_add(count);
    }

    pub fn remove(&mut self, rank: Rank, count: u8) {
        let slot = &mut self.counts[rank.index()];
        *slot = slot.saturating_sub(count);
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Ranks with a non-zero count, lowest first.
    pub fn present(&self) -> impl Iterator<Item = (Rank, u8)> + '_ {
        Rank::ORDERED
            .iter()
            .copied()
            .map(|rank| (rank, self.get(rank)))
            .filter(|&(_, count)| count > 0)
    }
}
