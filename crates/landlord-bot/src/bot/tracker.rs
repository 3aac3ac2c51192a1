use landlord_core::game::view::PlayerView;
use landlord_core::model::counts::RankCounts;
use landlord_core::model::rank::Rank;

/// Per-rank count of cards the observer has not seen: the full deck minus
/// everything played so far minus the observer's own hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnseenTracker {
    unseen: RankCounts,
}

impl UnseenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_view(view: &PlayerView) -> Self {
        let mut tracker = Self::new();
        tracker.refresh(view);
        tracker
    }

    /// Recomputes the counts from scratch.
    pub fn refresh(&mut self, view: &PlayerView) {
        let mut unseen = RankCounts::new();
        for rank in Rank::ORDERED {
            unseen.set(rank, view.deck.rank_total(rank));
        }
        for card in view.played_cards().chain(view.hand.iter()) {
            unseen.remove(card.rank, 1);
        }
        self.unseen = unseen;
    }

    pub fn unseen(&self, rank: Rank) -> u8 {
        self.unseen.get(rank)
    }

    pub fn is_unseen(&self, rank: Rank) -> bool {
        self.unseen(rank) > 0
    }

    pub fn unseen_count(&self) -> usize {
        self.unseen.total()
    }

    /// Ranks above the ace that still have copies outside our view.
    pub fn high_ranks_outstanding(&self) -> usize {
        Rank::ORDERED
            .iter()
            .filter(|rank| rank.is_high() && self.is_unseen(**rank))
            .count()
    }
}
