use crate::model::card::Card;
use crate::model::deck::DeckConfig;
use crate::model::player::PlayerId;
use crate::model::round::Turn;
use crate::model::table::{Standing, TablePhase};
use crate::rules::Play;
use serde::Serialize;

/// Public facts about one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatSummary {
    pub id: PlayerId,
    pub name: String,
    pub card_count: usize,
}

/// Everything one player may know about the table: their own hand, card
/// counts for every seat, the standing play and the public history.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub viewer: PlayerId,
    pub hand: Vec<Card>,
    pub seats: Vec<SeatSummary>,
    pub turn_holder: PlayerId,
    pub phase: TablePhase,
    pub standing: Option<Standing>,
    pub history: Vec<Turn>,
    pub cards_dealt: usize,
    pub deck: DeckConfig,
}

impl PlayerView {
    pub fn card_count(&self, player: PlayerId) -> Option<usize> {
        self.seats
            .iter()
            .find(|seat| seat.id == player)
            .map(|seat| seat.card_count)
    }

    pub fn cards_remaining(&self) -> usize {
        self.seats.iter().map(|seat| seat.card_count).sum()
    }

    pub fn is_my_turn(&self) -> bool {
        self.turn_holder == self.viewer
    }

    /// The play to beat, or `None` when the viewer would be leading.
    pub fn standing_to_beat(&self) -> Option<&Standing> {
        match self.phase {
            TablePhase::Following => self.standing.as_ref(),
            _ => None,
        }
    }

    pub fn played_cards(&self) -> impl Iterator<Item = &Card> {
        self.history
            .iter()
            .filter_map(Turn::play)
            .flat_map(Play::cards)
    }

    /// Smallest hand among the other seats that still hold cards.
    pub fn fewest_opponent_cards(&self) -> Option<usize> {
        self.seats
            .iter()
            .filter(|seat| seat.id != self.viewer && seat.card_count > 0)
            .map(|seat| seat.card_count)
            .min()
    }
}
