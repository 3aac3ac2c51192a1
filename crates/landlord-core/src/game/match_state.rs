use crate::game::view::{PlayerView, SeatSummary};
use crate::model::card::Card;
use crate::model::deck::{Deck, DeckConfig, MAX_DECK_COPIES};
use crate::model::player::{Player, PlayerId};
use crate::model::round::{PassOutcome, PlayError, PlayOutcome, RoundState};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

pub const MIN_PLAYERS: usize = 3;

/// One seeded game: the roster, the deck it was dealt from and the round in
/// progress.
#[derive(Debug, Clone)]
pub struct MatchState {
    seed: u64,
    deck: DeckConfig,
    round: RoundState,
}

impl MatchState {
    pub fn new(roster: Vec<Player>, deck: DeckConfig) -> Result<Self, SetupError> {
        let seed: u64 = rand::random();
        Self::with_seed(roster, deck, seed)
    }

    /// Shuffles `deck` from `seed` and deals it to `roster`. The first seat
    /// leads.
    pub fn with_seed(roster: Vec<Player>, deck: DeckConfig, seed: u64) -> Result<Self, SetupError> {
        if deck.copies == 0 {
            return Err(SetupError::NoDecks);
        }
        if deck.copies > MAX_DECK_COPIES {
            return Err(SetupError::TooManyDecks {
                copies: deck.copies,
            });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let cards = Deck::shuffled(deck, &mut rng);
        let round = RoundState::deal(roster, &cards, 0)?;

        Ok(Self { seed, deck, round })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn deck_config(&self) -> DeckConfig {
        self.deck
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn round_mut(&mut self) -> &mut RoundState {
        &mut self.round
    }

    pub fn roster(&self) -> &[Player] {
        self.round.players()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.round.winner()
    }

    pub fn is_finished(&self) -> bool {
        self.winner().is_some()
    }

    pub fn turn_holder(&self) -> PlayerId {
        self.round.table().turn_holder()
    }

    pub fn apply_play(&mut self, actor: PlayerId, cards: &[Card]) -> Result<PlayOutcome, PlayError> {
        self.round.apply_play(actor, cards)
    }

    pub fn pass(&mut self, actor: PlayerId) -> Result<PassOutcome, PlayError> {
        self.round.pass(actor)
    }

    /// What `viewer` is allowed to see. Other hands appear only as counts.
    pub fn project_state(&self, viewer: PlayerId) -> Option<PlayerView> {
        let hand = self.round.hand(viewer)?;
        let table = self.round.table();
        let seats = self
            .round
            .players()
            .iter()
            .map(|player| SeatSummary {
                id: player.id,
                name: player.name.clone(),
                card_count: self.round.card_count(player.id).unwrap_or(0),
            })
            .collect();

        Some(PlayerView {
            viewer,
            hand: hand.cards().to_vec(),
            seats,
            turn_holder: table.turn_holder(),
            phase: table.phase(),
            standing: table.standing().cloned(),
            history: self.round.history().to_vec(),
            cards_dealt: self.round.cards_dealt(),
            deck: self.deck,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    TooFewPlayers { seated: usize },
    DuplicatePlayer(PlayerId),
    /// Constructed positions need one hand per player.
    HandCountMismatch { players: usize, hands: usize },
    NoDecks,
    TooManyDecks { copies: u8 },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::TooFewPlayers { seated } => write!(
                f,
                "a table needs at least {MIN_PLAYERS} players, got {seated}"
            ),
            SetupError::DuplicatePlayer(id) => write!(f, "{id} is seated twice"),
            SetupError::HandCountMismatch { players, hands } => {
                write!(f, "{players} players seated with {hands} hands")
            }
            SetupError::NoDecks => write!(f, "at least one deck copy is required"),
            SetupError::TooManyDecks { copies } => write!(
                f,
                "at most {MAX_DECK_COPIES} deck copies are supported, got {copies}"
            ),
        }
    }
}

impl std::error::Error for SetupError {}

#[cfg(test)]
mod tests {
    use super::{MatchState, SetupError};
    use crate::model::deck::DeckConfig;
    use crate::model::player::{Player, PlayerId};
    use crate::model::table::TablePhase;

    fn roster(n: u8) -> Vec<Player> {
        (0..n).map(|i| Player::new(i, format!("p{i}"))).collect()
    }

    #[test]
    fn three_players_split_a_single_deck() {
        let state = MatchState::with_seed(roster(3), DeckConfig::single(), 7).unwrap();
        for player in state.roster() {
            assert_eq!(state.round().card_count(player.id), Some(18));
        }
        assert!(state.round().undealt().is_empty());
        assert_eq!(state.turn_holder(), PlayerId(0));
    }

    #[test]
    fn same_seed_deals_same_hands() {
        let a = MatchState::with_seed(roster(3), DeckConfig::single(), 42).unwrap();
        let b = MatchState::with_seed(roster(3), DeckConfig::single(), 42).unwrap();
        for player in a.roster() {
            assert_eq!(a.round().hand(player.id), b.round().hand(player.id));
        }
    }

    #[test]
    fn five_players_with_two_decks() {
        let state = MatchState::with_seed(roster(5), DeckConfig::with_copies(2), 3).unwrap();
        assert_eq!(state.round().card_count(PlayerId(4)), Some(21));
        assert_eq!(state.round().undealt().len(), 3);
    }

    #[test]
    fn setup_rejects_bad_rosters() {
        assert_eq!(
            MatchState::with_seed(roster(2), DeckConfig::single(), 1).unwrap_err(),
            SetupError::TooFewPlayers { seated: 2 }
        );
        let mut dup = roster(3);
        dup.push(Player::new(1, "again"));
        assert_eq!(
            MatchState::with_seed(dup, DeckConfig::single(), 1).unwrap_err(),
            SetupError::DuplicatePlayer(PlayerId(1))
        );
        assert_eq!(
            MatchState::with_seed(roster(3), DeckConfig::with_copies(0), 1).unwrap_err(),
            SetupError::NoDecks
        );
        assert_eq!(
            MatchState::with_seed(roster(3), DeckConfig::with_copies(64), 1).unwrap_err(),
            SetupError::TooManyDecks { copies: 64 }
        );
        assert!(MatchState::with_seed(roster(3), DeckConfig::with_copies(63), 1).is_ok());
    }

    #[test]
    fn projection_hides_other_hands() {
        let state = MatchState::with_seed(roster(3), DeckConfig::single(), 9).unwrap();
        let view = state.project_state(PlayerId(1)).unwrap();
        assert_eq!(view.viewer, PlayerId(1));
        assert_eq!(view.hand.len(), 18);
        assert_eq!(view.seats.len(), 3);
        assert_eq!(view.phase, TablePhase::Leading);
        assert!(state.project_state(PlayerId(8)).is_none());

        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"card_count\":18"));
        assert!(!json.contains("\"hands\""));
    }
}
