use super::match_state::{MatchState, SetupError};
use crate::model::deck::DeckConfig;
use crate::model::player::Player;
use serde::{Deserialize, Serialize};

/// Enough to rebuild a deal: the seed, the deck composition and the roster
/// in seat order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSnapshot {
    pub seed: u64,
    #[serde(default = "default_copies")]
    pub copies: u8,
    pub roster: Vec<Player>,
}

fn default_copies() -> u8 {
    1
}

impl MatchSnapshot {
    pub fn capture(state: &MatchState) -> Self {
        MatchSnapshot {
            seed: state.seed(),
            copies: state.deck_config().copies,
            roster: state.roster().to_vec(),
        }
    }

    /// Deals the same hands again. Plays made after the deal are not kept.
    pub fn restore(self) -> Result<MatchState, SetupError> {
        MatchState::with_seed(self.roster, DeckConfig::with_copies(self.copies), self.seed)
    }

    pub fn to_json(state: &MatchState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::MatchSnapshot;
    use crate::game::match_state::MatchState;
    use crate::model::deck::DeckConfig;
    use crate::model::player::Player;

    fn state(seed: u64) -> MatchState {
        let roster = vec![
            Player::new(0, "ana"),
            Player::new(1, "bo"),
            Player::new(2, "cy"),
        ];
        MatchState::with_seed(roster, DeckConfig::single(), seed).unwrap()
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let json = MatchSnapshot::to_json(&state(99)).unwrap();
        assert!(json.contains("\"seed\": 99"));
        assert!(json.contains("\"copies\": 1"));
        assert!(json.contains("\"name\": \"bo\""));
    }

    #[test]
    fn snapshot_roundtrip_restores_the_deal() {
        let original = state(123);
        let restored = MatchSnapshot::capture(&original).restore().unwrap();
        assert_eq!(restored.seed(), 123);
        for player in original.roster() {
            assert_eq!(
                original.round().hand(player.id),
                restored.round().hand(player.id)
            );
        }
    }

    #[test]
    fn snapshot_without_copies_defaults_to_one_deck() {
        let legacy = r#"{
            "seed": 7,
            "roster": [
                {"id": 0, "name": "a"},
                {"id": 1, "name": "b"},
                {"id": 2, "name": "c"}
            ]
        }"#;
        let snapshot = MatchSnapshot::from_json(legacy).unwrap();
        assert_eq!(snapshot.copies, 1);
        assert_eq!(snapshot.roster.len(), 3);
        assert!(snapshot.restore().is_ok());
    }
}
