use crate::game::match_state::{MIN_PLAYERS, SetupError};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::player::{Player, PlayerId};
use crate::model::table::{TablePhase, TableState};
use crate::rules::{Classification, Play};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// One entry of the public table history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum Turn {
    Played { player: PlayerId, play: Play },
    Passed { player: PlayerId },
}

impl Turn {
    pub fn player(&self) -> PlayerId {
        match self {
            Turn::Played { player, .. } | Turn::Passed { player } => *player,
        }
    }

    pub fn play(&self) -> Option<&Play> {
        match self {
            Turn::Played { play, .. } => Some(play),
            Turn::Passed { .. } => None,
        }
    }
}

/// Hands, table state and history for one game in progress.
#[derive(Debug, Clone)]
pub struct RoundState {
    players: Vec<Player>,
    hands: Vec<Hand>,
    undealt: Vec<Card>,
    table: TableState,
    history: Vec<Turn>,
    cards_dealt: usize,
}

impl RoundState {
    /// Deals the deck round-robin, the same number of cards to every seat.
    /// Cards left over after an even split stay undealt.
    pub fn deal(players: Vec<Player>, deck: &Deck, leader: usize) -> Result<Self, SetupError> {
        check_roster(&players)?;
        let seats = players.len();
        let per_seat = deck.cards().len() / seats;
        let dealt = per_seat * seats;
        let mut hands = vec![Hand::new(); seats];

        for (index, card) in deck.cards()[..dealt].iter().enumerate() {
            hands[index % seats].add(*card);
        }
        let undealt = deck.cards()[dealt..].to_vec();

        let mut round = Self::from_hands(players, hands, leader)?;
        round.undealt = undealt;
        Ok(round)
    }

    /// Seats players with fixed hands. Used for constructed positions.
    pub fn from_hands(
        players: Vec<Player>,
        hands: Vec<Hand>,
        leader: usize,
    ) -> Result<Self, SetupError> {
        check_roster(&players)?;
        if hands.len() != players.len() {
            return Err(SetupError::HandCountMismatch {
                players: players.len(),
                hands: hands.len(),
            });
        }
        let order = players.iter().map(|p| p.id).collect();
        let cards_dealt = hands.iter().map(Hand::len).sum();
        Ok(Self {
            players,
            hands,
            undealt: Vec::new(),
            table: TableState::new(order, leader),
            history: Vec::new(),
            cards_dealt,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn undealt(&self) -> &[Card] {
        &self.undealt
    }

    pub fn cards_dealt(&self) -> usize {
        self.cards_dealt
    }

    pub fn cards_remaining(&self) -> usize {
        self.hands.iter().map(Hand::len).sum()
    }

    pub fn hand(&self, player: PlayerId) -> Option<&Hand> {
        self.table.seat_of(player).map(|seat| &self.hands[seat])
    }

    pub fn card_count(&self, player: PlayerId) -> Option<usize> {
        self.hand(player).map(Hand::len)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.table.winner()
    }

    pub fn phase(&self) -> TablePhase {
        self.table.phase()
    }

    pub fn apply_play(&mut self, actor: PlayerId, cards: &[Card]) -> Result<PlayOutcome, PlayError> {
        let seat = self.check_turn(actor)?;
        if cards.is_empty() {
            return Err(PlayError::EmptyPlay);
        }
        if !self.hands[seat].contains_all(cards) {
            return Err(PlayError::CardsNotOwned);
        }

        let play = Play::new(cards.to_vec()).map_err(|_| PlayError::UnrecognizedShape)?;

        if let TablePhase::Following = self.table.phase()
            && let Some(standing) = self.table.standing()
            && !play.beats(&standing.play)
        {
            return Err(PlayError::InsufficientRank {
                standing: standing.play.classification(),
            });
        }

        self.hands[seat].remove_all(cards);
        self.history.push(Turn::Played {
            player: actor,
            play: play.clone(),
        });
        self.table.accept(actor, play);

        if self.hands[seat].is_empty() {
            self.table.finish(actor);
            return Ok(PlayOutcome::Won { winner: actor });
        }

        let active = self.active_seats();
        self.table.advance(&active);
        Ok(PlayOutcome::Accepted)
    }

    pub fn pass(&mut self, actor: PlayerId) -> Result<PassOutcome, PlayError> {
        self.check_turn(actor)?;
        if self.table.is_leading() {
            return Err(PlayError::MustPlayWhileLeading);
        }

        self.history.push(Turn::Passed { player: actor });
        let active = self.active_seats();
        self.table.advance(&active);

        if self.table.settle() {
            Ok(PassOutcome::LeadRegained {
                leader: self.table.turn_holder(),
            })
        } else {
            Ok(PassOutcome::Passed)
        }
    }

    fn check_turn(&self, actor: PlayerId) -> Result<usize, PlayError> {
        if let Some(winner) = self.table.winner() {
            return Err(PlayError::GameOver { winner });
        }
        let seat = self
            .table
            .seat_of(actor)
            .ok_or(PlayError::UnknownPlayer(actor))?;
        let expected = self.table.turn_holder();
        if expected != actor {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: actor,
            });
        }
        Ok(seat)
    }

    fn active_seats(&self) -> Vec<bool> {
        self.hands.iter().map(|hand| !hand.is_empty()).collect()
    }
}

fn check_roster(players: &[Player]) -> Result<(), SetupError> {
    if players.len() < MIN_PLAYERS {
        return Err(SetupError::TooFewPlayers {
            seated: players.len(),
        });
    }
    let mut seen = HashSet::new();
    for player in players {
        if !seen.insert(player.id) {
            return Err(SetupError::DuplicatePlayer(player.id));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Accepted,
    Won { winner: PlayerId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    Passed,
    /// Everyone else passed; the standing play was cleared and its owner leads.
    LeadRegained { leader: PlayerId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    GameOver { winner: PlayerId },
    UnknownPlayer(PlayerId),
    OutOfTurn { expected: PlayerId, actual: PlayerId },
    EmptyPlay,
    CardsNotOwned,
    UnrecognizedShape,
    InsufficientRank { standing: Classification },
    MustPlayWhileLeading,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::GameOver { winner } => write!(f, "game already won by {winner}"),
            PlayError::UnknownPlayer(player) => write!(f, "{player} is not seated at this table"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to act next but got {actual}")
            }
            PlayError::EmptyPlay => write!(f, "a play needs at least one card"),
            PlayError::CardsNotOwned => write!(f, "cards are not in the player's hand"),
            PlayError::UnrecognizedShape => write!(f, "cards do not form a combination"),
            PlayError::InsufficientRank { standing } => write!(
                f,
                "play does not beat the standing {} of rank {}",
                standing.kind, standing.rank
            ),
            PlayError::MustPlayWhileLeading => write!(f, "the leader cannot pass"),
        }
    }
}

impl std::error::Error for PlayError {}

#[cfg(test)]
mod tests {
    use super::{PassOutcome, PlayError, PlayOutcome, RoundState, Turn};
    use crate::game::match_state::SetupError;
    use crate::model::card::{Card, parse_cards};
    use crate::model::deck::{Deck, DeckConfig};
    use crate::model::hand::Hand;
    use crate::model::player::{Player, PlayerId};
    use crate::model::table::TablePhase;
    use crate::rules::ComboKind;

    fn roster(n: u8) -> Vec<Player> {
        (0..n).map(|i| Player::new(i, format!("p{i}"))).collect()
    }

    fn cards(text: &str) -> Vec<Card> {
        parse_cards(text).unwrap()
    }

    fn constructed(hands: [&str; 3]) -> RoundState {
        let hands = hands
            .iter()
            .map(|text| Hand::with_cards(cards(text)))
            .collect();
        RoundState::from_hands(roster(3), hands, 0).unwrap()
    }

    #[test]
    fn dealing_splits_evenly_and_keeps_remainder() {
        let deck = Deck::shuffled_with_seed(DeckConfig::single(), 5);
        let round = RoundState::deal(roster(4), &deck, 0).unwrap();
        for player in round.players() {
            assert_eq!(round.card_count(player.id), Some(13));
        }
        assert_eq!(round.undealt().len(), 2);
        assert_eq!(round.cards_dealt(), 52);
        assert_eq!(round.cards_remaining() + round.undealt().len(), 54);
    }

    #[test]
    fn malformed_rosters_are_rejected() {
        let deck = Deck::shuffled_with_seed(DeckConfig::single(), 5);
        assert_eq!(
            RoundState::deal(Vec::new(), &deck, 0).unwrap_err(),
            SetupError::TooFewPlayers { seated: 0 }
        );
        assert_eq!(
            RoundState::from_hands(roster(3), vec![Hand::new(); 2], 0).unwrap_err(),
            SetupError::HandCountMismatch {
                players: 3,
                hands: 2
            }
        );
        let mut twice = roster(3);
        twice[2] = Player::new(0, "again");
        assert_eq!(
            RoundState::from_hands(twice, vec![Hand::new(); 3], 0).unwrap_err(),
            SetupError::DuplicatePlayer(PlayerId(0))
        );
    }

    #[test]
    fn out_of_turn_and_unknown_players_are_rejected() {
        let mut round = constructed(["3S 4S", "5S 6S", "7S 8S"]);
        assert_eq!(
            round.apply_play(PlayerId(1), &cards("5S")),
            Err(PlayError::OutOfTurn {
                expected: PlayerId(0),
                actual: PlayerId(1)
            })
        );
        assert_eq!(
            round.pass(PlayerId(9)),
            Err(PlayError::UnknownPlayer(PlayerId(9)))
        );
    }

    #[test]
    fn cards_must_be_owned_and_shaped() {
        let mut round = constructed(["3S 4S 9H", "5S 6S", "7S 8S"]);
        assert_eq!(
            round.apply_play(PlayerId(0), &cards("5S")),
            Err(PlayError::CardsNotOwned)
        );
        assert_eq!(
            round.apply_play(PlayerId(0), &cards("3S 4S")),
            Err(PlayError::UnrecognizedShape)
        );
        assert_eq!(round.apply_play(PlayerId(0), &[]), Err(PlayError::EmptyPlay));
        assert_eq!(round.card_count(PlayerId(0)), Some(3));
    }

    #[test]
    fn leader_cannot_pass() {
        let mut round = constructed(["3S 4S", "5S 6S", "7S 8S"]);
        assert_eq!(round.pass(PlayerId(0)), Err(PlayError::MustPlayWhileLeading));
    }

    #[test]
    fn accepted_play_moves_turn_and_records_history() {
        let mut round = constructed(["3S 4S", "5S 6S", "7S 8S"]);
        assert_eq!(
            round.apply_play(PlayerId(0), &cards("3S")),
            Ok(PlayOutcome::Accepted)
        );
        assert_eq!(round.table().turn_holder(), PlayerId(1));
        assert_eq!(round.phase(), TablePhase::Following);
        assert!(matches!(
            round.history().last(),
            Some(Turn::Played { player: PlayerId(0), .. })
        ));
    }

    #[test]
    fn follower_must_match_shape_and_rank() {
        let mut round = constructed(["5S 5H 9S", "4S 4H 6S 6H 8D", "7S 8S"]);
        round.apply_play(PlayerId(0), &cards("5S 5H")).unwrap();
        let err = round.apply_play(PlayerId(1), &cards("4S 4H")).unwrap_err();
        match err {
            PlayError::InsufficientRank { standing } => {
                assert_eq!(standing.kind, ComboKind::Pair);
                assert_eq!(standing.rank, 5);
            }
            other => panic!("expected InsufficientRank, got {other:?}"),
        }
        assert!(matches!(
            round.apply_play(PlayerId(1), &cards("8D")),
            Err(PlayError::InsufficientRank { .. })
        ));
        assert_eq!(
            round.apply_play(PlayerId(1), &cards("6S 6H")),
            Ok(PlayOutcome::Accepted)
        );
    }

    #[test]
    fn lead_returns_after_everyone_passes() {
        let mut round = constructed(["3S 9S", "5S 6S", "7S 8S"]);
        round.apply_play(PlayerId(0), &cards("9S")).unwrap();
        assert_eq!(round.pass(PlayerId(1)), Ok(PassOutcome::Passed));
        assert_eq!(
            round.pass(PlayerId(2)),
            Ok(PassOutcome::LeadRegained {
                leader: PlayerId(0)
            })
        );
        assert!(round.table().standing().is_none());
        assert_eq!(round.phase(), TablePhase::Leading);
    }

    #[test]
    fn emptying_hand_wins_and_freezes_table() {
        let mut round = constructed(["3S", "5S 6S", "7S 8S"]);
        assert_eq!(
            round.apply_play(PlayerId(0), &cards("3S")),
            Ok(PlayOutcome::Won {
                winner: PlayerId(0)
            })
        );
        assert_eq!(round.winner(), Some(PlayerId(0)));
        assert_eq!(
            round.pass(PlayerId(1)),
            Err(PlayError::GameOver {
                winner: PlayerId(0)
            })
        );
    }

    #[test]
    fn error_messages_are_readable() {
        let err = PlayError::OutOfTurn {
            expected: PlayerId(0),
            actual: PlayerId(2),
        };
        assert_eq!(err.to_string(), "expected P0 to act next but got P2");
    }
}
