use crate::model::card::Card;
use crate::rules::{beats, classify};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Comparable rank reported for a rocket; above every card value.
pub const ROCKET_RANK: u8 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComboKind {
    Single,
    Pair,
    Triple,
    TripleWithOne,
    TripleWithPair,
    Straight,
    ConsecutivePairs,
    Airplane,
    AirplaneWithSingles,
    AirplaneWithPairs,
    QuadWithTwo,
    Bomb,
    Rocket,
    Unrecognized,
}

impl ComboKind {
    /// Bombs and rockets may beat a standing play of a different shape.
    pub const fn is_escalation(self) -> bool {
        matches!(self, ComboKind::Bomb | ComboKind::Rocket)
    }

    pub const fn is_airplane(self) -> bool {
        matches!(
            self,
            ComboKind::Airplane | ComboKind::AirplaneWithSingles | ComboKind::AirplaneWithPairs
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ComboKind::Single => "single",
            ComboKind::Pair => "pair",
            ComboKind::Triple => "triple",
            ComboKind::TripleWithOne => "triple_with_one",
            ComboKind::TripleWithPair => "triple_with_pair",
            ComboKind::Straight => "straight",
            ComboKind::ConsecutivePairs => "consecutive_pairs",
            ComboKind::Airplane => "airplane",
            ComboKind::AirplaneWithSingles => "airplane_with_singles",
            ComboKind::AirplaneWithPairs => "airplane_with_pairs",
            ComboKind::QuadWithTwo => "quad_with_two",
            ComboKind::Bomb => "bomb",
            ComboKind::Rocket => "rocket",
            ComboKind::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for ComboKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output: the shape of a card set and its comparable rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub kind: ComboKind,
    pub rank: u8,
}

impl Classification {
    pub const UNRECOGNIZED: Classification = Classification {
        kind: ComboKind::Unrecognized,
        rank: 0,
    };

    pub const fn new(kind: ComboKind, rank: u8) -> Self {
        Self { kind, rank }
    }

    pub fn is_recognized(self) -> bool {
        self.kind != ComboKind::Unrecognized
    }
}

/// A recognized combination. The classification is computed once on
/// construction and always matches the cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Play {
    cards: Vec<Card>,
    kind: ComboKind,
    rank: u8,
}

impl Play {
    pub fn new(mut cards: Vec<Card>) -> Result<Self, UnrecognizedPlay> {
        let class = classify(&cards);
        if !class.is_recognized() {
            return Err(UnrecognizedPlay { cards });
        }
        cards.sort();
        Ok(Self {
            cards,
            kind: class.kind,
            rank: class.rank,
        })
    }

    pub fn single(card: Card) -> Self {
        Self {
            cards: vec![card],
            kind: ComboKind::Single,
            rank: card.value(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub fn kind(&self) -> ComboKind {
        self.kind
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn classification(&self) -> Classification {
        Classification::new(self.kind, self.rank)
    }

    /// Whether this play may be laid on top of `standing`.
    pub fn beats(&self, standing: &Play) -> bool {
        beats(
            self.classification(),
            self.len(),
            standing.classification(),
            standing.len(),
        )
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.kind)?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("]")
    }
}

/// Returned by [`Play::new`] when the cards form no combination; hands the
/// cards back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedPlay {
    cards: Vec<Card>,
}

impl UnrecognizedPlay {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl fmt::Display for UnrecognizedPlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cards do not form a combination", self.cards.len())
    }
}

impl std::error::Error for UnrecognizedPlay {}

#[cfg(test)]
mod tests {
    use super::{ComboKind, Play};
    use crate::model::card::parse_cards;

    #[test]
    fn play_records_classification_and_sorts() {
        let play = Play::new(parse_cards("7S 5H 6D 4C 3S").unwrap()).unwrap();
        assert_eq!(play.kind(), ComboKind::Straight);
        assert_eq!(play.rank(), 7);
        assert_eq!(play.cards()[0].to_string(), "3S");
        assert_eq!(play.to_string(), "straight[3S 4C 5H 6D 7S]");
    }

    #[test]
    fn unrecognized_cards_are_returned() {
        let cards = parse_cards("3S 5H").unwrap();
        let err = Play::new(cards.clone()).unwrap_err();
        assert_eq!(err.into_cards(), cards);
    }

    #[test]
    fn escalation_kinds() {
        assert!(ComboKind::Bomb.is_escalation());
        assert!(ComboKind::Rocket.is_escalation());
        assert!(!ComboKind::QuadWithTwo.is_escalation());
        assert!(ComboKind::AirplaneWithPairs.is_airplane());
    }
}
