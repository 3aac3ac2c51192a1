use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// A single card. Jokers carry no suit; suits never affect legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Option<Suit>,
}

impl Card {
    pub const BLACK_JOKER: Card = Card::suitless(Rank::BlackJoker);
    pub const RED_JOKER: Card = Card::suitless(Rank::RedJoker);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit: Some(suit),
        }
    }

    pub const fn suitless(rank: Rank) -> Self {
        Self { rank, suit: None }
    }

    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    pub const fn is_joker(self) -> bool {
        self.rank.is_joker()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Some(suit) => write!(f, "{}{}", self.rank, suit),
            None => write!(f, "{}", self.rank),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCardError(String);

impl fmt::Display for ParseCardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse card '{}'", self.0)
    }
}

impl std::error::Error for ParseCardError {}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Accepts a rank optionally followed by a suit letter: `10H`, `QS`, `7`, `BJ`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let error = || ParseCardError(s.to_string());
        if let Ok(rank) = text.parse::<Rank>() {
            return Ok(Card::suitless(rank));
        }
        let mut chars = text.chars();
        let suit = chars
            .next_back()
            .and_then(Suit::from_symbol)
            .ok_or_else(error)?;
        let rank = chars.as_str().parse::<Rank>().map_err(|_| error())?;
        if rank.is_joker() {
            return Err(error());
        }
        Ok(Card::new(rank, suit))
    }
}

/// Parses a whitespace or comma separated list of cards.
pub fn parse_cards(text: &str) -> Result<Vec<Card>, ParseCardError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}
