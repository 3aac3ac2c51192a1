use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Card ranks in climbing order. `Two` is the top ordinary rank and the two
/// jokers act as wildcards above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
    Two = 15,
    BlackJoker = 16,
    RedJoker = 17,
}

impl Rank {
    pub const COUNT: usize = 15;

    pub const ORDERED: [Rank; Rank::COUNT] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
        Rank::BlackJoker,
        Rank::RedJoker,
    ];

    /// Ranks that may take part in straights, consecutive pairs and airplanes.
    pub const CHAIN: [Rank; 12] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            15 => Some(Rank::Two),
            16 => Some(Rank::BlackJoker),
            17 => Some(Rank::RedJoker),
            _ => None,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Rank::COUNT {
            Rank::from_value(index as u8 + 3)
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Dense index in `0..Rank::COUNT`.
    pub const fn index(self) -> usize {
        self as usize - 3
    }

    pub const fn is_joker(self) -> bool {
        matches!(self, Rank::BlackJoker | Rank::RedJoker)
    }

    /// True for ranks above the ace: the two and both jokers.
    pub const fn is_high(self) -> bool {
        self.value() > Rank::Ace.value()
    }

    pub const fn can_chain(self) -> bool {
        !self.is_high()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::BlackJoker => "BJ",
            Rank::RedJoker => "RJ",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRankError(String);

impl fmt::Display for ParseRankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rank '{}'", self.0)
    }
}

impl std::error::Error for ParseRankError {}

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.trim().to_ascii_uppercase().as_str() {
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            "2" => Rank::Two,
            "BJ" => Rank::BlackJoker,
            "RJ" => Rank::RedJoker,
            _ => return Err(ParseRankError(s.to_string())),
        };
        Ok(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::Rank;

    #[test]
    fn from_value_maps() {
        assert_eq!(Rank::from_value(11), Some(Rank::Jack));
        assert_eq!(Rank::from_value(15), Some(Rank::Two));
        assert_eq!(Rank::from_value(2), None);
    }

    #[test]
    fn two_and_jokers_outrank_ace() {
        assert!(Rank::Two > Rank::Ace);
        assert!(Rank::RedJoker > Rank::BlackJoker);
        assert!(Rank::BlackJoker > Rank::Two);
        assert!(Rank::Two.is_high());
        assert!(!Rank::Ace.is_high());
    }

    #[test]
    fn index_roundtrip() {
        for (i, rank) in Rank::ORDERED.iter().enumerate() {
            assert_eq!(rank.index(), i);
            assert_eq!(Rank::from_index(i), Some(*rank));
        }
        assert_eq!(Rank::from_index(Rank::COUNT), None);
    }

    #[test]
    fn parse_matches_display() {
        for rank in Rank::ORDERED {
            assert_eq!(rank.to_string().parse::<Rank>(), Ok(rank));
        }
        assert!("1".parse::<Rank>().is_err());
    }
}
