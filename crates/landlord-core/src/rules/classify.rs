use crate::model::card::Card;
use crate::model::counts::RankCounts;
use crate::model::rank::Rank;
use crate::rules::combo::{Classification, ComboKind, ROCKET_RANK};

const MIN_STRAIGHT: usize = 5;
const MIN_PAIR_RUN_CARDS: usize = 6;
const MIN_AIRPLANE_TRIPLES: usize = 2;

/// Maps a card multiset to its combination kind and comparable rank.
///
/// Pure and total: every input, including the empty set, yields a result,
/// with [`Classification::UNRECOGNIZED`] for anything that is not a legal
/// combination.
pub fn classify(cards: &[Card]) -> Classification {
    if cards.is_empty() {
        return Classification::UNRECOGNIZED;
    }

    let counts = RankCounts::from_cards(cards.iter().copied());
    let total = cards.len();

    if total == 2 && counts.get(Rank::BlackJoker) == 1 && counts.get(Rank::RedJoker) == 1 {
        return Classification::new(ComboKind::Rocket, ROCKET_RANK);
    }

    let groups: Vec<(Rank, u8)> = counts.present().collect();

    if let [(rank, count)] = groups.as_slice() {
        let kind = match count {
            1 => Some(ComboKind::Single),
            2 => Some(ComboKind::Pair),
            3 => Some(ComboKind::Triple),
            4 => Some(ComboKind::Bomb),
            _ => None,
        };
        if let Some(kind) = kind {
            return Classification::new(kind, rank.value());
        }
    }

    if let Some(class) = classify_attachment(&groups) {
        return class;
    }

    classify_chain(&groups, total)
}

/// Triples and quads carrying kicker cards.
fn classify_attachment(groups: &[(Rank, u8)]) -> Option<Classification> {
    match groups {
        [a, b] => {
            let (main, kicker) = if a.1 >= b.1 { (a, b) } else { (b, a) };
            let kind = match (main.1, kicker.1) {
                (3, 1) => ComboKind::TripleWithOne,
                (3, 2) => ComboKind::TripleWithPair,
                (4, 2) => ComboKind::QuadWithTwo,
                _ => return None,
            };
            Some(Classification::new(kind, main.0.value()))
        }
        [_, _, _] => {
            let quad = groups.iter().find(|(_, count)| *count == 4)?;
            let singles = groups.iter().filter(|(_, count)| *count == 1).count();
            (singles == 2).then(|| Classification::new(ComboKind::QuadWithTwo, quad.0.value()))
        }
        _ => None,
    }
}

/// Straights, consecutive pairs and airplanes. None of them may hold a two
/// or a joker.
fn classify_chain(groups: &[(Rank, u8)], total: usize) -> Classification {
    if groups.iter().any(|(rank, _)| !rank.can_chain()) {
        return Classification::UNRECOGNIZED;
    }

    let ranks: Vec<Rank> = groups.iter().map(|(rank, _)| *rank).collect();
    let Some(high) = ranks.last().map(|rank| rank.value()) else {
        return Classification::UNRECOGNIZED;
    };

    if is_contiguous(&ranks) {
        let all = |n: u8| groups.iter().all(|(_, count)| *count == n);
        if all(1) && ranks.len() >= MIN_STRAIGHT {
            return Classification::new(ComboKind::Straight, high);
        }
        if all(2) && total >= MIN_PAIR_RUN_CARDS {
            return Classification::new(ComboKind::ConsecutivePairs, high);
        }
        if all(3) && ranks.len() >= MIN_AIRPLANE_TRIPLES {
            return Classification::new(ComboKind::Airplane, high);
        }
    }

    let triples: Vec<Rank> = groups
        .iter()
        .filter(|(_, count)| *count == 3)
        .map(|(rank, _)| *rank)
        .collect();
    if triples.len() < MIN_AIRPLANE_TRIPLES || !is_contiguous(&triples) {
        return Classification::UNRECOGNIZED;
    }

    let Some(top) = triples.last().map(|rank| rank.value()) else {
        return Classification::UNRECOGNIZED;
    };
    let anchors = triples.len();
    let wing_cards = total - anchors * 3;
    if wing_cards == anchors {
        return Classification::new(ComboKind::AirplaneWithSingles, top);
    }
    let wings_pair_up = groups
        .iter()
        .filter(|(_, count)| *count != 3)
        .all(|(_, count)| count % 2 == 0);
    if wing_cards == anchors * 2 && wings_pair_up {
        return Classification::new(ComboKind::AirplaneWithPairs, top);
    }

    Classification::UNRECOGNIZED
}

fn is_contiguous(ranks: &[Rank]) -> bool {
    match (ranks.first(), ranks.last()) {
        (Some(low), Some(high)) => (high.value() - low.value()) as usize == ranks.len() - 1,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::classify;
    use crate::model::card::{Card, parse_cards};
    use crate::model::deck::{Deck, DeckConfig};
    use crate::rules::combo::{Classification, ComboKind, ROCKET_RANK};

    fn class_of(text: &str) -> Classification {
        classify(&parse_cards(text).unwrap())
    }

    fn kind_of(text: &str) -> ComboKind {
        class_of(text).kind
    }

    #[test]
    fn four_threes_are_a_bomb() {
        assert_eq!(
            class_of("3S 3H 3C 3D"),
            Classification::new(ComboKind::Bomb, 3)
        );
    }

    #[test]
    fn rocket_outranks_everything() {
        let class = class_of("BJ RJ");
        assert_eq!(class.kind, ComboKind::Rocket);
        assert_eq!(class.rank, ROCKET_RANK);
    }

    #[test]
    fn same_rank_groups() {
        assert_eq!(class_of("KS"), Classification::new(ComboKind::Single, 13));
        assert_eq!(class_of("2S 2H"), Classification::new(ComboKind::Pair, 15));
        assert_eq!(class_of("9S 9H 9D"), Classification::new(ComboKind::Triple, 9));
        assert_eq!(kind_of("BJ"), ComboKind::Single);
    }

    #[test]
    fn triple_and_quad_attachments() {
        assert_eq!(
            class_of("8S 8H 8D 3C"),
            Classification::new(ComboKind::TripleWithOne, 8)
        );
        assert_eq!(
            class_of("3S 3H 8S 8H 8D"),
            Classification::new(ComboKind::TripleWithPair, 8)
        );
        assert_eq!(
            class_of("5S 5H 5C 5D 9S 9H"),
            Classification::new(ComboKind::QuadWithTwo, 5)
        );
        assert_eq!(
            class_of("5S 5H 5C 5D 9S RJ"),
            Classification::new(ComboKind::QuadWithTwo, 5)
        );
        assert_eq!(kind_of("5S 5H 5C 5D 9S 9H 9D"), ComboKind::Unrecognized);
    }

    #[test]
    fn attachments_may_use_twos_and_jokers() {
        assert_eq!(kind_of("2S 2H 2D BJ"), ComboKind::TripleWithOne);
        assert_eq!(kind_of("AS AH AD 2S 2H"), ComboKind::TripleWithPair);
    }

    #[test]
    fn straights() {
        assert_eq!(
            class_of("3S 4S 5H 6D 7C"),
            Classification::new(ComboKind::Straight, 7)
        );
        assert_eq!(kind_of("10S JS QH KD AC"), ComboKind::Straight);
        assert_eq!(kind_of("3S 4S 5H 6D"), ComboKind::Unrecognized);
        assert_eq!(kind_of("3S 4S 5H 6D 8C"), ComboKind::Unrecognized);
        assert_eq!(kind_of("JS QH KD AC 2C"), ComboKind::Unrecognized);
    }

    #[test]
    fn consecutive_pairs_need_three_pairs() {
        assert_eq!(
            class_of("3S 3H 4S 4H 5S 5H"),
            Classification::new(ComboKind::ConsecutivePairs, 5)
        );
        assert_eq!(kind_of("3S 3H 4S 4H"), ComboKind::Unrecognized);
        assert_eq!(kind_of("3S 3H 4S 4H 6S 6H"), ComboKind::Unrecognized);
    }

    #[test]
    fn airplanes() {
        assert_eq!(
            class_of("3S 3H 3D 4S 4H 4D"),
            Classification::new(ComboKind::Airplane, 4)
        );
        assert_eq!(
            class_of("3S 3H 3D 4S 4H 4D 9C KS"),
            Classification::new(ComboKind::AirplaneWithSingles, 4)
        );
        assert_eq!(
            class_of("3S 3H 3D 4S 4H 4D 9C 9S KS KH"),
            Classification::new(ComboKind::AirplaneWithPairs, 4)
        );
        assert_eq!(kind_of("3S 3H 3D 4S 4H 4D 5S 5H"), ComboKind::AirplaneWithSingles);
        assert_eq!(kind_of("3S 3H 3D 5S 5H 5D 9C KS"), ComboKind::Unrecognized);
        assert_eq!(kind_of("3S 3H 3D 4S 4H 4D 9C"), ComboKind::Unrecognized);
        assert_eq!(kind_of("3S 3H 3D 4S 4H 4D 9C 2S"), ComboKind::Unrecognized);
        assert_eq!(kind_of("KS KH KD AS AH AD 2S 2H 2D"), ComboKind::Unrecognized);
    }

    #[test]
    fn empty_and_oversized_groups_are_unrecognized() {
        assert_eq!(classify(&[]), Classification::UNRECOGNIZED);
        assert_eq!(kind_of("7S 7S 7H 7H 7D"), ComboKind::Unrecognized);
        assert_eq!(kind_of("BJ BJ"), ComboKind::Pair);
        assert_eq!(kind_of("BJ RJ RJ"), ComboKind::Unrecognized);
    }

    #[test]
    fn classify_is_total_over_deck_windows() {
        let deck = Deck::shuffled_with_seed(DeckConfig::single(), 11);
        let cards: Vec<Card> = deck.cards().to_vec();
        for width in 1..=12 {
            for window in cards.windows(width) {
                let class = classify(window);
                if !class.is_recognized() {
                    assert_eq!(class.rank, 0);
                }
                assert_eq!(class, classify(window));
            }
        }
    }
}
