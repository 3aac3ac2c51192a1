use crate::rules::combo::{Classification, ComboKind};

/// Precedence between a candidate and the standing play.
///
/// A rocket beats everything. A bomb beats any play that is neither a bomb
/// nor a rocket. Otherwise the candidate must share the standing play's kind
/// and card count and carry a strictly greater rank.
pub fn beats(
    candidate: Classification,
    candidate_len: usize,
    standing: Classification,
    standing_len: usize,
) -> bool {
    if !candidate.is_recognized() {
        return false;
    }
    if candidate.kind == ComboKind::Rocket {
        return true;
    }
    if standing.kind == ComboKind::Rocket {
        return false;
    }
    if candidate.kind == ComboKind::Bomb && standing.kind != ComboKind::Bomb {
        return true;
    }
    candidate.kind == standing.kind
        && candidate_len == standing_len
        && candidate.rank > standing.rank
}

#[cfg(test)]
mod tests {
    use super::beats;
    use crate::model::card::parse_cards;
    use crate::rules::combo::Play;

    fn play(text: &str) -> Play {
        Play::new(parse_cards(text).unwrap()).unwrap()
    }

    #[test]
    fn higher_pair_beats_lower_pair() {
        let standing = play("5S 5H");
        assert!(play("6S 6H").beats(&standing));
        assert!(!play("4S 4H").beats(&standing));
        assert!(!play("5C 5D").beats(&standing));
    }

    #[test]
    fn rocket_beats_every_kind() {
        let rocket = play("BJ RJ");
        for standing in ["3S", "2S 2H", "3S 3H 3C 3D", "3S 4S 5S 6S 7S", "AS AH AD 3C"] {
            assert!(rocket.beats(&play(standing)), "{standing}");
        }
    }

    #[test]
    fn nothing_beats_a_rocket() {
        let rocket = play("BJ RJ");
        for candidate in ["2S", "2S 2H 2C 2D", "AS AH AD KS KH KD", "10S JS QS KS AS"] {
            assert!(!play(candidate).beats(&rocket), "{candidate}");
        }
    }

    #[test]
    fn bombs_beat_other_kinds_regardless_of_rank() {
        let bomb = play("3S 3H 3C 3D");
        assert!(bomb.beats(&play("2S")));
        assert!(bomb.beats(&play("10S JS QS KS AS")));
        assert!(bomb.beats(&play("AS AH AD AC KS KH")));
        assert!(!bomb.beats(&play("4S 4H 4C 4D")));
        assert!(play("5S 5H 5C 5D").beats(&bomb));
    }

    #[test]
    fn differing_kind_or_length_never_compare() {
        assert!(!play("9S 9H").beats(&play("3S")));
        assert!(!play("4S 5S 6S 7S 8S 9S").beats(&play("3S 4S 5S 6S 7S")));
        assert!(!play("AS AH AD 3C").beats(&play("3S 3H 3D 4S 4H")));
    }

    #[test]
    fn unrecognized_candidate_never_beats() {
        let standing = play("3S").classification();
        assert!(!beats(
            crate::rules::combo::Classification::UNRECOGNIZED,
            2,
            standing,
            1
        ));
    }
}
