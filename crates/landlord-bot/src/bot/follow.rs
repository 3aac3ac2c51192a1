use super::{BotContext, BotDifficulty, BotParams, Choice, Decomposition, Rationale, decompose};
use landlord_core::model::card::Card;
use landlord_core::model::counts::RankCounts;
use landlord_core::model::rank::Rank;
use landlord_core::model::table::Standing;
use landlord_core::rules::{ComboKind, Play};

/// A same-rank group pulled out of a larger combination, and what it costs.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakCandidate {
    pub play: Play,
    pub cost: f32,
    /// Position of the broken combination in [`Decomposition::combos`].
    pub source: usize,
}

/// Answers a standing play: zero-cost match, then a break, then a bomb, else
/// pass (`None`).
pub struct FollowPlanner;

impl FollowPlanner {
    pub fn choose(
        standing: &Standing,
        split: &Decomposition,
        ctx: &BotContext<'_>,
    ) -> Option<Choice> {
        let target = &standing.play;

        if let Some(play) = Self::zero_cost(target, split) {
            return Some(Choice::new(play.clone(), Rationale::ZeroCost));
        }

        if ctx.difficulty == BotDifficulty::Easy {
            return None;
        }

        if let Some(candidate) = Self::cheapest_break(target, split, ctx.params) {
            if candidate.cost <= ctx.params.break_cost_limit || ctx.phase().is_endgame() {
                return Some(Choice::new(
                    candidate.play,
                    Rationale::Break {
                        cost: candidate.cost,
                    },
                ));
            }
        }

        if Self::bomb_triggered(standing, ctx) {
            return Self::escalate(target, split);
        }

        None
    }

    /// Lowest combination already in the hand with the target's exact shape.
    pub fn zero_cost<'s>(target: &Play, split: &'s Decomposition) -> Option<&'s Play> {
        split
            .combos()
            .filter(|play| play.kind() == target.kind() && play.beats(target))
            .min_by_key(|play| play.rank())
    }

    /// Every way of pulling `n` same-rank cards above the target out of a
    /// bigger combination, where `n` is the size of a single, pair or triple
    /// target. Bombs are never broken; a rocket can give up one joker.
    /// Other target shapes have no break candidates.
    pub fn break_candidates(
        target: &Play,
        split: &Decomposition,
        params: &BotParams,
    ) -> Vec<BreakCandidate> {
        let need = match target.kind() {
            ComboKind::Single => 1,
            ComboKind::Pair => 2,
            ComboKind::Triple => 3,
            _ => return Vec::new(),
        };

        let mut candidates = Vec::new();
        for (source, combo) in split.combos().enumerate() {
            if combo.kind() == target.kind() || combo.kind() == ComboKind::Bomb {
                continue;
            }
            let counts = RankCounts::from_cards(combo.cards().iter().copied());
            for (rank, count) in counts.present() {
                if usize::from(count) < need || rank.value() <= target.rank() {
                    continue;
                }
                let (pulled, rest) = pull(combo.cards(), rank, need);
                let Ok(play) = Play::new(pulled) else {
                    continue;
                };
                if !play.beats(target) {
                    continue;
                }
                let cost = break_cost(combo.len(), &decompose(&rest), params);
                candidates.push(BreakCandidate { play, cost, source });
            }
        }
        candidates
    }

    /// Cheapest break; ties go to the lower rank, then the earlier combination.
    pub fn cheapest_break(
        target: &Play,
        split: &Decomposition,
        params: &BotParams,
    ) -> Option<BreakCandidate> {
        Self::break_candidates(target, split, params)
            .into_iter()
            .min_by(|a, b| {
                a.cost
                    .total_cmp(&b.cost)
                    .then_with(|| a.play.rank().cmp(&b.play.rank()))
                    .then_with(|| a.source.cmp(&b.source))
            })
    }

    fn bomb_triggered(standing: &Standing, ctx: &BotContext<'_>) -> bool {
        let params = ctx.params;
        let owner_short = ctx.cards_of(standing.owner) <= params.bomb_owner_cards
            && standing.play.rank() > Rank::Ace.value();
        let closing = ctx.phase().is_endgame() && ctx.cards_held() <= params.bomb_self_cards;
        owner_short || closing
    }

    /// Lowest bomb that beats the target, else a rocket.
    fn escalate(target: &Play, split: &Decomposition) -> Option<Choice> {
        if let Some(bomb) = split.bombs.iter().find(|bomb| bomb.beats(target)) {
            return Some(Choice::new(bomb.clone(), Rationale::Bomb));
        }
        split
            .rockets
            .iter()
            .find(|rocket| rocket.beats(target))
            .map(|rocket| Choice::new(rocket.clone(), Rationale::Rocket))
    }
}

/// Size of the broken combination plus weighted leftovers of what remains.
fn break_cost(broken: usize, remainder: &Decomposition, params: &BotParams) -> f32 {
    broken as f32
        + params.pair_leftover_cost * remainder.leftover_pairs() as f32
        + params.single_leftover_cost * remainder.leftover_singles() as f32
}

fn pull(cards: &[Card], rank: Rank, need: usize) -> (Vec<Card>, Vec<Card>) {
    let mut pulled = Vec::with_capacity(need);
    let mut rest = Vec::with_capacity(cards.len().saturating_sub(need));
    for card in cards {
        if card.rank == rank && pulled.len() < need {
            pulled.push(*card);
        } else {
            rest.push(*card);
        }
    }
    (pulled, rest)
}

#[cfg(test)]
mod tests {
    use super::FollowPlanner;
    use crate::bot::fixtures::facing;
    use crate::bot::{
        BotContext, BotDifficulty, BotParams, Choice, Rationale, UnseenTracker, decompose,
    };
    use landlord_core::game::view::PlayerView;
    use landlord_core::rules::ComboKind;

    fn follow(view: &PlayerView, difficulty: BotDifficulty) -> Option<Choice> {
        let tracker = UnseenTracker::from_view(view);
        let params = BotParams::default();
        let ctx = BotContext::new(view, &tracker, &params, difficulty);
        let standing = view.standing.as_ref().unwrap();
        FollowPlanner::choose(standing, &decompose(&view.hand), &ctx)
    }

    fn summary(choice: Option<Choice>) -> Option<(ComboKind, u8, Rationale)> {
        choice.map(|c| (c.play.kind(), c.play.rank(), c.rationale))
    }

    #[test]
    fn smallest_matching_combination_costs_nothing() {
        let v = facing("3S 7H JD 9D 9C", "5S", [17, 17], 54);
        assert_eq!(
            summary(follow(&v, BotDifficulty::Normal)),
            Some((ComboKind::Single, 7, Rationale::ZeroCost))
        );
    }

    #[test]
    fn breaks_a_pair_to_beat_a_single() {
        let v = facing("3S 4H AS AH 8C 8D", "KS", [17, 17], 54);
        assert_eq!(
            summary(follow(&v, BotDifficulty::Normal)),
            Some((ComboKind::Single, 14, Rationale::Break { cost: 3.0 }))
        );
    }

    #[test]
    fn cheaper_break_wins_over_a_straight() {
        let v = facing("3S 4H 5C 6D 7S KH KD", "6H", [17, 17], 54);
        let split = decompose(&v.hand);
        let params = BotParams::default();
        let candidates = FollowPlanner::break_candidates(&split.straights[0], &split, &params);
        assert!(candidates.is_empty());

        let target = v.standing.as_ref().unwrap().play.clone();
        let all = FollowPlanner::break_candidates(&target, &split, &params);
        assert_eq!(all.len(), 2);
        let best = FollowPlanner::cheapest_break(&target, &split, &params).unwrap();
        assert_eq!(best.play.rank(), 13);
        assert_eq!(best.cost, 3.0);
    }

    #[test]
    fn expensive_break_waits_for_endgame() {
        let hand = "AS AH AD 3C 4D 9H JS";
        let v = facing(hand, "KS", [17, 17], 54);
        assert!(follow(&v, BotDifficulty::Normal).is_none());

        let v = facing(hand, "KS", [5, 5], 60);
        assert_eq!(
            summary(follow(&v, BotDifficulty::Normal)),
            Some((ComboKind::Single, 14, Rationale::Break { cost: 3.5 }))
        );
    }

    #[test]
    fn pair_target_breaks_a_triple() {
        let hand = "JS JH JD 3C 5D";
        let v = facing(hand, "9S 9H", [17, 17], 54);
        assert!(follow(&v, BotDifficulty::Normal).is_none());

        let v = facing(hand, "9S 9H", [4, 4], 60);
        assert_eq!(
            summary(follow(&v, BotDifficulty::Normal)),
            Some((ComboKind::Pair, 11, Rationale::Break { cost: 4.0 }))
        );
    }

    #[test]
    fn bombs_a_high_play_from_a_short_hand() {
        let v = facing("3S 8S 8H 8C 8D", "2S", [17, 2], 54);
        assert_eq!(
            summary(follow(&v, BotDifficulty::Normal)),
            Some((ComboKind::Bomb, 8, Rationale::Bomb))
        );

        let v = facing("3S 8S 8H 8C 8D", "2S", [17, 9], 54);
        assert!(follow(&v, BotDifficulty::Normal).is_none());
    }

    #[test]
    fn rocket_closes_out_the_endgame() {
        let v = facing("4S BJ RJ", "9S 9H 9C 9D", [6, 6], 60);
        assert_eq!(
            summary(follow(&v, BotDifficulty::Normal)),
            Some((ComboKind::Rocket, 99, Rationale::Rocket))
        );
    }

    #[test]
    fn nothing_answers_a_rocket() {
        let v = facing("2S 2H 2C 2D 3S", "BJ RJ", [1, 1], 60);
        assert!(follow(&v, BotDifficulty::Normal).is_none());
    }

    #[test]
    fn single_target_splits_a_rocket() {
        let v = facing("3S BJ RJ", "KS", [17, 17], 54);
        assert_eq!(
            summary(follow(&v, BotDifficulty::Normal)),
            Some((ComboKind::Single, 16, Rationale::Break { cost: 3.0 }))
        );
    }

    #[test]
    fn bombs_stay_whole_when_breaking() {
        let v = facing("3S AS AH AC AD", "KS", [17, 17], 54);
        let split = decompose(&v.hand);
        let target = v.standing.as_ref().unwrap().play.clone();
        assert!(FollowPlanner::break_candidates(&target, &split, &BotParams::default()).is_empty());
    }

    #[test]
    fn easy_never_breaks() {
        let v = facing("3S 4H AS AH 8C 8D", "KS", [17, 17], 54);
        assert!(follow(&v, BotDifficulty::Easy).is_none());
    }
}
