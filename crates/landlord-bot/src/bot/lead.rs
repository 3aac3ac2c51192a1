use super::{BotContext, BotDifficulty, Choice, Decomposition, Rationale};
use landlord_core::rules::Play;

/// Picks an opening combination when nothing stands on the table.
pub struct LeadPlanner;

impl LeadPlanner {
    pub fn choose(split: &Decomposition, ctx: &BotContext<'_>) -> Option<Choice> {
        if split.len() == 1 {
            return first(split.combos(), Rationale::LastCombination);
        }

        if ctx.difficulty == BotDifficulty::Easy {
            return Self::lowest(split);
        }

        if ctx.phase().is_endgame() && ctx.holds_fewest() {
            if let Some(choice) = first(
                split.airplanes.iter().chain(&split.straights),
                Rationale::Rush,
            ) {
                return Some(choice);
            }
        }

        if let Some(choice) = first(split.straights.iter(), Rationale::Straight) {
            return Some(choice);
        }

        if let Some(single) = Self::safest_single(split, ctx) {
            return Some(Choice::new(single.clone(), Rationale::Shed));
        }

        let shed = split
            .pairs
            .iter()
            .chain(&split.triples)
            .chain(&split.consecutive_pairs)
            .chain(&split.airplanes);
        if let Some(choice) = first(shed, Rationale::Shed) {
            return Some(choice);
        }

        first(
            split.bombs.iter().chain(&split.rockets),
            Rationale::EscalationOnly,
        )
    }

    /// Single minimising `rank - weight * high`, where `high` is 1 for a card
    /// above the ace whose rank still has unseen copies.
    fn safest_single<'s>(split: &'s Decomposition, ctx: &BotContext<'_>) -> Option<&'s Play> {
        let weight = ctx.params.high_card_weight;
        split.singles.iter().min_by_key(|play| {
            let high = play
                .cards()
                .iter()
                .filter(|card| card.rank.is_high() && ctx.tracker.is_unseen(card.rank))
                .count() as i32;
            i32::from(play.rank()) - weight * high
        })
    }

    /// Lowest non-escalating combination, bombs and rockets only as a last
    /// resort.
    fn lowest(split: &Decomposition) -> Option<Choice> {
        split
            .combos()
            .filter(|play| !play.kind().is_escalation())
            .min_by_key(|play| play.rank())
            .or_else(|| split.combos().next())
            .map(|play| Choice::new(play.clone(), Rationale::Lowest))
    }
}

fn first<'a>(mut plays: impl Iterator<Item = &'a Play>, rationale: Rationale) -> Option<Choice> {
    plays.next().map(|play| Choice::new(play.clone(), rationale))
}
