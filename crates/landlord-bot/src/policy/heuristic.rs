use super::{Decision, Policy, PolicyContext};
use crate::bot::{
    BotContext, BotDifficulty, BotParams, Choice, Decomposition, FollowPlanner, LeadPlanner,
    Rationale, decompose,
};
use landlord_core::game::view::PlayerView;
use landlord_core::model::hand::Hand;
use landlord_core::rules::{Play, classify};
use tracing::{Level, event};

/// Adapter that wraps LeadPlanner/FollowPlanner to implement the Policy trait
pub struct HeuristicPolicy {
    difficulty: BotDifficulty,
    params: BotParams,
}

impl HeuristicPolicy {
    pub fn new(difficulty: BotDifficulty) -> Self {
        Self::with_params(difficulty, BotParams::default())
    }

    pub fn with_params(difficulty: BotDifficulty, params: BotParams) -> Self {
        Self { difficulty, params }
    }

    pub fn easy() -> Self {
        Self::new(BotDifficulty::Easy)
    }

    pub fn normal() -> Self {
        Self::new(BotDifficulty::Normal)
    }

    pub fn difficulty(&self) -> BotDifficulty {
        self.difficulty
    }

    pub fn params(&self) -> &BotParams {
        &self.params
    }
}

impl Policy for HeuristicPolicy {
    fn decide(&mut self, ctx: &PolicyContext) -> Decision {
        let view = ctx.view;
        let bot_ctx = BotContext::new(view, ctx.tracker, &self.params, self.difficulty);
        let split = decompose(&view.hand);

        match view.standing_to_beat() {
            None => {
                let choice = LeadPlanner::choose(&split, &bot_ctx);
                let (decision, reason) = match choice.as_ref() {
                    Some(choice) if is_legal(view, &choice.play, None) => {
                        (Decision::Play(choice.play.clone()), "heuristic_lead")
                    }
                    _ => (lowest_single(view), "fallback_lowest_single"),
                };
                log_lead_decision(&bot_ctx, &split, choice.as_ref(), &decision, reason);
                decision
            }
            Some(standing) => {
                let choice = FollowPlanner::choose(standing, &split, &bot_ctx);
                let (decision, reason) = match choice.as_ref() {
                    Some(choice) if is_legal(view, &choice.play, Some(&standing.play)) => {
                        (Decision::Play(choice.play.clone()), "heuristic_follow")
                    }
                    Some(_) => (Decision::Pass, "fallback_pass"),
                    None => (Decision::Pass, "no_answer"),
                };
                log_follow_decision(
                    &bot_ctx,
                    &standing.play,
                    choice.as_ref(),
                    &decision,
                    reason,
                );
                decision
            }
        }
    }
}

/// Re-checks a planner pick against the hand, the classifier and the
/// standing play.
fn is_legal(view: &PlayerView, play: &Play, standing: Option<&Play>) -> bool {
    if play.is_empty() || classify(play.cards()) != play.classification() {
        return false;
    }
    if !Hand::with_cards(view.hand.clone()).contains_all(play.cards()) {
        return false;
    }
    standing.is_none_or(|standing| play.beats(standing))
}

fn lowest_single(view: &PlayerView) -> Decision {
    view.hand
        .iter()
        .min()
        .map(|card| Decision::Play(Play::single(*card)))
        .unwrap_or(Decision::Pass)
}

fn describe(decision: &Decision) -> String {
    match decision {
        Decision::Play(play) => play.to_string(),
        Decision::Pass => "pass".to_string(),
    }
}

fn log_lead_decision(
    ctx: &BotContext<'_>,
    split: &Decomposition,
    choice: Option<&Choice>,
    decision: &Decision,
    reason: &str,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let rationale = choice.map(|c| c.rationale.as_str()).unwrap_or("none");
    event!(
        target: "landlord_bot::lead",
        Level::INFO,
        seat = %ctx.seat(),
        difficulty = ctx.difficulty.as_str(),
        phase = ?ctx.phase(),
        hand_size = ctx.cards_held(),
        combos = split.len(),
        unseen = ctx.tracker.unseen_count(),
        rationale,
        chosen = %describe(decision),
        reason,
    );
}

fn log_follow_decision(
    ctx: &BotContext<'_>,
    target: &Play,
    choice: Option<&Choice>,
    decision: &Decision,
    reason: &str,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let rationale = choice.map(|c| c.rationale.as_str()).unwrap_or("none");
    let break_cost = match choice.map(|c| c.rationale) {
        Some(Rationale::Break { cost }) => cost,
        _ => 0.0,
    };
    event!(
        target: "landlord_bot::follow",
        Level::INFO,
        seat = %ctx.seat(),
        difficulty = ctx.difficulty.as_str(),
        phase = ?ctx.phase(),
        hand_size = ctx.cards_held(),
        target_kind = target.kind().as_str(),
        target_rank = target.rank(),
        rationale,
        break_cost,
        chosen = %describe(decision),
        reason,
    );
}
