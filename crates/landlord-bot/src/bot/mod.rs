mod decompose;
#[cfg(test)]
pub(crate) mod fixtures;
mod follow;
mod lead;
mod params;
mod tracker;

pub use decompose::{Decomposition, decompose};
pub use follow::{BreakCandidate, FollowPlanner};
pub use lead::LeadPlanner;
pub use params::BotParams;
pub use tracker::UnseenTracker;

use landlord_core::game::view::PlayerView;
use landlord_core::model::card::Card;
use landlord_core::model::player::PlayerId;
use landlord_core::rules::Play;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotDifficulty {
    /// Leads the lowest combination and follows only without breaking
    /// anything up.
    Easy,
    #[default]
    Normal,
}

impl BotDifficulty {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" | "simple" => Some(BotDifficulty::Easy),
            "normal" | "default" | "heuristic" => Some(BotDifficulty::Normal),
            _ => None,
        }
    }

    pub fn from_env() -> Self {
        static CACHED: OnceLock<BotDifficulty> = OnceLock::new();
        *CACHED.get_or_init(|| Self::from_reader(|key| std::env::var(key).ok()))
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        read("LANDLORD_BOT_DIFFICULTY")
            .and_then(|raw| Self::parse(&raw))
            .unwrap_or_default()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BotDifficulty::Easy => "easy",
            BotDifficulty::Normal => "normal",
        }
    }
}

/// How far the game has progressed, judged by the share of dealt cards still
/// held by anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Opening,
    Midgame,
    Endgame,
}

impl GamePhase {
    pub fn from_fraction(remaining: f32, params: &BotParams) -> Self {
        if remaining < params.endgame_fraction {
            GamePhase::Endgame
        } else if remaining < params.midgame_fraction {
            GamePhase::Midgame
        } else {
            GamePhase::Opening
        }
    }

    pub fn from_counts(remaining: usize, dealt: usize, params: &BotParams) -> Self {
        if dealt == 0 {
            return GamePhase::Opening;
        }
        Self::from_fraction(remaining as f32 / dealt as f32, params)
    }

    pub const fn is_endgame(self) -> bool {
        matches!(self, GamePhase::Endgame)
    }
}

/// Why a planner picked its play. Logged with every decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rationale {
    /// The hand is a single combination; playing it wins.
    LastCombination,
    /// Endgame with the shortest hand: shed a long shape.
    Rush,
    Straight,
    Shed,
    /// Only bombs and rockets remain.
    EscalationOnly,
    /// Easy bots lead their lowest combination.
    Lowest,
    ZeroCost,
    Break { cost: f32 },
    Bomb,
    Rocket,
}

impl Rationale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Rationale::LastCombination => "last_combination",
            Rationale::Rush => "rush",
            Rationale::Straight => "straight",
            Rationale::Shed => "shed",
            Rationale::EscalationOnly => "escalation_only",
            Rationale::Lowest => "lowest",
            Rationale::ZeroCost => "zero_cost",
            Rationale::Break { .. } => "break",
            Rationale::Bomb => "bomb",
            Rationale::Rocket => "rocket",
        }
    }
}

/// A planner's pick.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub play: Play,
    pub rationale: Rationale,
}

impl Choice {
    pub fn new(play: Play, rationale: Rationale) -> Self {
        Self { play, rationale }
    }
}

/// Everything a planner reads for one decision.
#[derive(Debug, Clone, Copy)]
pub struct BotContext<'a> {
    pub view: &'a PlayerView,
    pub tracker: &'a UnseenTracker,
    pub params: &'a BotParams,
    pub difficulty: BotDifficulty,
    phase: GamePhase,
}

impl<'a> BotContext<'a> {
    pub fn new(
        view: &'a PlayerView,
        tracker: &'a UnseenTracker,
        params: &'a BotParams,
        difficulty: BotDifficulty,
    ) -> Self {
        let phase = GamePhase::from_counts(view.cards_remaining(), view.cards_dealt, params);
        Self {
            view,
            tracker,
            params,
            difficulty,
            phase,
        }
    }

    pub fn seat(&self) -> PlayerId {
        self.view.viewer
    }

    pub fn hand(&self) -> &'a [Card] {
        &self.view.hand
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn cards_held(&self) -> usize {
        self.view.hand.len()
    }

    /// True when no other seat holds fewer cards than we do.
    pub fn holds_fewest(&self) -> bool {
        self.view
            .fewest_opponent_cards()
            .is_none_or(|fewest| self.cards_held() <= fewest)
    }

    pub fn cards_of(&self, player: PlayerId) -> usize {
        self.view.card_count(player).unwrap_or(0)
    }
}
