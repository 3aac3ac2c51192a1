mod heuristic;

pub use heuristic::HeuristicPolicy;

use crate::bot::UnseenTracker;
use landlord_core::game::view::PlayerView;
use landlord_core::model::player::PlayerId;
use landlord_core::rules::Play;

/// Context provided to policies for decision-making
pub struct PolicyContext<'a> {
    pub view: &'a PlayerView,
    pub tracker: &'a UnseenTracker,
}

impl<'a> PolicyContext<'a> {
    pub fn new(view: &'a PlayerView, tracker: &'a UnseenTracker) -> Self {
        Self { view, tracker }
    }
}

/// What a seat does on its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Play(Play),
    Pass,
}

impl Decision {
    pub fn play(&self) -> Option<&Play> {
        match self {
            Decision::Play(play) => Some(play),
            Decision::Pass => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Decision::Pass)
    }
}

/// Unified interface for automated seats
pub trait Policy: Send {
    /// Choose a play or a pass for the viewer of `ctx`. Must only return
    /// moves the table would accept.
    fn decide(&mut self, ctx: &PolicyContext) -> Decision;

    /// Optional: observe the end of a game
    fn observe_winner(&mut self, _winner: PlayerId) {}
}
