pub mod bot;
pub mod policy;

pub use bot::{
    BotContext, BotDifficulty, BotParams, BreakCandidate, Choice, Decomposition, FollowPlanner,
    GamePhase, LeadPlanner, Rationale, UnseenTracker, decompose,
};
pub use policy::{Decision, HeuristicPolicy, Policy, PolicyContext};
