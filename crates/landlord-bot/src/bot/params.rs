/// Tunable weights and thresholds for the heuristic planners.
///
/// None of these are rules of the game; the defaults reproduce the stock
/// bot behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotParams {
    /// Weight applied to a lead single whose rank is above the ace and still
    /// has unseen copies (default: 2)
    pub high_card_weight: i32,

    /// Highest break cost accepted outside the endgame (default: 3.0)
    pub break_cost_limit: f32,

    /// Cost per pair left over after re-decomposing a broken combination
    /// (default: 0.5)
    pub pair_leftover_cost: f32,

    /// Cost per single left over after re-decomposing a broken combination
    /// (default: 1.0)
    pub single_leftover_cost: f32,

    /// Share of dealt cards still in hands below which the game is in its
    /// endgame (default: 0.30)
    pub endgame_fraction: f32,

    /// Share of dealt cards still in hands below which the game is in its
    /// midgame (default: 0.70)
    pub midgame_fraction: f32,

    /// Bomb when the standing play's owner holds at most this many cards and
    /// the play is ranked above the ace (default: 3)
    pub bomb_owner_cards: usize,

    /// Bomb in the endgame when holding at most this many cards (default: 5)
    pub bomb_self_cards: usize,
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            high_card_weight: 2,
            break_cost_limit: 3.0,
            pair_leftover_cost: 0.5,
            single_leftover_cost: 1.0,
            endgame_fraction: 0.30,
            midgame_fraction: 0.70,
            bomb_owner_cards: 3,
            bomb_self_cards: 5,
        }
    }
}
