use crate::game::match_state::MatchState;
use crate::game::view::PlayerView;
use crate::model::card::Card;
use crate::model::player::PlayerId;
use crate::model::round::{PassOutcome, PlayError, PlayOutcome};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to one table. Every call holds the lock for its whole
/// duration, so a table sees one mutation at a time.
#[derive(Debug, Clone)]
pub struct SharedMatch {
    inner: Arc<Mutex<MatchState>>,
}

impl SharedMatch {
    pub fn new(state: MatchState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn apply_play(&self, actor: PlayerId, cards: &[Card]) -> Result<PlayOutcome, PlayError> {
        self.inner.lock().apply_play(actor, cards)
    }

    pub fn pass(&self, actor: PlayerId) -> Result<PassOutcome, PlayError> {
        self.inner.lock().pass(actor)
    }

    pub fn project_state(&self, viewer: PlayerId) -> Option<PlayerView> {
        self.inner.lock().project_state(viewer)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.inner.lock().winner()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&MatchState) -> R) -> R {
        f(&self.inner.lock())
    }
}
