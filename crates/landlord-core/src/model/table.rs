use crate::model::player::PlayerId;
use crate::rules::Play;
use serde::Serialize;

/// The play every follower has to beat, and who made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub owner: PlayerId,
    pub play: Play,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum TablePhase {
    /// No play to beat: the turn holder opens with any combination.
    Leading,
    /// Another player's play stands; the turn holder beats it or passes.
    Following,
    Finished { winner: PlayerId },
}

/// Turn order plus the standing play for one table.
#[derive(Debug, Clone, Serialize)]
pub struct TableState {
    order: Vec<PlayerId>,
    turn: usize,
    standing: Option<Standing>,
    winner: Option<PlayerId>,
}

impl TableState {
    /// `order` is never empty; `RoundState` checks the roster first.
    pub(crate) fn new(order: Vec<PlayerId>, first: usize) -> Self {
        let turn = if order.is_empty() { 0 } else { first % order.len() };
        Self {
            order,
            turn,
            standing: None,
            winner: None,
        }
    }

    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    pub fn turn_holder(&self) -> PlayerId {
        self.order[self.turn]
    }

    pub fn turn_index(&self) -> usize {
        self.turn
    }

    pub fn standing(&self) -> Option<&Standing> {
        self.standing.as_ref()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn phase(&self) -> TablePhase {
        if let Some(winner) = self.winner {
            return TablePhase::Finished { winner };
        }
        match &self.standing {
            Some(standing) if standing.owner != self.turn_holder() => TablePhase::Following,
            _ => TablePhase::Leading,
        }
    }

    pub fn is_leading(&self) -> bool {
        matches!(self.phase(), TablePhase::Leading)
    }

    pub fn seat_of(&self, player: PlayerId) -> Option<usize> {
        self.order.iter().position(|&id| id == player)
    }

    pub(crate) fn accept(&mut self, owner: PlayerId, play: Play) {
        self.standing = Some(Standing { owner, play });
    }

    pub(crate) fn finish(&mut self, winner: PlayerId) {
        self.winner = Some(winner);
    }

    /// Moves the turn to the next seat that still holds cards. `active` is
    /// indexed by seat.
    pub(crate) fn advance(&mut self, active: &[bool]) {
        let seats = self.order.len();
        for step in 1..=seats {
            let candidate = (self.turn + step) % seats;
            if active.get(candidate).copied().unwrap_or(false) {
                self.turn = candidate;
                return;
            }
        }
    }

    /// Drops the standing play once the turn is back with its owner.
    pub(crate) fn settle(&mut self) -> bool {
        let returned = self
            .standing
            .as_ref()
            .is_some_and(|standing| standing.owner == self.turn_holder());
        if returned {
            self.standing = None;
        }
        returned
    }
}
