//! `RulesEngine` adapter: the grid is the state, a pair of positions is the
//! action.

use serde::{Deserialize, Serialize};

use super::grid::{Pos, TileGrid};
use super::solver::{has_any_removable_pair, removable_pairs};
use crate::core::RuleResult;
use crate::rules::RulesEngine;

/// Remove the tiles at `a` and `b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemovePair {
    pub a: Pos,
    pub b: Pos,
}

/// How a Linkup board ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkupOutcome {
    /// Every tile removed.
    Cleared,
    /// Tiles remain but no pair links; the board needs a reshuffle.
    Stuck,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Linkup;

impl RulesEngine for Linkup {
    type State = TileGrid;
    type Action = RemovePair;
    type Outcome = LinkupOutcome;

    fn legal_actions(&self, state: &TileGrid) -> Vec<RemovePair> {
        removable_pairs(state)
            .map(|(a, b)| RemovePair { a, b })
            .collect()
    }

    fn apply_action(&self, state: &TileGrid, action: &RemovePair) -> RuleResult<TileGrid> {
        state.remove_pair(action.a, action.b)
    }

    fn outcome(&self, state: &TileGrid) -> Option<LinkupOutcome> {
        if state.is_cleared() {
            Some(LinkupOutcome::Cleared)
        } else if !has_any_removable_pair(state) {
            Some(LinkupOutcome::Stuck)
        } else {
            None
        }
    }
}
