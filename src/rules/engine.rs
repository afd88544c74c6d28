//! Rules engine trait for game implementations.
//!
//! Every engine in this crate is a pure state-transition function:
//! the caller owns the current state and feeds it back in with an action,
//! getting a brand new state (or a rejection) in return.

use serde::{Deserialize, Serialize};

use crate::core::{RuleResult, Seat};

/// Result of a completed table game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Seat),
    /// Draw (no winner).
    Draw,
    /// Multiple winners (team games, shared victory).
    Winners(Vec<Seat>),
}

impl GameResult {
    /// Check if a seat won.
    #[must_use]
    pub fn is_winner(&self, seat: Seat) -> bool {
        match self {
            GameResult::Winner(s) => *s == seat,
            GameResult::Winners(ss) => ss.contains(&seat),
            GameResult::Draw => false,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply_action` never mutates its input; rejected actions leave the
///   caller's state untouched by construction
/// - `legal_actions` returns empty once the game is over
/// - `outcome` returns `None` while the game continues
pub trait RulesEngine {
    /// Full game state, owned by the caller.
    type State: Clone;

    /// A single player action.
    type Action: Clone;

    /// How a finished game ended.
    type Outcome;

    /// Enumerate the legal actions from `state`.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Apply an action, producing the next state.
    fn apply_action(&self, state: &Self::State, action: &Self::Action) -> RuleResult<Self::State>;

    /// Check if the game is over.
    fn outcome(&self, state: &Self::State) -> Option<Self::Outcome>;

    // === Convenience Methods ===

    /// True if `action` would be accepted.
    fn is_legal(&self, state: &Self::State, action: &Self::Action) -> bool {
        self.apply_action(state, action).is_ok()
    }

    /// Apply a sequence of actions, stopping at the first rejection.
    fn replay<'a, I>(&self, state: &Self::State, actions: I) -> RuleResult<Self::State>
    where
        I: IntoIterator<Item = &'a Self::Action>,
        Self::Action: 'a,
    {
        actions
            .into_iter()
            .try_fold(state.clone(), |current, action| self.apply_action(&current, action))
    }
}
