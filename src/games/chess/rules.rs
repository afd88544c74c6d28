//! `RulesEngine` adapter over [`ChessGame`].

use serde::{Deserialize, Serialize};

use super::game::{ChessGame, DrawRules, GameStatus};
use super::movegen::all_legal_moves;
use super::types::{Color, PieceKind, Square};
use crate::core::{RuleResult, Seat};
use crate::rules::{GameResult, RulesEngine};

/// A chess action: a move between squares or a promotion choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChessAction {
    Move { from: Square, to: Square },
    Promote(PieceKind),
}

impl Color {
    /// White sits in seat 0, Black in seat 1.
    #[must_use]
    pub const fn seat(self) -> Seat {
        match self {
            Color::White => Seat(0),
            Color::Black => Seat(1),
        }
    }
}

/// Chess rules with a fixed set of draw rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chess {
    pub draw_rules: DrawRules,
}

impl Chess {
    #[must_use]
    pub fn new(draw_rules: DrawRules) -> Self {
        Self { draw_rules }
    }

    /// A fresh game under these rules.
    #[must_use]
    pub fn initial_state(&self) -> ChessGame {
        ChessGame::with_rules(self.draw_rules)
    }
}

impl RulesEngine for Chess {
    type State = ChessGame;
    type Action = ChessAction;
    type Outcome = GameResult;

    fn legal_actions(&self, state: &ChessGame) -> Vec<ChessAction> {
        match state.status() {
            GameStatus::AwaitingPromotion => PieceKind::PROMOTIONS
                .iter()
                .map(|&kind| ChessAction::Promote(kind))
                .collect(),
            status if status.is_terminal() => Vec::new(),
            _ => all_legal_moves(state.board())
                .into_iter()
                .map(|mv| ChessAction::Move {
                    from: mv.from,
                    to: mv.to,
                })
                .collect(),
        }
    }

    fn apply_action(&self, state: &ChessGame, action: &ChessAction) -> RuleResult<ChessGame> {
        let mut next = state.clone();
        match *action {
            ChessAction::Move { from, to } => next.make_move(from, to)?,
            ChessAction::Promote(kind) => next.promote(kind)?,
        };
        Ok(next)
    }

    fn outcome(&self, state: &ChessGame) -> Option<GameResult> {
        match state.status() {
            GameStatus::Checkmate { winner } => Some(GameResult::Winner(winner.seat())),
            status if status.is_draw() => Some(GameResult::Draw),
            _ => None,
        }
    }
}
