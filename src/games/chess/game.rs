//! Full-game state machine with status tracking and undo.
//!
//! ## Status
//!
//! Re-evaluated after every completed move, in this order:
//! 1. no legal moves: checkmate if in check, otherwise stalemate
//! 2. fifty-move rule
//! 3. threefold repetition
//! 4. insufficient material
//!
//! Terminal statuses reject further moves.
//!
//! ## Undo
//!
//! Every move pushes a snapshot of the board, status and repetition table
//! onto an `im::Vector`. The repetition table is an `im::HashMap`, so a
//! snapshot costs O(1) to take and restoring one is exact.

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::board::Board;
use super::execute::{execute_move, insufficient_material, resolve_promotion};
use super::movegen::{has_legal_move, is_in_check, legal_moves, MoveList};
use super::types::{Color, PieceKind, Square};
use crate::core::{InvalidAction, RuleResult};

/// Where a game stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    /// The side to move is in check but has a reply.
    Check,
    /// A pawn reached the last rank and waits for a piece choice.
    AwaitingPromotion,
    Checkmate { winner: Color },
    Stalemate,
    DrawByRepetition,
    DrawByFiftyMove,
    DrawByInsufficientMaterial,
}

impl GameStatus {
    /// True once the game is over.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(
            self,
            GameStatus::Playing | GameStatus::Check | GameStatus::AwaitingPromotion
        )
    }

    /// True for every drawn ending.
    #[must_use]
    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::DrawByRepetition
                | GameStatus::DrawByFiftyMove
                | GameStatus::DrawByInsufficientMaterial
        )
    }
}

/// Which automatic draws are enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRules {
    /// Halfmove clock value that ends the game (`None` disables the rule).
    pub fifty_move_limit: Option<u32>,
    /// Occurrences of one position that end the game (`None` disables).
    pub repetition_limit: Option<u32>,
    /// Whether dead positions end the game.
    pub insufficient_material: bool,
}

impl Default for DrawRules {
    fn default() -> Self {
        Self {
            fifty_move_limit: Some(100),
            repetition_limit: Some(3),
            insufficient_material: true,
        }
    }
}

impl DrawRules {
    /// No automatic draws; only mate and stalemate end the game.
    #[must_use]
    pub fn none() -> Self {
        Self {
            fifty_move_limit: None,
            repetition_limit: None,
            insufficient_material: false,
        }
    }

    #[must_use]
    pub fn with_fifty_move_limit(mut self, halfmoves: Option<u32>) -> Self {
        self.fifty_move_limit = halfmoves;
        self
    }

    #[must_use]
    pub fn with_repetition_limit(mut self, occurrences: Option<u32>) -> Self {
        self.repetition_limit = occurrences;
        self
    }

    #[must_use]
    pub fn with_insufficient_material(mut self, enabled: bool) -> Self {
        self.insufficient_material = enabled;
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Snapshot {
    board: Board,
    status: GameStatus,
    repetitions: ImHashMap<u64, u32>,
}

/// A chess game in progress.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChessGame {
    board: Board,
    status: GameStatus,
    repetitions: ImHashMap<u64, u32>,
    history: Vector<Snapshot>,
    rules: DrawRules,
}

impl ChessGame {
    /// A new game from the standard position with the standard draw rules.
    #[must_use]
    pub fn new() -> Self {
        Self::start(Board::standard(), DrawRules::default())
    }

    /// A new game from the standard position with custom draw rules.
    #[must_use]
    pub fn with_rules(rules: DrawRules) -> Self {
        Self::start(Board::standard(), rules)
    }

    /// A game continuing from an arbitrary position.
    pub fn from_board(board: Board, rules: DrawRules) -> RuleResult<Self> {
        board.validate()?;
        Ok(Self::start(board, rules))
    }

    fn start(board: Board, rules: DrawRules) -> Self {
        let mut repetitions = ImHashMap::new();
        repetitions.insert(board.position_hash(), 1);
        let status = if board.pending_promotion.is_some() {
            GameStatus::AwaitingPromotion
        } else {
            evaluate(&board, &repetitions, &rules)
        };
        Self {
            board,
            status,
            repetitions,
            history: Vector::new(),
            rules,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn draw_rules(&self) -> &DrawRules {
        &self.rules
    }

    /// Number of moves that can be undone.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// How often the current position has occurred.
    #[must_use]
    pub fn repetition_count(&self) -> u32 {
        self.repetitions
            .get(&self.board.position_hash())
            .copied()
            .unwrap_or(0)
    }

    /// Legal moves from `square`; empty once the game is over.
    #[must_use]
    pub fn legal_moves(&self, square: Square) -> MoveList {
        if self.status.is_terminal() {
            return MoveList::new();
        }
        legal_moves(&self.board, square)
    }

    /// Play a move. Returns the new status.
    ///
    /// A pawn move to the last rank returns `AwaitingPromotion`; finish it
    /// with [`promote`](Self::promote).
    pub fn make_move(&mut self, from: Square, to: Square) -> RuleResult<GameStatus> {
        if self.status.is_terminal() {
            return Err(InvalidAction::GameOver.into());
        }
        let next = execute_move(&self.board, from, to)?;

        self.history.push_back(Snapshot {
            board: self.board.clone(),
            status: self.status,
            repetitions: self.repetitions.clone(),
        });
        self.board = next;

        if self.board.pending_promotion.is_some() {
            self.status = GameStatus::AwaitingPromotion;
        } else {
            self.complete_move();
        }
        Ok(self.status)
    }

    /// Choose the piece for a pending promotion. Returns the new status.
    pub fn promote(&mut self, kind: PieceKind) -> RuleResult<GameStatus> {
        self.board = resolve_promotion(&self.board, kind)?;
        self.complete_move();
        Ok(self.status)
    }

    /// Take back the last move, including a pending or resolved promotion.
    pub fn undo(&mut self) -> RuleResult<()> {
        let snapshot = self
            .history
            .pop_back()
            .ok_or(InvalidAction::NothingToUndo)?;
        self.board = snapshot.board;
        self.status = snapshot.status;
        self.repetitions = snapshot.repetitions;
        Ok(())
    }

    fn complete_move(&mut self) {
        let seen = self
            .repetitions
            .entry(self.board.position_hash())
            .or_insert(0);
        *seen = seen.saturating_add(1);
        self.status = evaluate(&self.board, &self.repetitions, &self.rules);
        if self.status.is_terminal() {
            debug!(status = ?self.status, fen = %self.board.to_fen(), "chess game over");
        }
    }
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

fn evaluate(board: &Board, repetitions: &ImHashMap<u64, u32>, rules: &DrawRules) -> GameStatus {
    let side = board.side_to_move;
    let in_check = is_in_check(board, side);

    if !has_legal_move(board) {
        return if in_check {
            GameStatus::Checkmate {
                winner: side.opponent(),
            }
        } else {
            GameStatus::Stalemate
        };
    }

    if rules
        .fifty_move_limit
        .is_some_and(|limit| board.halfmove_clock >= limit)
    {
        return GameStatus::DrawByFiftyMove;
    }

    let seen = repetitions
        .get(&board.position_hash())
        .copied()
        .unwrap_or(0);
    if rules.repetition_limit.is_some_and(|limit| seen >= limit) {
        return GameStatus::DrawByRepetition;
    }

    if rules.insufficient_material && insufficient_material(board) {
        return GameStatus::DrawByInsufficientMaterial;
    }

    if in_check {
        GameStatus::Check
    } else {
        GameStatus::Playing
    }
}
