//! Chess rules: move generation, special moves, check detection and
//! automatic draws.
//!
//! ## Layers
//!
//! - [`Board`]: a position plus its side-to-move bookkeeping, with FEN
//!   import and export
//! - [`legal_moves`] / [`execute_move`] / [`resolve_promotion`]: pure
//!   functions over boards
//! - [`ChessGame`]: status tracking, repetition counting and undo
//! - [`Chess`]: the [`RulesEngine`](crate::rules::RulesEngine) adapter
//!
//! ```
//! use arcade_rules::games::chess::{ChessGame, GameStatus, Square};
//!
//! let mut game = ChessGame::new();
//! let sq = |s: &str| s.parse::<Square>().unwrap();
//! for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
//!     game.make_move(sq(from), sq(to)).unwrap();
//! }
//! assert!(matches!(game.status(), GameStatus::Checkmate { .. }));
//! ```

mod board;
mod execute;
mod game;
mod movegen;
mod rules;
mod types;

pub use board::{Board, PendingPromotion, START_FEN};
pub use execute::{execute_move, insufficient_material, resolve_promotion};
pub use game::{ChessGame, DrawRules, GameStatus};
pub use movegen::{
    all_legal_moves, has_legal_move, is_in_check, is_square_attacked, legal_moves,
    pseudo_legal_moves, MoveList,
};
pub use rules::{Chess, ChessAction};
pub use types::{CastleSide, CastlingRights, Color, Move, MoveKind, Piece, PieceKind, Square};
