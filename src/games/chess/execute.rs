//! Applying moves to a board.
//!
//! ## Promotion
//!
//! A pawn reaching the last rank is executed in two phases. `execute_move`
//! lifts the pawn off its source square and records a
//! [`PendingPromotion`]; the destination stays empty and the side to move
//! does not change. `resolve_promotion` then places the chosen piece and
//! completes the turn.

use super::board::{Board, PendingPromotion};
use super::movegen::legal_moves;
use super::types::{Color, Move, MoveKind, Piece, PieceKind, Square};
use crate::core::{InvalidAction, RuleResult};

/// Apply a legal move from `from` to `to`.
///
/// Fails with `InvalidAction` and leaves `board` untouched if a promotion is
/// pending, `from` is empty or holds an opponent piece, or no legal move
/// connects the squares.
pub fn execute_move(board: &Board, from: Square, to: Square) -> RuleResult<Board> {
    if board.pending_promotion.is_some() {
        return Err(InvalidAction::PromotionPending.into());
    }
    let piece = board
        .piece_at(from)
        .ok_or_else(|| InvalidAction::NoPieceAt(from.to_string()))?;
    if piece.color != board.side_to_move {
        return Err(InvalidAction::WrongSideToMove(piece.color.to_string()).into());
    }

    let mv = legal_moves(board, from)
        .into_iter()
        .find(|m| m.to == to)
        .ok_or_else(|| InvalidAction::IllegalMove {
            from: from.to_string(),
            to: to.to_string(),
        })?;

    Ok(apply_unchecked(board, &mv, None))
}

/// Complete a pending promotion with `kind`.
pub fn resolve_promotion(board: &Board, kind: PieceKind) -> RuleResult<Board> {
    let pending = board
        .pending_promotion
        .ok_or(InvalidAction::NoPromotionPending)?;
    if !PieceKind::PROMOTIONS.contains(&kind) {
        return Err(InvalidAction::InvalidPromotionPiece(kind.to_string()).into());
    }

    let mut next = board.clone();
    next.set(pending.square, Some(Piece::new(pending.color, kind)));
    next.pending_promotion = None;
    finish_turn(&mut next);
    Ok(next)
}

/// Apply a generated move without checking legality.
///
/// With `promote_to` set, a promotion is completed in one step; otherwise it
/// is left pending. Legality filtering uses the one-step form.
pub(crate) fn apply_unchecked(board: &Board, mv: &Move, promote_to: Option<PieceKind>) -> Board {
    let mut next = board.clone();
    let Some(piece) = board.piece_at(mv.from) else {
        return next;
    };
    let color = piece.color;
    let captured = board.piece_at(mv.to);

    next.set(mv.from, None);
    next.en_passant = None;

    match mv.kind {
        MoveKind::Normal => next.set(mv.to, Some(piece)),
        MoveKind::DoubleStep => {
            next.set(mv.to, Some(piece));
            next.en_passant = mv.from.offset(0, color.pawn_direction());
        }
        MoveKind::EnPassant => {
            next.set(mv.to, Some(piece));
            next.set(Square::new(mv.to.file, mv.from.rank), None);
        }
        MoveKind::Castle(side) => {
            next.set(mv.to, Some(piece));
            let rook = next.piece_at(side.rook_home(color));
            next.set(side.rook_home(color), None);
            next.set(side.rook_target(color), rook);
        }
        MoveKind::Promotion => match promote_to {
            Some(kind) => next.set(mv.to, Some(Piece::new(color, kind))),
            None => {
                next.set(mv.to, None);
                next.pending_promotion = Some(PendingPromotion {
                    square: mv.to,
                    color,
                });
            }
        },
    }

    if piece.kind == PieceKind::King {
        next.castling.revoke_all(color);
    }
    next.castling.revoke_rook_square(mv.from);
    next.castling.revoke_rook_square(mv.to);

    let is_capture = captured.is_some() || mv.kind == MoveKind::EnPassant;
    if piece.kind == PieceKind::Pawn || is_capture {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock += 1;
    }

    if next.pending_promotion.is_none() {
        finish_turn(&mut next);
    }
    next
}

fn finish_turn(board: &mut Board) {
    if board.side_to_move == Color::Black {
        board.fullmove_number += 1;
    }
    board.side_to_move = board.side_to_move.opponent();
}

/// True if neither side can possibly deliver mate: bare kings, a single
/// minor piece against a bare king, or only bishops that all stand on the
/// same square color.
#[must_use]
pub fn insufficient_material(board: &Board) -> bool {
    let mut knights = 0;
    let mut bishops = Vec::new();
    for (sq, piece) in board.pieces() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Knight => knights += 1,
            PieceKind::Bishop => bishops.push(sq.is_dark()),
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
        }
    }

    match (knights, bishops.len()) {
        (0, 0) | (1, 0) | (0, 1) => true,
        (0, _) => bishops.iter().all(|&dark| dark == bishops[0]),
        _ => false,
    }
}
