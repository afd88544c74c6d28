//! Move generation and attack detection.
//!
//! `pseudo_legal_moves` follows piece movement only; `legal_moves` filters
//! out anything that would leave the mover's king attacked.

use smallvec::SmallVec;

use super::board::Board;
use super::execute::apply_unchecked;
use super::types::{CastleSide, Color, Move, MoveKind, Piece, PieceKind, Square};

/// Moves from a single square. 27 is the most a queen can have.
pub type MoveList = SmallVec<[Move; 28]>;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Moves the piece on `square` could make by its movement pattern alone,
/// ignoring whether its own king ends up in check.
///
/// Empty for an empty square. Castling candidates require the right, the
/// rook on its home square and empty squares in between; whether the king
/// passes through check is left to [`legal_moves`].
#[must_use]
pub fn pseudo_legal_moves(board: &Board, square: Square) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = board.piece_at(square) else {
        return moves;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, square, piece.color, &mut moves),
        PieceKind::Knight => step_moves(board, square, piece.color, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => slide_moves(board, square, piece.color, &DIAGONALS, &mut moves),
        PieceKind::Rook => slide_moves(board, square, piece.color, &ORTHOGONALS, &mut moves),
        PieceKind::Queen => {
            slide_moves(board, square, piece.color, &ORTHOGONALS, &mut moves);
            slide_moves(board, square, piece.color, &DIAGONALS, &mut moves);
        }
        PieceKind::King => {
            step_moves(board, square, piece.color, &KING_OFFSETS, &mut moves);
            castle_candidates(board, square, piece.color, &mut moves);
        }
    }

    moves
}

/// Legal moves for the piece on `square`.
///
/// Empty unless the piece belongs to the side to move, and empty while a
/// promotion choice is pending.
#[must_use]
pub fn legal_moves(board: &Board, square: Square) -> MoveList {
    let mut legal = MoveList::new();
    if board.pending_promotion.is_some() {
        return legal;
    }
    let Some(piece) = board.piece_at(square) else {
        return legal;
    };
    if piece.color != board.side_to_move {
        return legal;
    }

    for mv in pseudo_legal_moves(board, square) {
        if let MoveKind::Castle(side) = mv.kind {
            if !castle_path_safe(board, piece.color, square, side) {
                continue;
            }
        }
        let after = apply_unchecked(board, &mv, Some(PieceKind::Queen));
        if !is_in_check(&after, piece.color) {
            legal.push(mv);
        }
    }

    legal
}

/// Every legal move for the side to move.
#[must_use]
pub fn all_legal_moves(board: &Board) -> Vec<Move> {
    board
        .pieces()
        .filter(|(_, p)| p.color == board.side_to_move)
        .flat_map(|(sq, _)| legal_moves(board, sq))
        .collect()
}

/// True if the side to move has at least one legal move.
#[must_use]
pub fn has_legal_move(board: &Board) -> bool {
    board
        .pieces()
        .filter(|(_, p)| p.color == board.side_to_move)
        .any(|(sq, _)| !legal_moves(board, sq).is_empty())
}

/// True if `color`'s king is attacked. A board without that king is never
/// in check.
#[must_use]
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opponent()))
}

/// True if any piece of `attacker` attacks `target`.
#[must_use]
pub fn is_square_attacked(board: &Board, target: Square, attacker: Color) -> bool {
    let holds = |sq: Option<Square>, kinds: &[PieceKind]| {
        sq.and_then(|s| board.piece_at(s))
            .is_some_and(|p| p.color == attacker && kinds.contains(&p.kind))
    };

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(target.offset(df, dr), &[PieceKind::Knight]))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(target.offset(df, dr), &[PieceKind::King]))
    {
        return true;
    }

    // A pawn attacks diagonally forward, so look one rank behind the target.
    let back = -attacker.pawn_direction();
    if [-1, 1]
        .iter()
        .any(|&df| holds(target.offset(df, back), &[PieceKind::Pawn]))
    {
        return true;
    }

    let ray_hits = |dirs: &[(i8, i8)], kinds: &[PieceKind]| {
        dirs.iter().any(|&(df, dr)| {
            let mut cur = target.offset(df, dr);
            while let Some(sq) = cur {
                if let Some(p) = board.piece_at(sq) {
                    return p.color == attacker && kinds.contains(&p.kind);
                }
                cur = sq.offset(df, dr);
            }
            false
        })
    };

    ray_hits(&ORTHOGONALS, &[PieceKind::Rook, PieceKind::Queen])
        || ray_hits(&DIAGONALS, &[PieceKind::Bishop, PieceKind::Queen])
}

fn pawn_moves(board: &Board, from: Square, color: Color, out: &mut MoveList) {
    let dir = color.pawn_direction();
    let forward_kind = |to: Square| {
        if to.rank == color.promotion_rank() {
            MoveKind::Promotion
        } else {
            MoveKind::Normal
        }
    };

    if let Some(one) = from.offset(0, dir) {
        if board.piece_at(one).is_none() {
            out.push(Move::new(from, one, forward_kind(one)));
            if from.rank == color.pawn_start_rank() {
                if let Some(two) = one.offset(0, dir) {
                    if board.piece_at(two).is_none() {
                        out.push(Move::new(from, two, MoveKind::DoubleStep));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match board.piece_at(to) {
            Some(target) if target.color != color => {
                out.push(Move::new(from, to, forward_kind(to)));
            }
            None if board.en_passant == Some(to) => {
                out.push(Move::new(from, to, MoveKind::EnPassant));
            }
            _ => {}
        }
    }
}

fn step_moves(board: &Board, from: Square, color: Color, offsets: &[(i8, i8)], out: &mut MoveList) {
    for &(df, dr) in offsets {
        if let Some(to) = from.offset(df, dr) {
            if !is_own(board.piece_at(to), color) {
                out.push(Move::new(from, to, MoveKind::Normal));
            }
        }
    }
}

fn slide_moves(board: &Board, from: Square, color: Color, dirs: &[(i8, i8)], out: &mut MoveList) {
    for &(df, dr) in dirs {
        let mut cur = from.offset(df, dr);
        while let Some(to) = cur {
            match board.piece_at(to) {
                None => out.push(Move::new(from, to, MoveKind::Normal)),
                Some(p) => {
                    if p.color != color {
                        out.push(Move::new(from, to, MoveKind::Normal));
                    }
                    break;
                }
            }
            cur = to.offset(df, dr);
        }
    }
}

fn castle_candidates(board: &Board, from: Square, color: Color, out: &mut MoveList) {
    let home = Square::new(4, color.back_rank());
    if from != home {
        return;
    }
    for side in [CastleSide::King, CastleSide::Queen] {
        if !board.castling.allows(color, side) {
            continue;
        }
        let rook_home = side.rook_home(color);
        if board.piece_at(rook_home) != Some(Piece::new(color, PieceKind::Rook)) {
            continue;
        }
        let (lo, hi) = if rook_home.file < from.file {
            (rook_home.file + 1, from.file)
        } else {
            (from.file + 1, rook_home.file)
        };
        let clear = (lo..hi).all(|file| board.piece_at(Square::new(file, from.rank)).is_none());
        if clear {
            out.push(Move::new(from, side.king_target(color), MoveKind::Castle(side)));
        }
    }
}

/// The king may not castle out of check or across an attacked square.
/// The landing square is covered by the general self-check filter.
fn castle_path_safe(board: &Board, color: Color, king: Square, side: CastleSide) -> bool {
    let opponent = color.opponent();
    if is_square_attacked(board, king, opponent) {
        return false;
    }
    let step: i8 = match side {
        CastleSide::King => 1,
        CastleSide::Queen => -1,
    };
    king.offset(step, 0)
        .is_some_and(|crossed| !is_square_attacked(board, crossed, opponent))
}

fn is_own(piece: Option<Piece>, color: Color) -> bool {
    piece.is_some_and(|p| p.color == color)
}
