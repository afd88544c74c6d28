//! Board position: piece placement plus the side-to-move bookkeeping
//! (castling rights, en-passant target, clocks, pending promotion).
//!
//! Boards are plain values. Every rule operation takes `&Board` and returns a
//! fresh one, so keeping an old board around is all "undo" needs.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use super::types::{CastlingRights, Color, Piece, PieceKind, Square};
use crate::core::{MalformedState, RuleResult};

/// FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A pawn move to the last rank that still needs its piece choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingPromotion {
    /// Destination square, empty until resolved.
    pub square: Square,
    /// Color of the promoting side.
    pub color: Color,
}

/// A chess position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Indexed `[rank][file]`.
    squares: [[Option<Piece>; 8]; 8],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub pending_promotion: Option<PendingPromotion>,
}

impl Board {
    /// Board with no pieces, White to move, no castling rights.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            pending_promotion: None,
        }
    }

    /// The standard initial layout.
    #[must_use]
    pub fn standard() -> Self {
        use PieceKind::*;
        let mut board = Self::empty();
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        for (file, kind) in back.into_iter().enumerate() {
            let file = file as u8;
            board.set(Square::new(file, 0), Some(Piece::new(Color::White, kind)));
            board.set(Square::new(file, 1), Some(Piece::new(Color::White, Pawn)));
            board.set(Square::new(file, 6), Some(Piece::new(Color::Black, Pawn)));
            board.set(Square::new(file, 7), Some(Piece::new(Color::Black, kind)));
        }
        board.castling = CastlingRights::ALL;
        board
    }

    /// Piece on `square`, if any.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.rank as usize][square.file as usize]
    }

    /// Place or clear a piece. Used for setting up positions.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.rank as usize][square.file as usize] = piece;
    }

    /// Every occupied square with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Square of `color`'s king.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.color == color && p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Check the structural invariants: one king per side, no pawns on the
    /// first or last rank.
    pub fn validate(&self) -> RuleResult<()> {
        for color in [Color::White, Color::Black] {
            let count = self
                .pieces()
                .filter(|(_, p)| p.color == color && p.kind == PieceKind::King)
                .count();
            if count != 1 {
                return Err(MalformedState::KingCount {
                    color: color.to_string(),
                    count,
                }
                .into());
            }
        }
        if let Some((sq, _)) = self
            .pieces()
            .find(|(sq, p)| p.kind == PieceKind::Pawn && (sq.rank == 0 || sq.rank == 7))
        {
            return Err(MalformedState::PawnOnBackRank(sq.to_string()).into());
        }
        Ok(())
    }

    /// Hash of everything that makes two positions "the same" for repetition:
    /// placement, side to move, castling rights and en-passant target.
    #[must_use]
    pub fn position_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.squares.hash(&mut hasher);
        self.side_to_move.hash(&mut hasher);
        self.castling.hash(&mut hasher);
        self.en_passant.hash(&mut hasher);
        hasher.finish()
    }

    /// Parse a FEN string. The result is validated.
    pub fn from_fen(fen: &str) -> RuleResult<Self> {
        let bad = |what: &str| MalformedState::Fen(format!("{what} in {fen:?}"));
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(bad("too few fields").into());
        }

        let mut board = Self::empty();
        let rows: Vec<&str> = fields[0].split('/').collect();
        if rows.len() != 8 {
            return Err(bad("expected 8 ranks").into());
        }
        for (i, row) in rows.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for ch in row.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    file += skip as u8;
                    if file > 8 {
                        return Err(bad("rank too long").into());
                    }
                    continue;
                }
                let kind = PieceKind::from_letter(ch).ok_or_else(|| bad("unknown piece"))?;
                if file >= 8 {
                    return Err(bad("rank too long").into());
                }
                let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
                board.set(Square::new(file, rank), Some(Piece::new(color, kind)));
                file += 1;
            }
            if file != 8 {
                return Err(bad("rank has wrong width").into());
            }
        }

        board.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(bad("bad side to move").into()),
        };

        if fields[2] != "-" {
            for ch in fields[2].chars() {
                match ch {
                    'K' => board.castling.white_king_side = true,
                    'Q' => board.castling.white_queen_side = true,
                    'k' => board.castling.black_king_side = true,
                    'q' => board.castling.black_queen_side = true,
                    _ => return Err(bad("bad castling field").into()),
                }
            }
        }

        if fields[3] != "-" {
            let square = fields[3].parse().map_err(|_| bad("bad en-passant square"))?;
            board.en_passant = Some(square);
        }

        if let Some(clock) = fields.get(4) {
            board.halfmove_clock = clock.parse().map_err(|_| bad("bad halfmove clock"))?;
        }
        if let Some(number) = fields.get(5) {
            board.fullmove_number = number.parse().map_err(|_| bad("bad fullmove number"))?;
        }

        board.validate()?;
        Ok(board)
    }

    /// Render as FEN.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let rights = [
            (self.castling.white_king_side, 'K'),
            (self.castling.white_queen_side, 'Q'),
            (self.castling.black_king_side, 'k'),
            (self.castling.black_queen_side, 'q'),
        ];
        let castling: String = rights.iter().filter(|(on, _)| *on).map(|(_, c)| *c).collect();
        out.push_str(if castling.is_empty() { "-" } else { &castling });

        out.push(' ');
        match self.en_passant {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
