//! Chess value types: colors, pieces, squares, castling rights and moves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{InvalidAction, RuleError};

/// The two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Direction pawns of this color advance in, in ranks.
    #[must_use]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank index pawns of this color start on.
    #[must_use]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank index pawns of this color promote on.
    #[must_use]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank index the king and rooks start on.
    #[must_use]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// The six piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may promote to.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Upper-case FEN letter.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Parse an FEN letter, either case.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        f.write_str(name)
    }
}

/// A colored piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN character: upper case for White, lower case for Black.
    #[must_use]
    pub fn fen_char(self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
}

/// A board square. `file` 0 is the a-file, `rank` 0 is White's back rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    /// Create a square. Panics on coordinates off the board.
    #[must_use]
    pub const fn new(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8, "square off the board");
        Self { file, rank }
    }

    /// The square `(df, dr)` away, if it is on the board.
    #[must_use]
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        ((0..8).contains(&file) && (0..8).contains(&rank)).then(|| Self {
            file: file as u8,
            rank: rank as u8,
        })
    }

    /// True for dark squares (a1 is dark).
    #[must_use]
    pub const fn is_dark(self) -> bool {
        (self.file + self.rank) % 2 == 0
    }

    /// All 64 squares, a1..h1, a2..h2, ...
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() == 2 && (b'a'..=b'h').contains(&bytes[0]) && (b'1'..=b'8').contains(&bytes[1]) {
            return Ok(Square::new(bytes[0] - b'a', bytes[1] - b'1'));
        }
        Err(InvalidAction::UnknownSquare(s.to_string()).into())
    }
}

/// Castling availability. Each flag is cleared for good once lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_king_side: true,
        white_queen_side: true,
        black_king_side: true,
        black_queen_side: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_king_side: false,
        white_queen_side: false,
        black_king_side: false,
        black_queen_side: false,
    };

    #[must_use]
    pub fn allows(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::King) => self.white_king_side,
            (Color::White, CastleSide::Queen) => self.white_queen_side,
            (Color::Black, CastleSide::King) => self.black_king_side,
            (Color::Black, CastleSide::Queen) => self.black_queen_side,
        }
    }

    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::King) => self.white_king_side = false,
            (Color::White, CastleSide::Queen) => self.white_queen_side = false,
            (Color::Black, CastleSide::King) => self.black_king_side = false,
            (Color::Black, CastleSide::Queen) => self.black_queen_side = false,
        }
    }

    pub fn revoke_all(&mut self, color: Color) {
        self.revoke(color, CastleSide::King);
        self.revoke(color, CastleSide::Queen);
    }

    /// Revoke the right tied to a rook's home square, if `square` is one.
    pub fn revoke_rook_square(&mut self, square: Square) {
        for color in [Color::White, Color::Black] {
            for side in [CastleSide::King, CastleSide::Queen] {
                if square == side.rook_home(color) {
                    self.revoke(color, side);
                }
            }
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

/// Which wing a castling move goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    /// Where the rook for this side starts.
    #[must_use]
    pub const fn rook_home(self, color: Color) -> Square {
        let file = match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        };
        Square::new(file, color.back_rank())
    }

    /// Where the rook lands after castling.
    #[must_use]
    pub const fn rook_target(self, color: Color) -> Square {
        let file = match self {
            CastleSide::King => 5,
            CastleSide::Queen => 3,
        };
        Square::new(file, color.back_rank())
    }

    /// Where the king lands after castling.
    #[must_use]
    pub const fn king_target(self, color: Color) -> Square {
        let file = match self {
            CastleSide::King => 6,
            CastleSide::Queen => 2,
        };
        Square::new(file, color.back_rank())
    }
}

/// Special handling attached to a generated move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Normal,
    /// Pawn advance of two squares; sets the en-passant target.
    DoubleStep,
    /// Pawn capture onto the en-passant target.
    EnPassant,
    Castle(CastleSide),
    /// Pawn reaching the last rank; resolved by a piece choice.
    Promotion,
}

/// A move as produced by the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    #[must_use]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Self { from, to, kind }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
