//! Error taxonomy shared by all engines.
//!
//! - `InvalidAction`: the request breaks a game rule. Recoverable; the caller
//!   keeps its current state and may try something else.
//! - `MalformedState`: the input state itself is broken (no king, duplicate
//!   card, unpaired tiles). This is a caller bug.
//!
//! Negative search results (no path, unsolvable puzzle, budget spent) are not
//! errors; see [`SearchOutcome`](crate::core::SearchOutcome).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used across the engines.
pub type RuleResult<T> = Result<T, RuleError>;

/// Top-level engine error.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RuleError {
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("malformed state: {0}")]
    MalformedState(#[from] MalformedState),
}

impl RuleError {
    /// True for rule violations the caller can recover from.
    #[must_use]
    pub fn is_invalid_action(&self) -> bool {
        matches!(self, RuleError::InvalidAction(_))
    }
}

/// A rule violation. No state was changed.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InvalidAction {
    #[error("the game is already over")]
    GameOver,

    // chess
    #[error("{0:?} is not a square")]
    UnknownSquare(String),
    #[error("no piece on {0}")]
    NoPieceAt(String),
    #[error("it is not {0}'s turn")]
    WrongSideToMove(String),
    #[error("{from} to {to} is not a legal move")]
    IllegalMove { from: String, to: String },
    #[error("a promotion choice is pending")]
    PromotionPending,
    #[error("no promotion is pending")]
    NoPromotionPending,
    #[error("cannot promote to {0}")]
    InvalidPromotionPiece(String),
    #[error("cannot undo: no moves played")]
    NothingToUndo,

    // doudizhu
    #[error("a play must contain at least one card")]
    EmptyPlay,
    #[error("cards are not in the player's hand")]
    CardsNotInHand,
    #[error("cards do not form a recognised combination")]
    UnrecognizedCombination,
    #[error("play does not beat the current lead")]
    DoesNotBeat,
    #[error("the leading player cannot pass")]
    CannotPass,

    // linkup
    #[error("position ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },
    #[error("a tile cannot be linked to itself")]
    SameTile,
    #[error("tile already removed")]
    TileRemoved,
    #[error("tiles are of different kinds")]
    KindMismatch,
    #[error("no path with at most two turns connects the tiles")]
    NoPath,

    // points24
    #[error("expression could not be parsed: {0}")]
    Unparseable(#[from] ParseError),
    #[error("expression must use each puzzle number exactly once")]
    NumbersMismatch,
    #[error("expression divides by zero")]
    DivisionByZero,
    #[error("expression does not reach the target")]
    MissesTarget,
}

/// A broken input state. Indicates a bug in the caller.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MalformedState {
    #[error("{color} has {count} kings")]
    KingCount { color: String, count: usize },
    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(String),
    #[error("invalid FEN: {0}")]
    Fen(String),
    #[error("card {0} appears more than once")]
    DuplicateCard(String),
    #[error("unknown card {0:?}")]
    UnknownCard(String),
    #[error("expected {expected} seats, found {found}")]
    SeatCount { expected: usize, found: usize },
    #[error("{0} is not at the table")]
    SeatOutOfRange(String),
    #[error("grid rows have unequal lengths")]
    RaggedGrid,
    #[error("grid has no cells")]
    EmptyGrid,
    #[error("tile kind {0} appears an odd number of times")]
    UnpairedKind(u8),
    #[error("puzzle number {0} is outside the allowed range")]
    NumberOutOfRange(u32),
    #[error("level {0} cannot be filled with pairs")]
    UnpairableLevel(u8),
    #[error("level {0} produced no layout with a move")]
    NoMovableLayout(u8),
}

/// Expression syntax error.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ParseError {
    #[error("unexpected character {ch:?} at {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected token at {0}")]
    UnexpectedToken(usize),
    #[error("number too large at {0}")]
    NumberTooLarge(usize),
    #[error("brackets nested too deeply at {0}")]
    TooDeep(usize),
    #[error("too many numbers, the one at {0} is over the limit")]
    TooManyNumbers(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = RuleError::from(InvalidAction::IllegalMove {
            from: "e2".into(),
            to: "e5".into(),
        });
        assert_eq!(err.to_string(), "invalid action: e2 to e5 is not a legal move");
        assert!(err.is_invalid_action());

        let err = RuleError::from(MalformedState::UnpairedKind(3));
        assert_eq!(err.to_string(), "malformed state: tile kind 3 appears an odd number of times");
        assert!(!err.is_invalid_action());
    }

    #[test]
    fn test_parse_error_converts() {
        let err: InvalidAction = ParseError::UnexpectedEnd.into();
        assert_eq!(err.to_string(), "expression could not be parsed: unexpected end of input");
    }
}
