//! 24 Points: combine four numbers with `+ - * /` to reach 24.
//!
//! ```
//! use arcade_rules::games::points24::{check_submission, is_solvable, PuzzleConfig};
//!
//! assert!(is_solvable(&[4, 1, 8, 7]));
//! assert!(!is_solvable(&[1, 1, 1, 1]));
//!
//! let config = PuzzleConfig::default();
//! let expr = check_submission(&[4, 1, 8, 7], "(8 - 4) * (7 - 1)", &config).unwrap();
//! assert_eq!(expr.to_string(), "(8-4)*(7-1)");
//! ```

mod expr;
mod puzzle;
mod solver;

pub use expr::{Expr, Op, DIVISOR_EPSILON, MAX_NESTING, MAX_NUMBERS};
pub use puzzle::{check_submission, generate_puzzle, PuzzleConfig, PUZZLE_SIZE};
pub use solver::{is_solvable, solve};
