//! Puzzle configuration, generation and answer checking.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::expr::Expr;
use super::solver::solve;
use crate::core::{GameRng, InvalidAction, MalformedState, RuleResult, SearchBudget};

/// Numbers dealt per puzzle.
pub const PUZZLE_SIZE: usize = 4;

/// Draws tried before `generate_puzzle` gives up.
const MAX_DRAWS: u32 = 1_000;

/// Target, number range and tolerance for a puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub target: u32,
    /// Smallest number dealt, inclusive.
    pub min: u32,
    /// Largest number dealt, inclusive.
    pub max: u32,
    /// A value within this distance of the target counts as a hit.
    pub epsilon: f64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            target: 24,
            min: 1,
            max: 13,
            epsilon: 1e-6,
        }
    }
}

impl PuzzleConfig {
    #[must_use]
    pub fn with_target(mut self, target: u32) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_range(mut self, min: u32, max: u32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// True if `value` is close enough to the target.
    #[must_use]
    pub fn hits(&self, value: f64) -> bool {
        (value - f64::from(self.target)).abs() < self.epsilon
    }

    /// Reject puzzle numbers outside `[min, max]`.
    pub fn check_numbers(&self, numbers: &[u32]) -> RuleResult<()> {
        match numbers.iter().find(|n| !(self.min..=self.max).contains(n)) {
            Some(&n) => Err(MalformedState::NumberOutOfRange(n).into()),
            None => Ok(()),
        }
    }
}

/// Deal four numbers in the configured range.
///
/// With `want_solvable` set, draws are rejected until their solvability
/// matches. Returns `None` if no draw matched within a fixed number of
/// tries, which happens when the range cannot produce the requested kind
/// of puzzle.
pub fn generate_puzzle(
    rng: &mut GameRng,
    want_solvable: Option<bool>,
    config: &PuzzleConfig,
) -> Option<[u32; PUZZLE_SIZE]> {
    let (low, high) = (config.min.min(config.max), config.min.max(config.max));
    let mut numbers = [low; PUZZLE_SIZE];

    for draw in 1..=MAX_DRAWS {
        for n in &mut numbers {
            *n = rng.gen_range(low..=high);
        }
        let Some(want) = want_solvable else {
            return Some(numbers);
        };
        let solvable = solve(&numbers, config, SearchBudget::unlimited()).is_found();
        if solvable == want {
            if draw > 1 {
                debug!(draws = draw, want, "puzzle redrawn");
            }
            return Some(numbers);
        }
    }
    debug!(want = ?want_solvable, low, high, "no puzzle with the requested solvability");
    None
}

/// Check a submitted answer to `numbers`.
///
/// The expression must parse, use exactly the puzzle's numbers (as a
/// multiset), evaluate without dividing by zero and land on the target.
/// Returns the parsed expression.
pub fn check_submission(numbers: &[u32], text: &str, config: &PuzzleConfig) -> RuleResult<Expr> {
    config.check_numbers(numbers)?;
    let expr: Expr = text.parse().map_err(InvalidAction::from)?;

    let mut used = expr.numbers();
    let mut dealt = numbers.to_vec();
    used.sort_unstable();
    dealt.sort_unstable();
    if used != dealt {
        return Err(InvalidAction::NumbersMismatch.into());
    }

    let value = expr.eval()?;
    if !config.hits(value) {
        return Err(InvalidAction::MissesTarget.into());
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ParseError;
    use crate::games::points24::solver::is_solvable;

    #[test]
    fn test_default_config() {
        let config = PuzzleConfig::default();
        assert_eq!((config.target, config.min, config.max), (24, 1, 13));
        assert!(config.hits(24.0000001));
        assert!(!config.hits(23.9));
        let custom = config.with_target(10).with_range(1, 9).with_epsilon(0.5);
        assert!(custom.hits(10.4));
    }

    #[test]
    fn test_generated_numbers_in_range() {
        let config = PuzzleConfig::default();
        let mut rng = GameRng::new(11);
        for _ in 0..50 {
            let numbers = generate_puzzle(&mut rng, None, &config).unwrap();
            assert!(config.check_numbers(&numbers).is_ok());
        }
    }

    #[test]
    fn test_generation_respects_solvability() {
        let config = PuzzleConfig::default();
        let mut rng = GameRng::new(12);
        for _ in 0..5 {
            assert!(is_solvable(&generate_puzzle(&mut rng, Some(true), &config).unwrap()));
            assert!(!is_solvable(&generate_puzzle(&mut rng, Some(false), &config).unwrap()));
        }
    }

    #[test]
    fn test_impossible_request_gives_none() {
        let ones = PuzzleConfig::default().with_range(1, 1);
        assert_eq!(generate_puzzle(&mut GameRng::new(5), Some(true), &ones), None);
        assert_eq!(
            generate_puzzle(&mut GameRng::new(5), Some(false), &ones),
            Some([1, 1, 1, 1])
        );
    }

    #[test]
    fn test_generation_is_reproducible() {
        let config = PuzzleConfig::default();
        let a = generate_puzzle(&mut GameRng::new(3), Some(true), &config);
        let b = generate_puzzle(&mut GameRng::new(3), Some(true), &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_accepts_correct_answer() {
        let config = PuzzleConfig::default();
        let expr = check_submission(&[3, 3, 8, 8], "8/(3-8/3)", &config).unwrap();
        assert_eq!(expr.to_string(), "8/(3-(8/3))");
    }

    #[test]
    fn test_rejections() {
        let config = PuzzleConfig::default();
        let numbers = [1, 2, 3, 4];
        assert_eq!(
            check_submission(&numbers, "1*2*3*4+", &config).unwrap_err(),
            InvalidAction::Unparseable(ParseError::UnexpectedEnd).into()
        );
        assert_eq!(
            check_submission(&numbers, "2*3*4", &config).unwrap_err(),
            InvalidAction::NumbersMismatch.into()
        );
        assert_eq!(
            check_submission(&numbers, "4*3*2*1*1", &config).unwrap_err(),
            InvalidAction::NumbersMismatch.into()
        );
        assert_eq!(
            check_submission(&numbers, "1+2+3+4", &config).unwrap_err(),
            InvalidAction::MissesTarget.into()
        );
        assert_eq!(
            check_submission(&numbers, "4/(3-2-1)", &config).unwrap_err(),
            InvalidAction::DivisionByZero.into()
        );
        assert_eq!(
            check_submission(&[0, 2, 3, 4], "0+2*3*4", &config).unwrap_err(),
            MalformedState::NumberOutOfRange(0).into()
        );
        assert!(check_submission(&numbers, "(1+2+3)*4", &config).is_ok());
    }
}
