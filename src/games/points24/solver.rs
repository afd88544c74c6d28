//! Exhaustive search for an expression that reaches the target.
//!
//! Repeatedly pick two of the remaining values and replace them with their
//! sum, product, either difference or either quotient, until one value is
//! left. Every pick order is tried, so every bracketing is covered.

use tracing::{debug, trace};

use super::expr::{Expr, Op};
use super::puzzle::PuzzleConfig;
use crate::core::{BudgetMeter, SearchBudget, SearchOutcome};

/// A witness expression for `numbers`, each used exactly once.
///
/// Each combination step costs one unit of `budget`.
#[must_use]
pub fn solve(numbers: &[u32], config: &PuzzleConfig, budget: SearchBudget) -> SearchOutcome<Expr> {
    if numbers.is_empty() {
        return SearchOutcome::NotFound;
    }
    let terms: Vec<(f64, Expr)> = numbers
        .iter()
        .map(|&n| (f64::from(n), Expr::Num(n)))
        .collect();
    let mut search = Search {
        config,
        meter: budget.meter(),
    };

    let outcome = match search.dfs(terms) {
        Ok(Some(expr)) => SearchOutcome::Found(expr),
        Ok(None) => SearchOutcome::NotFound,
        Err(Exhausted) => {
            debug!(?numbers, nodes = search.meter.used(), "expression search budget exhausted");
            SearchOutcome::BudgetExceeded
        }
    };
    trace!(?numbers, nodes = search.meter.used(), found = outcome.is_found(), "expression search finished");
    outcome
}

/// True if the numbers can reach 24.
#[must_use]
pub fn is_solvable(numbers: &[u32]) -> bool {
    solve(numbers, &PuzzleConfig::default(), SearchBudget::unlimited()).is_found()
}

struct Exhausted;

struct Search<'a> {
    config: &'a PuzzleConfig,
    meter: BudgetMeter,
}

impl Search<'_> {
    fn dfs(&mut self, terms: Vec<(f64, Expr)>) -> Result<Option<Expr>, Exhausted> {
        if let [(value, expr)] = terms.as_slice() {
            return Ok(self.config.hits(*value).then(|| expr.clone()));
        }

        for i in 0..terms.len() {
            for j in i + 1..terms.len() {
                let rest: Vec<(f64, Expr)> = terms
                    .iter()
                    .enumerate()
                    .filter(|&(k, _)| k != i && k != j)
                    .map(|(_, t)| t.clone())
                    .collect();
                let (a, b) = (&terms[i], &terms[j]);

                for (op, lhs, rhs) in [
                    (Op::Add, a, b),
                    (Op::Mul, a, b),
                    (Op::Sub, a, b),
                    (Op::Sub, b, a),
                    (Op::Div, a, b),
                    (Op::Div, b, a),
                ] {
                    let Some(value) = op.apply(lhs.0, rhs.0) else {
                        continue;
                    };
                    if !self.meter.tick() {
                        return Err(Exhausted);
                    }
                    let mut next = rest.clone();
                    next.push((value, Expr::binary(op, lhs.1.clone(), rhs.1.clone())));
                    if let Some(found) = self.dfs(next)? {
                        return Ok(Some(found));
                    }
                }
            }
        }
        Ok(None)
    }
}
