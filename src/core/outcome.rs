//! Tri-state result of a bounded search.

use serde::{Deserialize, Serialize};

/// Result of a search that may be cut short by its budget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome<T> {
    /// A solution was found.
    Found(T),
    /// The search space was exhausted without a solution.
    NotFound,
    /// The budget ran out first; a solution may or may not exist.
    BudgetExceeded,
}

impl<T> SearchOutcome<T> {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    /// The solution, if one was found.
    pub fn found(self) -> Option<T> {
        match self {
            SearchOutcome::Found(value) => Some(value),
            SearchOutcome::NotFound | SearchOutcome::BudgetExceeded => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SearchOutcome<U> {
        match self {
            SearchOutcome::Found(value) => SearchOutcome::Found(f(value)),
            SearchOutcome::NotFound => SearchOutcome::NotFound,
            SearchOutcome::BudgetExceeded => SearchOutcome::BudgetExceeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_and_map() {
        let outcome = SearchOutcome::Found(2).map(|n| n * 10);
        assert!(outcome.is_found());
        assert_eq!(outcome.found(), Some(20));

        let missing: SearchOutcome<i32> = SearchOutcome::BudgetExceeded;
        assert!(!missing.is_found());
        assert_eq!(missing.map(|n| n + 1), SearchOutcome::BudgetExceeded);
        assert_eq!(SearchOutcome::<i32>::NotFound.found(), None);
    }
}
