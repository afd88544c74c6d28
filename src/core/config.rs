//! Search budget configuration.
//!
//! Exponential searches (full Linkup solutions, expression search) take a
//! `SearchBudget` so a caller on a UI thread can bound the work. Budgets
//! count search nodes rather than wall-clock time, which keeps results
//! reproducible for identical input.

use serde::{Deserialize, Serialize};

/// Upper bound on the number of nodes a search may expand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    /// Maximum nodes to expand. `None` means unbounded.
    pub max_nodes: Option<u64>,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            max_nodes: Some(1_000_000),
        }
    }
}

impl SearchBudget {
    /// A budget that never runs out.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self { max_nodes: None }
    }

    /// A budget of exactly `max_nodes` expansions.
    #[must_use]
    pub const fn nodes(max_nodes: u64) -> Self {
        Self {
            max_nodes: Some(max_nodes),
        }
    }

    /// Replace the node limit.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Start metering a search against this budget.
    #[must_use]
    pub fn meter(&self) -> BudgetMeter {
        BudgetMeter {
            limit: self.max_nodes,
            used: 0,
        }
    }
}

/// Running node counter for one search.
#[derive(Clone, Debug)]
pub struct BudgetMeter {
    limit: Option<u64>,
    used: u64,
}

impl BudgetMeter {
    /// Account for one node. Returns `false` once the budget is spent.
    pub fn tick(&mut self) -> bool {
        if let Some(limit) = self.limit {
            if self.used >= limit {
                return false;
            }
        }
        self.used += 1;
        true
    }

    /// Nodes expanded so far.
    #[must_use]
    pub fn used(&self) -> u64 {
        self.used
    }

    /// True once `tick` has been refused.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self.limit, Some(limit) if self.used >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meter_stops_at_limit() {
        let mut meter = SearchBudget::nodes(3).meter();
        assert!(meter.tick());
        assert!(meter.tick());
        assert!(meter.tick());
        assert!(meter.is_exhausted());
        assert!(!meter.tick());
        assert_eq!(meter.used(), 3);
    }

    #[test]
    fn test_unlimited_never_exhausts() {
        let mut meter = SearchBudget::unlimited().meter();
        for _ in 0..10_000 {
            assert!(meter.tick());
        }
        assert!(!meter.is_exhausted());
    }

    #[test]
    fn test_builder_and_serde() {
        let budget = SearchBudget::unlimited().with_max_nodes(50);
        assert_eq!(budget, SearchBudget::nodes(50));

        let json = serde_json::to_string(&budget).unwrap();
        let back: SearchBudget = serde_json::from_str(&json).unwrap();
        assert_eq!(budget, back);
    }
}
