//! Board-level queries: any move left, hints, and full solutions.

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use super::grid::{Pos, TileGrid};
use super::path::can_link;
use crate::core::{BudgetMeter, SearchBudget, SearchOutcome};

/// Every linkable pair, first tile in row-major order, second tile after it.
pub fn removable_pairs(grid: &TileGrid) -> impl Iterator<Item = (Pos, Pos)> + '_ {
    let tiles = grid.tiles();
    let n = tiles.len();
    (0..n)
        .filter(move |&i| !tiles[i].removed)
        .flat_map(move |i| {
            (i + 1..n).filter_map(move |j| {
                let (ti, tj) = (tiles[i], tiles[j]);
                if tj.removed || ti.kind != tj.kind {
                    return None;
                }
                let (a, b) = (grid.pos_of(i), grid.pos_of(j));
                can_link(grid, a, b).then_some((a, b))
            })
        })
}

/// True if at least one pair can be removed.
#[must_use]
pub fn has_any_removable_pair(grid: &TileGrid) -> bool {
    removable_pairs(grid).next().is_some()
}

/// The first removable pair in row-major order, if any.
#[must_use]
pub fn find_hint(grid: &TileGrid) -> Option<(Pos, Pos)> {
    removable_pairs(grid).next()
}

/// An order of pair removals that clears the board.
///
/// Depth-first with backtracking; positions already shown to be dead ends
/// are remembered. Each expanded position costs one unit of `budget`.
#[must_use]
pub fn find_full_solution(grid: &TileGrid, budget: SearchBudget) -> SearchOutcome<Vec<(Pos, Pos)>> {
    let mut solver = Solver {
        scratch: grid.clone(),
        order: Vec::with_capacity(grid.live_count() / 2),
        dead: FxHashSet::default(),
        meter: budget.meter(),
    };

    let outcome = match solver.dfs() {
        Some(true) => SearchOutcome::Found(solver.order),
        Some(false) => SearchOutcome::NotFound,
        None => {
            debug!(nodes = solver.meter.used(), "linkup solver budget exhausted");
            SearchOutcome::BudgetExceeded
        }
    };
    trace!(nodes = solver.meter.used(), dead = solver.dead.len(), "linkup solve finished");
    outcome
}

struct Solver {
    scratch: TileGrid,
    order: Vec<(Pos, Pos)>,
    dead: FxHashSet<Vec<u64>>,
    meter: BudgetMeter,
}

impl Solver {
    /// `Some(true)` solved, `Some(false)` dead end, `None` out of budget.
    fn dfs(&mut self) -> Option<bool> {
        if self.scratch.is_cleared() {
            return Some(true);
        }
        let key = removed_mask(&self.scratch);
        if self.dead.contains(&key) {
            return Some(false);
        }
        if !self.meter.tick() {
            return None;
        }

        let pairs: Vec<(Pos, Pos)> = removable_pairs(&self.scratch).collect();
        for (a, b) in pairs {
            self.scratch.clear(a);
            self.scratch.clear(b);
            self.order.push((a, b));

            let result = self.dfs();

            if result != Some(false) {
                return result;
            }
            self.order.pop();
            self.scratch.restore(a);
            self.scratch.restore(b);
        }

        self.dead.insert(key);
        Some(false)
    }
}

fn removed_mask(grid: &TileGrid) -> Vec<u64> {
    let mut mask = vec![0u64; grid.tiles().len().div_ceil(64)];
    for (i, tile) in grid.tiles().iter().enumerate() {
        if tile.removed {
            mask[i / 64] |= 1 << (i % 64);
        }
    }
    mask
}
