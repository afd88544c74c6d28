//! Level configurations, board generation and reshuffling.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::grid::{TileGrid, TileKind};
use super::solver::{find_full_solution, has_any_removable_pair};
use crate::core::{GameRng, MalformedState, RuleResult, SearchBudget, SearchOutcome};

/// Board shape and variety for one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u8,
    pub rows: usize,
    pub cols: usize,
    /// Number of distinct tile kinds used, taken from the start of the
    /// catalogue.
    pub kinds: u8,
}

impl LevelConfig {
    #[must_use]
    pub const fn new(level: u8, rows: usize, cols: usize, kinds: u8) -> Self {
        Self {
            level,
            rows,
            cols,
            kinds,
        }
    }

    /// Built-in level `n` (1-based).
    #[must_use]
    pub fn builtin(n: u8) -> Option<&'static LevelConfig> {
        LEVELS.iter().find(|l| l.level == n)
    }

    /// Check that the board can be filled with pairs.
    pub fn validate(&self) -> RuleResult<()> {
        let cells = self.rows * self.cols;
        if cells == 0 || cells % 2 == 1 || self.kinds == 0 || self.kinds > TileKind::COUNT {
            return Err(MalformedState::UnpairableLevel(self.level).into());
        }
        Ok(())
    }
}

/// The five built-in levels, growing in size and variety.
pub static LEVELS: [LevelConfig; 5] = [
    LevelConfig::new(1, 6, 8, 12),
    LevelConfig::new(2, 6, 10, 18),
    LevelConfig::new(3, 6, 12, 24),
    LevelConfig::new(4, 8, 12, 32),
    LevelConfig::new(5, 10, 14, 34),
];

/// Reshuffles attempted before giving up on finding a movable layout.
const MAX_RESHUFFLES: u32 = 100;

/// Generate a board for `config` that has at least one removable pair.
///
/// Pairs cycle through the configured kinds, so every kind is used and
/// counts stay even. Layouts without a move are discarded and redrawn,
/// up to a fixed number of draws.
pub fn generate_board(config: &LevelConfig, rng: &mut GameRng) -> RuleResult<TileGrid> {
    draw_movable_board(config, rng, MAX_RESHUFFLES)
}

fn draw_movable_board(config: &LevelConfig, rng: &mut GameRng, max_draws: u32) -> RuleResult<TileGrid> {
    config.validate()?;
    let pairs = config.rows * config.cols / 2;
    let mut kinds: Vec<TileKind> = (0..pairs)
        .flat_map(|i| {
            let kind = TileKind((i % config.kinds as usize) as u8);
            [kind, kind]
        })
        .collect();

    for attempt in 1..=max_draws {
        rng.shuffle(&mut kinds);
        let grid = TileGrid::from_kinds(config.rows, config.cols, &kinds);
        if has_any_removable_pair(&grid) {
            if attempt > 1 {
                debug!(level = config.level, attempt, "linkup layout redrawn");
            }
            return Ok(grid);
        }
    }
    debug!(level = config.level, max_draws, "linkup layout draws exhausted");
    Err(MalformedState::NoMovableLayout(config.level).into())
}

/// Generate a board that the solver proves can be cleared.
///
/// Each attempt draws from its own forked stream and is searched with
/// `budget`. Returns `NotFound` if every attempt was proven unsolvable and
/// `BudgetExceeded` if any attempt ran out of budget.
pub fn generate_solvable_board(
    config: &LevelConfig,
    rng: &mut GameRng,
    budget: SearchBudget,
    attempts: u32,
) -> RuleResult<SearchOutcome<TileGrid>> {
    let mut exhausted = false;
    for attempt in 0..attempts {
        let mut stream = rng.fork();
        let grid = generate_board(config, &mut stream)?;
        match find_full_solution(&grid, budget) {
            SearchOutcome::Found(_) => return Ok(SearchOutcome::Found(grid)),
            SearchOutcome::NotFound => {
                debug!(level = config.level, attempt, "generated linkup board unsolvable");
            }
            SearchOutcome::BudgetExceeded => exhausted = true,
        }
    }
    Ok(if exhausted {
        SearchOutcome::BudgetExceeded
    } else {
        SearchOutcome::NotFound
    })
}

/// Redistribute the kinds of the remaining tiles over their positions.
///
/// Retries until the new layout has a removable pair, up to a fixed
/// number of attempts; the last layout is returned either way. Removed
/// cells stay where they are.
#[must_use]
pub fn shuffle_remaining(grid: &TileGrid, rng: &mut GameRng) -> TileGrid {
    let positions: Vec<_> = grid.live_positions().collect();
    let mut kinds: Vec<TileKind> = positions
        .iter()
        .filter_map(|&p| grid.get(p).map(|t| t.kind))
        .collect();
    if kinds.len() < 2 {
        return grid.clone();
    }

    let mut next = grid.clone();
    for attempt in 1..=MAX_RESHUFFLES {
        rng.shuffle(&mut kinds);
        for (&pos, &kind) in positions.iter().zip(&kinds) {
            next.set_kind(pos, kind);
        }
        if has_any_removable_pair(&next) {
            return next;
        }
        debug!(attempt, remaining = kinds.len(), "linkup reshuffle without a move");
    }
    next
}
