//! Two-bend link search.
//!
//! Two live tiles of one kind link if an orthogonal path joins them that
//! passes only through removed cells or the ring just outside the grid and
//! changes direction at most twice.
//!
//! The search is a 0-1 BFS over `(cell, direction)` states on the grid
//! padded by one cell on every side: going straight costs nothing, turning
//! costs one. A state is only revisited with strictly fewer turns.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::grid::{Pos, TileGrid};
use crate::core::{InvalidAction, RuleResult};

/// Most direction changes a link may make.
pub const MAX_TURNS: u8 = 2;

const DIRS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// A point on a link path. Coordinates of `-1`, `rows` or `cols` lie on
/// the border ring outside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathPoint {
    pub row: isize,
    pub col: isize,
}

impl From<Pos> for PathPoint {
    fn from(pos: Pos) -> Self {
        Self {
            row: pos.row as isize,
            col: pos.col as isize,
        }
    }
}

/// A found link: the two endpoints and every bend between them, in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPath {
    pub corners: SmallVec<[PathPoint; 4]>,
    pub turns: u8,
}

/// Padded-grid view used by the search.
struct Padded<'a> {
    grid: &'a TileGrid,
    width: usize,
    height: usize,
}

impl<'a> Padded<'a> {
    fn new(grid: &'a TileGrid) -> Self {
        Self {
            grid,
            width: grid.cols() + 2,
            height: grid.rows() + 2,
        }
    }

    fn cell(&self, pos: Pos) -> usize {
        (pos.row + 1) * self.width + pos.col + 1
    }

    fn step(&self, cell: usize, dir: usize) -> Option<usize> {
        let (dr, dc) = DIRS[dir];
        let row = (cell / self.width) as isize + dr;
        let col = (cell % self.width) as isize + dc;
        ((0..self.height as isize).contains(&row) && (0..self.width as isize).contains(&col))
            .then(|| row as usize * self.width + col as usize)
    }

    /// Border cells and removed tiles are open.
    fn is_open(&self, cell: usize) -> bool {
        let row = cell / self.width;
        let col = cell % self.width;
        if row == 0 || col == 0 || row == self.height - 1 || col == self.width - 1 {
            return true;
        }
        !self.grid.is_live(Pos::new(row - 1, col - 1))
    }

    fn point(&self, cell: usize) -> PathPoint {
        PathPoint {
            row: (cell / self.width) as isize - 1,
            col: (cell % self.width) as isize - 1,
        }
    }
}

#[derive(Clone, Copy)]
struct Step {
    cell: usize,
    dir: usize,
}

/// Validate a link request and return the path.
///
/// Errors, in order of checking: `OutOfBounds`, `SameTile`, `TileRemoved`,
/// `KindMismatch`, `NoPath`.
pub fn check_link(grid: &TileGrid, a: Pos, b: Pos) -> RuleResult<LinkPath> {
    grid.check_bounds(a)?;
    grid.check_bounds(b)?;
    if a == b {
        return Err(InvalidAction::SameTile.into());
    }
    let (Some(ta), Some(tb)) = (grid.get(a), grid.get(b)) else {
        return Err(InvalidAction::OutOfBounds { row: a.row, col: a.col }.into());
    };
    if ta.removed || tb.removed {
        return Err(InvalidAction::TileRemoved.into());
    }
    if ta.kind != tb.kind {
        return Err(InvalidAction::KindMismatch.into());
    }
    search(grid, a, b).ok_or_else(|| InvalidAction::NoPath.into())
}

/// True if `a` and `b` can be removed as a pair.
#[must_use]
pub fn can_link(grid: &TileGrid, a: Pos, b: Pos) -> bool {
    check_link(grid, a, b).is_ok()
}

/// The link between `a` and `b`, if one exists.
#[must_use]
pub fn find_path(grid: &TileGrid, a: Pos, b: Pos) -> Option<LinkPath> {
    check_link(grid, a, b).ok()
}

fn search(grid: &TileGrid, a: Pos, b: Pos) -> Option<LinkPath> {
    let padded = Padded::new(grid);
    let cells = padded.width * padded.height;
    let start = padded.cell(a);
    let target = padded.cell(b);

    let mut best = vec![[u8::MAX; 4]; cells];
    let mut parent: Vec<[Option<Step>; 4]> = vec![[None; 4]; cells];
    let mut queue: VecDeque<(Step, u8)> = VecDeque::new();

    for dir in 0..4 {
        if let Some(cell) = padded.step(start, dir) {
            if cell == target || padded.is_open(cell) {
                best[cell][dir] = 0;
                queue.push_back((Step { cell, dir }, 0));
            }
        }
    }

    while let Some((at, turns)) = queue.pop_front() {
        if turns > best[at.cell][at.dir] {
            continue;
        }
        if at.cell == target {
            return Some(trace_back(&padded, &parent, start, at, turns));
        }
        for dir in 0..4 {
            // reversing never helps
            if dir == (at.dir + 2) % 4 {
                continue;
            }
            let next_turns = turns + u8::from(dir != at.dir);
            if next_turns > MAX_TURNS {
                continue;
            }
            let Some(cell) = padded.step(at.cell, dir) else {
                continue;
            };
            if cell != target && !padded.is_open(cell) {
                continue;
            }
            if next_turns < best[cell][dir] {
                best[cell][dir] = next_turns;
                parent[cell][dir] = Some(at);
                let step = (Step { cell, dir }, next_turns);
                if dir == at.dir {
                    queue.push_front(step);
                } else {
                    queue.push_back(step);
                }
            }
        }
    }
    None
}

fn trace_back(
    padded: &Padded<'_>,
    parent: &[[Option<Step>; 4]],
    start: usize,
    end: Step,
    turns: u8,
) -> LinkPath {
    let mut corners: SmallVec<[PathPoint; 4]> = SmallVec::new();
    corners.push(padded.point(end.cell));

    let mut current = end;
    while let Some(prev) = parent[current.cell][current.dir] {
        if prev.dir != current.dir {
            corners.push(padded.point(prev.cell));
        }
        current = prev;
    }
    corners.push(padded.point(start));
    corners.reverse();

    LinkPath { corners, turns }
}
