//! Tile grid for Mahjong Linkup.
//!
//! ## Layout
//!
//! Row-major `rows × cols` tiles. An empty cell is a removed tile, so a grid
//! is always rectangular. Paths may also run through a virtual ring of empty
//! cells just outside the grid; that ring is not stored.
//!
//! ## Invariant
//!
//! Every kind occurs an even number of times among live tiles. Grids built
//! with [`TileGrid::from_rows`] are checked; grids only change through
//! [`TileGrid::remove_pair`], which removes two tiles of one kind.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::path::check_link;
use crate::core::{InvalidAction, MalformedState, RuleResult};

/// Names of the 34 tile kinds, indexed by [`TileKind`].
pub const TILE_NAMES: [&str; 34] = [
    "bamboo1", "bamboo2", "bamboo3", "bamboo4", "bamboo5", "bamboo6", "bamboo7", "bamboo8", "bamboo9",
    "character1", "character2", "character3", "character4", "character5", "character6", "character7",
    "character8", "character9", "circle1", "circle2", "circle3", "circle4", "circle5", "circle6",
    "circle7", "circle8", "circle9", "east", "south", "west", "north", "red", "green", "white",
];

/// Tile face, an index into [`TILE_NAMES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileKind(pub u8);

impl TileKind {
    /// Number of distinct faces.
    pub const COUNT: u8 = TILE_NAMES.len() as u8;

    /// Human-readable name, or `None` for an index outside the catalogue.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        TILE_NAMES.get(self.0 as usize).copied()
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "tile#{}", self.0),
        }
    }
}

/// One cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub removed: bool,
}

impl Tile {
    #[must_use]
    pub const fn live(kind: TileKind) -> Self {
        Self {
            kind,
            removed: false,
        }
    }

    /// An empty cell.
    pub const EMPTY: Tile = Tile {
        kind: TileKind(0),
        removed: true,
    };
}

/// A cell coordinate inside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A rectangular board of tiles.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Build a grid from rows of cells, `None` marking an empty cell.
    ///
    /// Rejects empty or ragged input and kinds with an odd live count.
    pub fn from_rows(rows: &[Vec<Option<TileKind>>]) -> RuleResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(MalformedState::EmptyGrid.into());
        }
        if rows.iter().any(|r| r.len() != cols) {
            return Err(MalformedState::RaggedGrid.into());
        }
        let tiles = rows
            .iter()
            .flatten()
            .map(|cell| cell.map_or(Tile::EMPTY, Tile::live))
            .collect();
        let grid = Self {
            rows: rows.len(),
            cols,
            tiles,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Build a fully live grid from a flat row-major list of kinds.
    pub(crate) fn from_kinds(rows: usize, cols: usize, kinds: &[TileKind]) -> Self {
        Self {
            rows,
            cols,
            tiles: kinds.iter().copied().map(Tile::live).collect(),
        }
    }

    /// Check that every kind has an even live count.
    pub fn validate(&self) -> RuleResult<()> {
        let mut counts = [0usize; 256];
        for tile in self.tiles.iter().filter(|t| !t.removed) {
            counts[tile.kind.0 as usize] += 1;
        }
        match counts.iter().position(|&n| n % 2 == 1) {
            Some(kind) => Err(MalformedState::UnpairedKind(kind as u8).into()),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The tile at `pos`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    /// True if `pos` is inside the grid and its tile is still in play.
    #[must_use]
    pub fn is_live(&self, pos: Pos) -> bool {
        self.get(pos).is_some_and(|t| !t.removed)
    }

    /// Number of tiles still in play.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.removed).count()
    }

    /// True once every tile is removed.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.tiles.iter().all(|t| t.removed)
    }

    /// Positions of live tiles in row-major order.
    pub fn live_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.removed)
            .map(|(i, _)| self.pos_of(i))
    }

    /// Remove a linkable pair, returning the new grid.
    ///
    /// Fails with `InvalidAction` (and no change) if `a` and `b` cannot be
    /// linked.
    pub fn remove_pair(&self, a: Pos, b: Pos) -> RuleResult<TileGrid> {
        check_link(self, a, b)?;
        let mut next = self.clone();
        next.clear(a);
        next.clear(b);
        Ok(next)
    }

    pub(crate) fn index(&self, pos: Pos) -> Option<usize> {
        (pos.row < self.rows && pos.col < self.cols).then(|| pos.row * self.cols + pos.col)
    }

    pub(crate) fn pos_of(&self, index: usize) -> Pos {
        Pos::new(index / self.cols, index % self.cols)
    }

    pub(crate) fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn clear(&mut self, pos: Pos) {
        if let Some(i) = self.index(pos) {
            self.tiles[i].removed = true;
        }
    }

    pub(crate) fn restore(&mut self, pos: Pos) {
        if let Some(i) = self.index(pos) {
            self.tiles[i].removed = false;
        }
    }

    pub(crate) fn set_kind(&mut self, pos: Pos, kind: TileKind) {
        if let Some(i) = self.index(pos) {
            self.tiles[i].kind = kind;
        }
    }

    /// Reject positions outside the grid.
    pub(crate) fn check_bounds(&self, pos: Pos) -> RuleResult<()> {
        match self.index(pos) {
            Some(_) => Ok(()),
            None => Err(InvalidAction::OutOfBounds {
                row: pos.row,
                col: pos.col,
            }
            .into()),
        }
    }
}
