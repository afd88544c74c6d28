//! Mahjong Linkup: clear the board by removing pairs of matching tiles that
//! can be joined by a path with at most two bends.
//!
//! ```
//! use arcade_rules::core::GameRng;
//! use arcade_rules::games::linkup::{find_hint, generate_board, LevelConfig};
//!
//! let level = LevelConfig::builtin(1).unwrap();
//! let grid = generate_board(level, &mut GameRng::new(7)).unwrap();
//! let (a, b) = find_hint(&grid).unwrap();
//! let grid = grid.remove_pair(a, b).unwrap();
//! assert_eq!(grid.live_count(), 46);
//! ```

mod grid;
mod level;
mod path;
mod rules;
mod solver;

pub use grid::{Pos, Tile, TileGrid, TileKind, TILE_NAMES};
pub use level::{generate_board, generate_solvable_board, shuffle_remaining, LevelConfig, LEVELS};
pub use path::{can_link, check_link, find_path, LinkPath, PathPoint, MAX_TURNS};
pub use rules::{Linkup, LinkupOutcome, RemovePair};
pub use solver::{find_full_solution, find_hint, has_any_removable_pair, removable_pairs};
