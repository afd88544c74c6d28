//! Linkup integration tests: generated levels played to the end through
//! hints, the solver and the rules engine.

mod common;

use arcade_rules::core::{GameRng, InvalidAction, SearchBudget, SearchOutcome};
use arcade_rules::games::linkup::{
    can_link, find_full_solution, find_hint, find_path, generate_board, generate_solvable_board,
    has_any_removable_pair, shuffle_remaining, LevelConfig, Linkup, LinkupOutcome, PathPoint,
    Pos, RemovePair, TileGrid, TileKind, LEVELS, MAX_TURNS,
};
use arcade_rules::rules::RulesEngine;

fn grid(picture: &[&str]) -> TileGrid {
    let rows: Vec<Vec<Option<TileKind>>> = picture
        .iter()
        .map(|line| {
            line.chars()
                .map(|c| c.to_digit(10).map(|d| TileKind(d as u8)))
                .collect()
        })
        .collect();
    TileGrid::from_rows(&rows).unwrap()
}

/// Following hints and reshuffling when stuck always clears a board.
#[test]
fn test_hint_play_with_reshuffles_clears_level() {
    common::init_logging();
    let level = LevelConfig::builtin(1).unwrap();
    let mut rng = GameRng::new(21);
    let mut board = generate_board(level, &mut rng).unwrap();

    let mut reshuffles = 0;
    while !board.is_cleared() {
        match find_hint(&board) {
            Some((a, b)) => board = board.remove_pair(a, b).unwrap(),
            None => {
                board = shuffle_remaining(&board, &mut rng);
                reshuffles += 1;
                assert!(reshuffles < 100, "too many reshuffles");
            }
        }
    }
    assert_eq!(board.live_count(), 0);
}

/// Every reported path stays within the turn limit and connects the
/// requested tiles.
#[test]
fn test_paths_respect_turn_limit() {
    let board = generate_board(&LEVELS[2], &mut GameRng::new(5)).unwrap();
    let live: Vec<Pos> = board.live_positions().collect();
    for (i, &a) in live.iter().enumerate() {
        for &b in &live[i + 1..] {
            if let Some(path) = find_path(&board, a, b) {
                assert!(path.turns <= MAX_TURNS);
                assert_eq!(path.corners.len(), path.turns as usize + 2);
                assert_eq!(path.corners[0], PathPoint::from(a));
                assert_eq!(path.corners[path.corners.len() - 1], PathPoint::from(b));
                assert!(can_link(&board, b, a));
            }
        }
    }
}

#[test]
fn test_solver_order_replays() {
    let small = LevelConfig::new(1, 4, 6, 6);
    let outcome = generate_solvable_board(&small, &mut GameRng::new(3), SearchBudget::default(), 20)
        .unwrap();
    let board = outcome.found().unwrap();

    let SearchOutcome::Found(order) = find_full_solution(&board, SearchBudget::default()) else {
        panic!("board was verified solvable");
    };
    assert_eq!(order.len(), 12);

    let engine = Linkup;
    let actions: Vec<RemovePair> = order.iter().map(|&(a, b)| RemovePair { a, b }).collect();
    let end = engine.replay(&board, &actions).unwrap();
    assert_eq!(engine.outcome(&end), Some(LinkupOutcome::Cleared));
}

#[test]
fn test_failed_removal_leaves_grid() {
    let board = grid(&["12", "21"]);
    let before = board.clone();
    let err = board.remove_pair(Pos::new(0, 0), Pos::new(1, 1)).unwrap_err();
    assert_eq!(err, InvalidAction::NoPath.into());
    assert_eq!(board, before);
    assert!(!has_any_removable_pair(&board));
    assert_eq!(Linkup.outcome(&board), Some(LinkupOutcome::Stuck));
}

#[test]
fn test_engine_rejects_out_of_bounds() {
    let board = grid(&["11"]);
    let action = RemovePair {
        a: Pos::new(0, 0),
        b: Pos::new(0, 9),
    };
    assert_eq!(
        Linkup.apply_action(&board, &action).unwrap_err(),
        InvalidAction::OutOfBounds { row: 0, col: 9 }.into()
    );
}

#[test]
fn test_level_serde() {
    let json = serde_json::to_string(&LEVELS[4]).unwrap();
    let back: LevelConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, LEVELS[4]);

    let board = generate_board(&LEVELS[0], &mut GameRng::new(1)).unwrap();
    let json = serde_json::to_string(&board).unwrap();
    let back: TileGrid = serde_json::from_str(&json).unwrap();
    assert_eq!(back, board);
}
