//! Criterion benchmarks for the search-heavy operations.
//!
//! Run with:
//!     cargo bench --bench engines

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use arcade_rules::core::{GameRng, SearchBudget};
use arcade_rules::games::chess::{all_legal_moves, Board};
use arcade_rules::games::doudizhu::{candidate_plays, Deal};
use arcade_rules::games::linkup::{find_full_solution, find_hint, generate_board, LevelConfig, LEVELS};
use arcade_rules::games::points24::{is_solvable, solve, PuzzleConfig};

fn bench_chess(c: &mut Criterion) {
    let positions = [
        ("start", Board::standard()),
        (
            "kiwipete",
            Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap(),
        ),
    ];
    let mut group = c.benchmark_group("chess/all_legal_moves");
    for (name, board) in &positions {
        group.bench_with_input(BenchmarkId::from_parameter(name), board, |b, board| {
            b.iter(|| black_box(all_legal_moves(board).len()))
        });
    }
    group.finish();
}

fn bench_doudizhu(c: &mut Criterion) {
    let deal = Deal::shuffled(&mut GameRng::new(42));
    let hands: Vec<_> = deal.hands.values().cloned().collect();
    c.bench_function("doudizhu/candidate_plays", |b| {
        b.iter(|| {
            let total: usize = hands.iter().map(|h| candidate_plays(h, None).len()).sum();
            black_box(total)
        })
    });
}

fn bench_linkup(c: &mut Criterion) {
    let mut group = c.benchmark_group("linkup/find_hint");
    for level in &LEVELS {
        let board = generate_board(level, &mut GameRng::new(7)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(level.level), &board, |b, board| {
            b.iter(|| black_box(find_hint(board)))
        });
    }
    group.finish();

    let small = LevelConfig::new(1, 4, 6, 6);
    let board = generate_board(&small, &mut GameRng::new(7)).unwrap();
    c.bench_function("linkup/find_full_solution/4x6", |b| {
        b.iter(|| black_box(find_full_solution(&board, SearchBudget::default()).is_found()))
    });
}

fn bench_points24(c: &mut Criterion) {
    let config = PuzzleConfig::default();
    c.bench_function("points24/solve/solvable", |b| {
        b.iter(|| black_box(solve(&[3, 3, 8, 8], &config, SearchBudget::unlimited())))
    });
    c.bench_function("points24/is_solvable/unsolvable", |b| {
        b.iter(|| black_box(is_solvable(&[1, 1, 1, 1])))
    });
}

criterion_group!(benches, bench_chess, bench_doudizhu, bench_linkup, bench_points24);
criterion_main!(benches);
