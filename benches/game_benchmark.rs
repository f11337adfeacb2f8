//! Benchmarks for running complete games.
//!
//! This benchmarks the full simulation loop plus the per-action hot paths:
//! dice exchanges and the fortify map.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use conquest::Board;
use conquest::game::{Game, get_fortify_paths, roll_exchange};
use conquest::simulation::{SimulationConfig, run_random_game};

fn bench_single_game(c: &mut Criterion) {
    let board = Arc::new(Board::classic().unwrap());
    let config = SimulationConfig {
        num_players: 2,
        ..SimulationConfig::default()
    };

    c.bench_function("single_game_2p", |b| {
        b.iter(|| {
            let result = run_random_game(black_box(&board), black_box(42), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_single_game_4p(c: &mut Criterion) {
    let board = Arc::new(Board::classic().unwrap());
    let config = SimulationConfig::default();

    c.bench_function("single_game_4p", |b| {
        b.iter(|| {
            let result = run_random_game(black_box(&board), black_box(42), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_game_batch(c: &mut Criterion) {
    // 10 games sequentially (without parallel overhead)
    let board = Arc::new(Board::classic().unwrap());
    let config = SimulationConfig::default();

    c.bench_function("10_games_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                let result = run_random_game(&board, black_box(seed), &config);
                black_box(result).ok();
            }
        });
    });
}

fn bench_exchange(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(7);

    c.bench_function("exchange_3v2", |b| {
        b.iter(|| black_box(roll_exchange(&mut rng, black_box(3), black_box(2))));
    });
}

fn bench_fortify_paths(c: &mut Criterion) {
    let board = Arc::new(Board::classic().unwrap());
    let game = Game::seeded(Arc::clone(&board), 2, 3).unwrap();

    c.bench_function("fortify_paths_classic", |b| {
        b.iter(|| black_box(get_fortify_paths(&board, game.state(), black_box(0))));
    });
}

criterion_group!(
    benches,
    bench_single_game,
    bench_single_game_4p,
    bench_game_batch,
    bench_exchange,
    bench_fortify_paths,
);
criterion_main!(benches);
