//! Micro-benchmarks for the scoring and neighbor-generation hot paths.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench annealing
//! ```

use std::hint;
use std::str::FromStr as _;

use annealace_core::Board;
use annealace_solver::{
    AnnealingConfig, AnnealingSolver, ForbiddenSets, LockedPositions, NeighborGenerator,
    objective_score,
};
use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

const FIXTURE_9X9: &str = "\
000000000
672195348
000000000
859761423
000000000
713924856
000000000
287419635
000000079";

fn fixture() -> Board {
    Board::from_str(FIXTURE_9X9).expect("fixture parses")
}

fn bench_objective_score(c: &mut Criterion) {
    let board = fixture();
    c.bench_function("objective_score", |b| {
        b.iter(|| objective_score(hint::black_box(&board)));
    });
}

fn bench_neighbor_generate(c: &mut Criterion) {
    let board = fixture();
    let locked = LockedPositions::from_board(&board);
    let forbidden = ForbiddenSets::compute(&board, &locked);
    let mut rng = Pcg64Mcg::seed_from_u64(42);

    c.bench_function("neighbor_generate", |b| {
        b.iter(|| {
            let mut locked = locked.clone();
            NeighborGenerator::new().generate(
                &mut rng,
                hint::black_box(&board),
                &mut locked,
                &forbidden,
            )
        });
    });
}

fn bench_short_anneal(c: &mut Criterion) {
    let board = fixture();
    // A hot, short schedule: roughly 700 iterations per run.
    let config = AnnealingConfig::default()
        .with_min_temperature(0.93)
        .with_seed(42);
    let solver = AnnealingSolver::new(config);

    c.bench_function("short_anneal", |b| {
        b.iter(|| solver.solve(hint::black_box(&board)).expect("valid config"));
    });
}

criterion_group!(
    benches,
    bench_objective_score,
    bench_neighbor_generate,
    bench_short_anneal
);
criterion_main!(benches);
