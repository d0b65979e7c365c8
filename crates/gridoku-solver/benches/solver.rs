//! Benchmarks for exhaustive counting and exact-cover solving.

use criterion::{Criterion, criterion_group, criterion_main};
use gridoku_core::{BlockDims, Board};
use gridoku_solver::{BranchBoundBackend, count_solutions, fill_random, find_assignment};
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

fn puzzle_9x9(givens: usize) -> Board {
    let mut rng = Pcg64Mcg::seed_from_u64(97);
    let mut solved = Board::new(BlockDims::new(3, 3).unwrap());
    assert!(fill_random(&mut solved, &mut rng));

    let mut puzzle = Board::new(BlockDims::new(3, 3).unwrap());
    for pos in solved.positions().take(givens) {
        puzzle
            .place_given(pos, solved.cell(pos).value())
            .expect("given from a solved grid");
    }
    puzzle
}

fn bench_count(c: &mut Criterion) {
    let blank_4x4 = Board::new(BlockDims::new(2, 2).unwrap());
    c.bench_function("count_solutions/blank_4x4", |b| {
        b.iter(|| count_solutions(std::hint::black_box(&blank_4x4)));
    });

    let puzzle = puzzle_9x9(55);
    c.bench_function("count_solutions/9x9_55_givens", |b| {
        b.iter(|| count_solutions(std::hint::black_box(&puzzle)));
    });
}

fn bench_exact_cover(c: &mut Criterion) {
    let puzzle = puzzle_9x9(40);
    c.bench_function("find_assignment/9x9_40_givens", |b| {
        b.iter(|| {
            let mut scratch = std::hint::black_box(&puzzle).clone();
            find_assignment(&mut scratch, &BranchBoundBackend, true).expect("backend is infallible")
        });
    });
}

criterion_group!(benches, bench_count, bench_exact_cover);
criterion_main!(benches);
