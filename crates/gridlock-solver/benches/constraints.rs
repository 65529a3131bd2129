//! Micro-benchmarks for individual constraint steps.
//!
//! This suite measures the cost of calling `step_logic` for each constraint
//! on representative board states, plus the digit-partition primitive.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench constraints
//! ```

use std::hint;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use gridlock_core::{Board, Cell, CellGroup, DigitSet};
use gridlock_solver::constraint::{
    ArrowSum, Constraint as _, LockoutLine, possible_circle_arrangements,
};

fn row(cols: std::ops::Range<u8>) -> CellGroup {
    cols.map(|col| Cell::new(0, col)).collect()
}

fn lockout_state() -> (LockoutLine, Board) {
    let mut board = Board::new(9);
    let mut lockout = LockoutLine::new(9, vec![row(0..3)]).unwrap();
    lockout.init_candidates(&mut board);
    board.set_candidates(Cell::new(0, 0), DigitSet::from_values([1, 2]));
    (lockout, board)
}

fn arrow_state() -> (ArrowSum, Board) {
    let mut board = Board::new(9);
    let mut arrow = ArrowSum::new(vec![row(0..1), row(1..4)]).unwrap();
    arrow.init_candidates(&mut board);
    (arrow, board)
}

fn bench_lockout_line_step(c: &mut Criterion) {
    let (lockout, board) = lockout_state();
    c.bench_function("lockout_line_step", |b| {
        b.iter_batched_ref(
            || hint::black_box(board.clone()),
            |board| {
                let result = lockout.step_logic(board, None, false);
                hint::black_box(result)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_arrow_sum_step(c: &mut Criterion) {
    let (arrow, board) = arrow_state();
    c.bench_function("arrow_sum_step", |b| {
        b.iter_batched_ref(
            || hint::black_box(board.clone()),
            |board| {
                let result = arrow.step_logic(board, None, false);
                hint::black_box(result)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_circle_arrangements(c: &mut Criterion) {
    c.bench_function("possible_circle_arrangements", |b| {
        b.iter(|| {
            hint::black_box(possible_circle_arrangements(
                hint::black_box(111),
                hint::black_box(2),
                hint::black_box(16),
            ))
        });
    });
}

criterion_group!(
    benches,
    bench_lockout_line_step,
    bench_arrow_sum_step,
    bench_circle_arrangements
);
criterion_main!(benches);
