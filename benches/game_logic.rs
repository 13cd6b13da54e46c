use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bricks::core::{GameState, Grid, Pacer, PieceGenerator};
use bricks::types::{PieceKind, COLS, INJECTED_COLOR};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    let mut pacer = Pacer::new();
    state.start();

    c.bench_function("pacer_tick_16ms", |b| {
        b.iter(|| {
            if state.game_over() {
                state.start();
            }
            pacer.advance(&mut state, black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..COLS as i8 {
                    grid.set(x, y, Some(INJECTED_COLOR));
                }
            }
            grid.clear_full_rows();
        })
    });
}

fn bench_drop_to_lock(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("drop_until_lock", |b| {
        b.iter(|| {
            if state.game_over() {
                state.start();
            }
            while !state.drop_piece().locked() {}
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = GameState::with_generator(PieceGenerator::scripted([PieceKind::T]));
    state.start();

    c.bench_function("try_move", |b| {
        b.iter(|| {
            state.move_right();
            state.move_left();
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.rotate();
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_drop_to_lock,
    bench_try_move,
    bench_rotate
);
criterion_main!(benches);
