use criterion::{black_box, criterion_group, criterion_main, Criterion};

use blockfall::core::{Board, GameState};
use blockfall::types::{ColorId, Command, PieceKind, BOARD_COLS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("gravity_tick", |b| {
        b.iter(|| {
            if !state.tick() {
                state.apply(Command::Restart);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for row in 16..20 {
                for col in 0..BOARD_COLS as i8 {
                    board.set(row, col, Some(ColorId::Red));
                }
            }
            black_box(board.clear_full_rows())
        })
    });
}

fn bench_rotation(c: &mut Criterion) {
    let shape = PieceKind::S.template();

    c.bench_function("rotate_cw", |b| b.iter(|| black_box(shape).rotated_cw()));
}

fn bench_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            state.apply(black_box(Command::MoveLeft));
            state.apply(black_box(Command::MoveRight));
        })
    });
}

criterion_group!(benches, bench_tick, bench_line_clear, bench_rotation, bench_move);
criterion_main!(benches);
