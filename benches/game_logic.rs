use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{
    collides, merge_into_board, rotate_shape, spawn_shape, ActivePiece, Board, GameState,
};
use blockfall::types::{Color, Command, Direction, PieceKind};

const GREY: Color = Color::rgb(0x808080);

fn bench_session(c: &mut Criterion) {
    c.bench_function("hard_drop_session", |b| {
        b.iter(|| {
            let mut state = GameState::new(black_box(12345));
            state.start_game();
            while !state.game_over() {
                state.apply(Command::HardDrop);
            }
            state.score()
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut board = Board::default();
    // Fill bottom 4 rows
    for y in 16..20 {
        for x in 0..10 {
            board.set(x, y, Some(GREY));
        }
    }

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| black_box(&board).clear_full_lines())
    });
}

fn bench_collision(c: &mut Criterion) {
    let board = Board::default();
    let piece = ActivePiece::spawn(PieceKind::T, 10);

    c.bench_function("collides", |b| {
        b.iter(|| collides(black_box(&piece), black_box(&board), (0, 1)))
    });
}

fn bench_merge(c: &mut Criterion) {
    let board = Board::default();
    let piece = ActivePiece::spawn(PieceKind::L, 10).shifted(0, 10);

    c.bench_function("merge_into_board", |b| {
        b.iter(|| merge_into_board(black_box(&piece), black_box(&board)))
    });
}

fn bench_attempt_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start_game();

    c.bench_function("attempt_move", |b| {
        b.iter(|| {
            state.attempt_move(Direction::Right);
            state.attempt_move(Direction::Left)
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let shape = spawn_shape(PieceKind::J);

    c.bench_function("rotate_shape", |b| b.iter(|| rotate_shape(black_box(&shape))));
}

criterion_group!(
    benches,
    bench_session,
    bench_line_clear,
    bench_collision,
    bench_merge,
    bench_attempt_move,
    bench_rotate
);
criterion_main!(benches);
