//! Integration tests for session scenarios

use blockfall::core::{collides, ActivePiece, Board, GameState, ScriptedPieces};
use blockfall::types::{Color, Command, Direction, MoveOutcome, Phase, PieceKind};

const GREY: Color = Color::rgb(0x808080);

fn scripted(kinds: &[PieceKind]) -> GameState<ScriptedPieces> {
    GameState::with_source(10, 20, ScriptedPieces::new(kinds.to_vec()))
}

fn fill_row_except(board: &mut Board, y: i16, gaps: &[i16]) {
    for x in 0..board.width() as i16 {
        if !gaps.contains(&x) {
            board.set(x, y, Some(GREY));
        }
    }
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.phase(), Phase::Idle);
    assert!(!state.is_playing());
    assert!(state.active().is_none());

    state.apply(Command::StartGame);
    assert_eq!(state.phase(), Phase::Running);
    assert!(state.is_playing());
    assert!(state.active().is_some());
    assert!(state.next_piece().is_some());
    assert!(!state.game_over());
    assert!(!state.paused());
}

#[test]
fn test_move_down_until_lock() {
    let mut state = scripted(&[PieceKind::O, PieceKind::T]);
    state.start_game();

    let active = state.active().unwrap();
    assert_eq!((active.x, active.y), (4, 0));

    let mut moves = 0;
    loop {
        match state.attempt_move(Direction::Down) {
            MoveOutcome::Moved => moves += 1,
            MoveOutcome::Locked => break,
            MoveOutcome::Rejected => panic!("down was rejected while running"),
        }
    }
    assert_eq!(moves, 18);

    let board = state.board();
    assert_eq!(board.height(), 20);
    assert_eq!(board.width(), 10);
    assert_eq!(board.filled_count(), 4);
    assert!(board.is_occupied(4, 19) && board.is_occupied(5, 18));

    // Buffered T became active and the buffer was refilled.
    assert_eq!(state.active().unwrap().kind, PieceKind::T);
    assert_eq!(state.next_piece(), Some(PieceKind::O));
    // Soft drops score nothing.
    assert_eq!(state.score(), 0);
}

#[test]
fn test_hard_drop_double_clear() {
    let mut board = Board::default();
    fill_row_except(&mut board, 18, &[4, 5]);
    fill_row_except(&mut board, 19, &[4, 5]);

    let mut state = scripted(&[PieceKind::O]);
    state.start_game_on(board);
    state.apply(Command::HardDrop);

    // 18 rows descended at 2 points, then 2 lines at level 1.
    assert_eq!(state.score(), 36 + 200);
    assert_eq!(state.lines(), 2);
    assert_eq!(state.board().filled_count(), 0);

    let event = state.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 2);
    assert_eq!(event.line_clear_score, 200);
    assert!(!event.level_up);
}

#[test]
fn test_spawn_blocked_ends_session() {
    let mut board = Board::default();
    fill_row_except(&mut board, 0, &[0]);
    fill_row_except(&mut board, 1, &[0]);

    let o = ActivePiece::spawn(PieceKind::O, 10);
    assert!(collides(&o, &board, (0, 0)));

    let mut state = scripted(&[PieceKind::O]);
    state.start_game_on(board);
    assert_eq!(state.phase(), Phase::GameOver);
    assert!(state.game_over());
    assert!(!state.is_playing());
    assert!(state.active().is_none());

    // Only a new start leaves game over.
    for command in [
        Command::Move(Direction::Down),
        Command::Rotate,
        Command::HardDrop,
        Command::TogglePause,
    ] {
        assert!(!state.apply(command), "{:?} accepted after game over", command);
    }
    assert_eq!(state.tick(), MoveOutcome::Rejected);

    state.apply(Command::StartGame);
    assert_eq!(state.phase(), Phase::Running);
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_toggle_pause_twice_restores_state() {
    let mut state = GameState::new(777);
    state.start_game();
    state.apply(Command::Move(Direction::Down));
    let before = state.snapshot();

    assert!(state.toggle_pause());
    assert_eq!(state.phase(), Phase::Paused);
    assert!(state.is_playing());
    assert!(state.toggle_pause());

    assert_eq!(state.snapshot(), before);
}

#[test]
fn test_commands_ignored_while_paused() {
    let mut state = GameState::new(5);
    state.start_game();
    state.toggle_pause();
    let before = state.snapshot();

    for command in [
        Command::Move(Direction::Left),
        Command::Move(Direction::Down),
        Command::Rotate,
        Command::HardDrop,
    ] {
        assert!(!state.apply(command));
    }
    assert_eq!(state.tick(), MoveOutcome::Rejected);
    assert_eq!(state.snapshot(), before);
}

#[test]
fn test_rotation_against_wall_is_rejected() {
    let mut state = scripted(&[PieceKind::I]);
    state.start_game();
    assert!(state.rotate());

    // Vertical I hugging the right wall cannot turn back to horizontal.
    while state.attempt_move(Direction::Right) == MoveOutcome::Moved {}
    let pinned = state.active().unwrap();
    assert_eq!(pinned.x, 9);

    assert!(!state.rotate());
    assert_eq!(state.active().unwrap(), pinned);
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        Command::StartGame,
        Command::Move(Direction::Left),
        Command::Rotate,
        Command::HardDrop,
        Command::Move(Direction::Right),
        Command::HardDrop,
        Command::HardDrop,
    ];

    let mut a = GameState::new(4242);
    let mut b = GameState::new(4242);
    for command in script {
        a.apply(command);
        b.apply(command);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
