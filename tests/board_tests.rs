//! Board tests - grid invariants through merge and line clear

use blockfall::core::{merge_into_board, ActivePiece, Board, SimpleRng};
use blockfall::types::{Cell, Color, PieceKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

const GREY: Color = Color::rgb(0x808080);

/// Random board with `full_rows` rows at the bottom completely filled.
fn random_board(rng: &mut SimpleRng, full_rows: u8) -> Board {
    let mut board = Board::default();
    let height = board.height() as i16;
    for y in 0..height {
        for x in 0..board.width() as i16 {
            let full = y >= height - full_rows as i16;
            if full || (y > 8 && rng.next_range(3) == 0) {
                board.set(x, y, Some(GREY));
            }
        }
    }
    board
}

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.width(), DEFAULT_BOARD_WIDTH);
    assert_eq!(board.height(), DEFAULT_BOARD_HEIGHT);

    for y in 0..DEFAULT_BOARD_HEIGHT as i16 {
        for x in 0..DEFAULT_BOARD_WIDTH as i16 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {})", x, y);
        }
    }
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::default();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(DEFAULT_BOARD_WIDTH as i16, 0), None);
    assert_eq!(board.get(0, DEFAULT_BOARD_HEIGHT as i16), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::default();

    assert!(board.set(5, 10, Some(GREY)));
    assert_eq!(board.get(5, 10), Some(Some(GREY)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(-1, 0, Some(GREY)));
}

#[test]
fn test_merge_then_clear_keeps_dimensions() {
    let mut rng = SimpleRng::new(2024);

    for full_rows in 0..5u8 {
        for kind in PieceKind::ALL {
            let board = random_board(&mut rng, full_rows);
            let mut piece = ActivePiece::spawn(kind, board.width());
            piece.y = rng.next_range(6) as i16 - 2;

            let merged = merge_into_board(&piece, &board);
            let (cleared, lines) = merged.clear_full_lines();

            assert_eq!(cleared.width(), DEFAULT_BOARD_WIDTH);
            assert_eq!(cleared.height(), DEFAULT_BOARD_HEIGHT);
            assert_eq!(cleared.rows().count(), DEFAULT_BOARD_HEIGHT as usize);
            assert!(lines >= full_rows as u32);
            assert!((0..cleared.height() as usize).all(|y| !cleared.is_row_full(y)));
        }
    }
}

#[test]
fn test_clear_without_full_rows_is_identity() {
    let mut rng = SimpleRng::new(11);
    for _ in 0..20 {
        let mut board = random_board(&mut rng, 0);
        // Punch a hole in every row so none can be full.
        for y in 0..board.height() as i16 {
            board.set(rng.next_range(10) as i16, y, None);
        }

        let (cleared, lines) = board.clear_full_lines();
        assert_eq!(lines, 0);
        assert_eq!(cleared, board);
    }
}

#[test]
fn test_clear_removes_rows_simultaneously() {
    let marker = Color::rgb(0x123456);
    let full: Vec<Cell> = vec![Some(GREY); 5];
    let mut marked: Vec<Cell> = vec![None; 5];
    marked[2] = Some(marker);

    let board = Board::from_rows(vec![
        vec![None; 5],
        marked.clone(),
        full.clone(),
        vec![None; 5],
        full.clone(),
        full,
    ])
    .unwrap();

    let (cleared, lines) = board.clear_full_lines();
    assert_eq!(lines, 3);
    assert_eq!(cleared.height(), 6);
    // Two survivors keep their order at the bottom.
    assert_eq!(cleared.row(4).unwrap(), marked.as_slice());
    assert_eq!(cleared.row(5).unwrap(), vec![None; 5].as_slice());
    assert_eq!(cleared.filled_count(), 1);
    // The source board is untouched.
    assert_eq!(board.filled_count(), 16);
}
