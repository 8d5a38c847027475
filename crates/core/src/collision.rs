//! Placement checks and board merging
//!
//! Pure functions over a piece and a board. Cells above the top edge (y < 0)
//! are always vacant, which lets pieces spawn and rotate against the ceiling.

use crate::board::Board;
use crate::game_state::ActivePiece;

/// Whether `piece`, shifted by `offset`, overlaps a wall, the floor or a settled cell.
pub fn collides(piece: &ActivePiece, board: &Board, offset: (i16, i16)) -> bool {
    let (ox, oy) = offset;
    for (dx, dy) in piece.shape.occupied() {
        let x = piece.x + dx + ox;
        let y = piece.y + dy + oy;

        if x < 0 || x >= board.width() as i16 || y >= board.height() as i16 {
            return true;
        }

        if y >= 0 && board.is_occupied(x, y) {
            return true;
        }
    }
    false
}

/// Negation of [`collides`].
pub fn is_legal_placement(piece: &ActivePiece, board: &Board, offset: (i16, i16)) -> bool {
    !collides(piece, board, offset)
}

/// Write the piece's color into a copy of `board`.
///
/// Cells that fall outside the board are dropped.
pub fn merge_into_board(piece: &ActivePiece, board: &Board) -> Board {
    let mut merged = board.clone();
    for (dx, dy) in piece.shape.occupied() {
        merged.set(piece.x + dx, piece.y + dy, Some(piece.color));
    }
    merged
}
