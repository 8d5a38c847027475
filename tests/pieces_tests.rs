//! Piece catalog tests - shapes, rotation and spawn placement

use blockfall::core::{definition, rotate_shape, spawn_shape, ActivePiece, Shape};
use blockfall::types::PieceKind;

#[test]
fn test_rotation_has_order_four() {
    for kind in PieceKind::ALL {
        let original = spawn_shape(kind);
        let mut shape = original;
        for _ in 0..4 {
            shape = rotate_shape(&shape);
        }
        assert_eq!(shape, original, "{:?} should return after four turns", kind);
    }
}

#[test]
fn test_symmetric_shapes_return_early() {
    let o = spawn_shape(PieceKind::O);
    assert_eq!(rotate_shape(&o), o);

    for kind in [PieceKind::I, PieceKind::S, PieceKind::Z] {
        let shape = spawn_shape(kind);
        let half = rotate_shape(&rotate_shape(&shape));
        assert_eq!(half, shape, "{:?} repeats after two turns", kind);
    }

    let t = spawn_shape(PieceKind::T);
    assert_ne!(rotate_shape(&rotate_shape(&t)), t);
}

#[test]
fn test_rotation_is_transpose_then_reverse() {
    let t = spawn_shape(PieceKind::T);
    let expected = Shape::from_rows(&[&[1, 0], &[1, 1], &[1, 0]]).unwrap();
    assert_eq!(rotate_shape(&t), expected);

    let i = spawn_shape(PieceKind::I);
    let vertical = rotate_shape(&i);
    assert_eq!((vertical.rows(), vertical.cols()), (4, 1));
}

#[test]
fn test_rotation_leaves_catalog_untouched() {
    let before = *definition(PieceKind::L);
    let _ = rotate_shape(&before.shape);
    assert_eq!(*definition(PieceKind::L), before);
}

#[test]
fn test_every_shape_has_four_cells() {
    for kind in PieceKind::ALL {
        assert_eq!(spawn_shape(kind).occupied().len(), 4, "{:?}", kind);
    }
}

#[test]
fn test_spawn_is_centered() {
    for kind in PieceKind::ALL {
        let piece = ActivePiece::spawn(kind, 10);
        assert_eq!((piece.x, piece.y), (4, 0), "{:?}", kind);
        assert_eq!(piece.color, definition(kind).color);
    }
    assert_eq!(ActivePiece::spawn(PieceKind::O, 7).x, 2);
}
