//! Piece tests - catalog shapes, rotation and translation

use blockfall::core::piece::{bounding_area, shape_def};
use blockfall::core::Piece;
use blockfall::types::{Direction, ShapeKind};

#[test]
fn test_four_rotations_restore_every_shape() {
    for kind in ShapeKind::ALL {
        let start = Piece::new(kind);
        let mut piece = start;
        for _ in 0..4 {
            piece.rotate();
        }
        assert_eq!(piece, start, "{:?}", kind);
    }
}

#[test]
fn test_rotation_keeps_four_blocks() {
    for kind in ShapeKind::ALL {
        let mut piece = Piece::new(kind);
        for _ in 0..4 {
            piece.rotate();
            assert_eq!(piece.blocks().count(), 4);
            assert_eq!(bounding_area(piece.cells()), Some(piece.area()));
            let size = shape_def(kind).size;
            assert!(piece.area().right < size && piece.area().bottom < size);
        }
    }
}

#[test]
fn test_square_never_changes() {
    let square = Piece::new(ShapeKind::Square).at(4, 7);
    assert_eq!(square.rotated(), square);
}

#[test]
fn test_skew_rotation() {
    // .##      .#.
    // ##.  ->  .##
    // ...      ..#
    let piece = Piece::new(ShapeKind::StraightSkew).rotated();
    let blocks: Vec<_> = piece.blocks().collect();
    assert_eq!(blocks, vec![(1, 0), (1, 1), (2, 1), (2, 2)]);
}

#[test]
fn test_translation_moves_blocks_only() {
    let piece = Piece::new(ShapeKind::InvertedL).at(2, 3);
    let left = piece.moved(Direction::Left);
    let down = piece.moved(Direction::Down);

    assert_eq!(left.left(), piece.left() - 1);
    assert_eq!(down.top(), piece.top() + 1);
    assert_eq!(left.area(), piece.area());

    let before: Vec<_> = piece.blocks().map(|(x, y)| (x - 1, y)).collect();
    let after: Vec<_> = left.blocks().collect();
    assert_eq!(before, after);
}

#[test]
fn test_colors_follow_shape() {
    for kind in ShapeKind::ALL {
        assert_eq!(Piece::new(kind).color(), kind.color());
    }
}
