//! Collision and placement rules
//!
//! All checks work on candidate copies of the active piece; the live piece is
//! replaced only after a candidate is known to be legal.

use log::trace;

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{Direction, ShapeKind, GRID_HEIGHT, GRID_WIDTH, ROTATION_NUDGE_LIMIT};

/// A candidate is legal when it is inside the grid and overlaps nothing.
pub fn can_place(board: &Board, piece: &Piece) -> bool {
    board.fits(piece)
}

/// Whether `piece` could take one step in `direction`.
///
/// For [`Direction::Rotate`] this is the raw rotation, before any correction.
pub fn can_move(board: &Board, piece: &Piece, direction: Direction) -> bool {
    can_place(board, &piece.moved(direction))
}

/// Candidate after one step, if legal.
pub fn try_move(board: &Board, piece: &Piece, direction: Direction) -> Option<Piece> {
    let candidate = piece.moved(direction);
    if can_place(board, &candidate) {
        Some(candidate)
    } else {
        trace!("{:?} {:?} rejected", piece.kind(), direction);
        None
    }
}

/// Rotate clockwise and nudge the result back onto the board.
///
/// Each pass nudges right on left overflow, left on right overflow, down on
/// top overflow and up on bottom overflow. A pass with no overflow nudges up
/// if the piece overlaps locked blocks. Returns `None` when the piece is still
/// illegal after [`ROTATION_NUDGE_LIMIT`] passes.
pub fn try_rotate(board: &Board, piece: &Piece) -> Option<Piece> {
    correct_rotation(board, piece.rotated())
}

/// Nudge an already rotated candidate until it is legal.
pub fn correct_rotation(board: &Board, mut candidate: Piece) -> Option<Piece> {
    for _ in 0..ROTATION_NUDGE_LIMIT {
        let mut nudged = false;
        if candidate.left() < 0 {
            candidate.translate(Direction::Right);
            nudged = true;
        }
        if candidate.right() >= GRID_WIDTH as i8 {
            candidate.translate(Direction::Left);
            nudged = true;
        }
        if candidate.top() < 0 {
            candidate.translate(Direction::Down);
            nudged = true;
        }
        if candidate.bottom() >= GRID_HEIGHT as i8 {
            candidate.translate(Direction::Up);
            nudged = true;
        }
        if !nudged {
            if !board.overlaps(&candidate) {
                return Some(candidate);
            }
            candidate.translate(Direction::Up);
        }
    }

    if can_place(board, &candidate) {
        Some(candidate)
    } else {
        trace!("rotation of {:?} rejected", candidate.kind());
        None
    }
}

/// Spawn placement: horizontally centered, bounding box top on row 0.
pub fn spawn_piece(kind: ShapeKind) -> Piece {
    let piece = Piece::new(kind);
    let x = (GRID_WIDTH as i8 - piece.size() as i8) / 2;
    let y = -(piece.area().top as i8);
    piece.at(x, y)
}

/// Drop distance until the piece rests on something.
pub fn drop_distance(board: &Board, piece: &Piece) -> u8 {
    let mut distance = 0u8;
    let mut probe = *piece;
    while can_move(board, &probe, Direction::Down) {
        probe.translate(Direction::Down);
        distance += 1;
    }
    distance
}
