//! Piece module - shape catalog and per-instance rotation state
//!
//! Every piece carries a 4x4 occupancy grid. Only the leading `size`x`size`
//! sub-square is ever rotated; the rest of the grid stays empty.
//! Grids are stored row-major: `cells[y][x]`, row 0 at the top.

use crate::types::{Direction, Rgb, ShapeKind, PIECE_GRID};

/// Occupancy grid of a piece, `cells[y][x]`.
pub type Occupancy = [[bool; PIECE_GRID]; PIECE_GRID];

/// Bounding box of the occupied cells, in local grid coordinates (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Area {
    pub left: u8,
    pub top: u8,
    pub right: u8,
    pub bottom: u8,
}

/// Immutable catalog entry for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    pub kind: ShapeKind,
    /// Side of the rotated sub-square (3 or 4).
    pub size: u8,
    /// Square pieces look the same after any turn; rotating them is a no-op.
    pub rotates: bool,
    pub pattern: Occupancy,
}

const fn pattern(blocks: [(usize, usize); 4]) -> Occupancy {
    let mut cells = [[false; PIECE_GRID]; PIECE_GRID];
    let mut i = 0;
    while i < blocks.len() {
        let (x, y) = blocks[i];
        cells[y][x] = true;
        i += 1;
    }
    cells
}

/// Shape catalog, indexed by [`ShapeKind::index`].
pub static SHAPES: [ShapeDef; 7] = [
    // ....
    // ####
    ShapeDef {
        kind: ShapeKind::Line,
        size: 4,
        rotates: true,
        pattern: pattern([(0, 1), (1, 1), (2, 1), (3, 1)]),
    },
    // ..#
    // ###
    ShapeDef {
        kind: ShapeKind::StraightL,
        size: 3,
        rotates: true,
        pattern: pattern([(2, 0), (0, 1), (1, 1), (2, 1)]),
    },
    // #..
    // ###
    ShapeDef {
        kind: ShapeKind::InvertedL,
        size: 3,
        rotates: true,
        pattern: pattern([(0, 0), (0, 1), (1, 1), (2, 1)]),
    },
    // .##
    // .##
    ShapeDef {
        kind: ShapeKind::Square,
        size: 3,
        rotates: false,
        pattern: pattern([(1, 0), (2, 0), (1, 1), (2, 1)]),
    },
    // .##
    // ##.
    ShapeDef {
        kind: ShapeKind::StraightSkew,
        size: 3,
        rotates: true,
        pattern: pattern([(1, 0), (2, 0), (0, 1), (1, 1)]),
    },
    // ##.
    // .##
    ShapeDef {
        kind: ShapeKind::InvertedSkew,
        size: 3,
        rotates: true,
        pattern: pattern([(0, 0), (1, 0), (1, 1), (2, 1)]),
    },
    // .#.
    // ###
    ShapeDef {
        kind: ShapeKind::Triangle,
        size: 3,
        rotates: true,
        pattern: pattern([(1, 0), (0, 1), (1, 1), (2, 1)]),
    },
];

/// Catalog entry for a shape.
pub fn shape_def(kind: ShapeKind) -> &'static ShapeDef {
    &SHAPES[kind.index()]
}

/// Rotate the leading `size`x`size` sub-square 90 degrees clockwise in place.
///
/// Works layer by layer, cycling four cells at a time
/// (left -> top -> right -> bottom -> left).
pub fn rotate_cw(cells: &mut Occupancy, size: usize) {
    debug_assert!(size <= PIECE_GRID);
    let last = size - 1;
    for layer in 0..size / 2 {
        for i in layer..last - layer {
            let top = cells[layer][i];
            cells[layer][i] = cells[last - i][layer];
            cells[last - i][layer] = cells[last - layer][last - i];
            cells[last - layer][last - i] = cells[i][last - layer];
            cells[i][last - layer] = top;
        }
    }
}

/// Bounding box of an occupancy grid, or `None` when no cell is occupied.
pub fn bounding_area(cells: &Occupancy) -> Option<Area> {
    let mut area: Option<Area> = None;
    for (y, row) in cells.iter().enumerate() {
        for (x, &filled) in row.iter().enumerate() {
            if !filled {
                continue;
            }
            let (x, y) = (x as u8, y as u8);
            area = Some(match area {
                None => Area {
                    left: x,
                    top: y,
                    right: x,
                    bottom: y,
                },
                Some(a) => Area {
                    left: a.left.min(x),
                    top: a.top.min(y),
                    right: a.right.max(x),
                    bottom: a.bottom.max(y),
                },
            });
        }
    }
    area
}

/// A falling piece: a shape, its current occupancy and its board position.
///
/// Pieces are small `Copy` values; trial moves build a candidate with
/// [`Piece::moved`] and leave the source piece untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: ShapeKind,
    cells: Occupancy,
    area: Area,
    /// Column of the grid's top-left corner on the board.
    pub x: i8,
    /// Row of the grid's top-left corner on the board.
    pub y: i8,
}

impl Piece {
    /// Create a piece with the canonical pattern at origin (0, 0).
    pub fn new(kind: ShapeKind) -> Self {
        let def = shape_def(kind);
        let area = bounding_area(&def.pattern)
            .unwrap_or_else(|| panic!("shape {:?} has an empty pattern", kind));
        Self {
            kind,
            cells: def.pattern,
            area,
            x: 0,
            y: 0,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    pub fn size(&self) -> u8 {
        shape_def(self.kind).size
    }

    pub fn cells(&self) -> &Occupancy {
        &self.cells
    }

    pub fn area(&self) -> Area {
        self.area
    }

    /// Leftmost occupied board column.
    pub fn left(&self) -> i8 {
        self.x + self.area.left as i8
    }

    /// Rightmost occupied board column.
    pub fn right(&self) -> i8 {
        self.x + self.area.right as i8
    }

    /// Topmost occupied board row.
    pub fn top(&self) -> i8 {
        self.y + self.area.top as i8
    }

    /// Bottommost occupied board row.
    pub fn bottom(&self) -> i8 {
        self.y + self.area.bottom as i8
    }

    /// Board coordinates `(x, y)` of every occupied cell.
    pub fn blocks(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.cells.iter().enumerate().flat_map(move |(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(dx, _)| (self.x + dx as i8, self.y + dy as i8))
        })
    }

    /// Rotate clockwise in place and recompute the bounding box.
    pub fn rotate(&mut self) {
        let def = shape_def(self.kind);
        if !def.rotates {
            return;
        }
        rotate_cw(&mut self.cells, def.size as usize);
        // Rotation permutes cells, so the grid can never become empty.
        if let Some(area) = bounding_area(&self.cells) {
            self.area = area;
        }
    }

    /// Shift by one cell. Grid and bounding box are untouched.
    pub fn translate(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.x -= 1,
            Direction::Right => self.x += 1,
            Direction::Down => self.y += 1,
            Direction::Up => self.y -= 1,
            Direction::Rotate => self.rotate(),
        }
    }

    /// Candidate copy with `direction` applied.
    pub fn moved(&self, direction: Direction) -> Self {
        let mut candidate = *self;
        candidate.translate(direction);
        candidate
    }

    /// Candidate copy rotated clockwise.
    pub fn rotated(&self) -> Self {
        self.moved(Direction::Rotate)
    }

    /// Same piece placed with its grid corner at `(x, y)`.
    pub fn at(mut self, x: i8, y: i8) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(cells: &Occupancy, size: usize) -> Vec<String> {
        cells[..size]
            .iter()
            .map(|row| {
                row[..size]
                    .iter()
                    .map(|&c| if c { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_catalog_order_matches_kind_index() {
        for kind in ShapeKind::ALL {
            assert_eq!(shape_def(kind).kind, kind);
        }
    }

    #[test]
    fn test_every_pattern_has_four_blocks_inside_size() {
        for def in SHAPES.iter() {
            let piece = Piece::new(def.kind);
            assert_eq!(piece.blocks().count(), 4, "{:?}", def.kind);
            let area = piece.area();
            assert!(area.right < def.size && area.bottom < def.size);
        }
    }

    #[test]
    fn test_rotate_triangle_clockwise() {
        let mut piece = Piece::new(ShapeKind::Triangle);
        assert_eq!(rows(piece.cells(), 3), [".#.", "###", "..."]);

        piece.rotate();
        assert_eq!(rows(piece.cells(), 3), [".#.", ".##", ".#."]);
        assert_eq!(
            piece.area(),
            Area {
                left: 1,
                top: 0,
                right: 2,
                bottom: 2
            }
        );
    }

    #[test]
    fn test_rotate_line_uses_full_grid() {
        let mut piece = Piece::new(ShapeKind::Line);
        piece.rotate();
        assert_eq!(rows(piece.cells(), 4), ["..#.", "..#.", "..#.", "..#."]);
        assert_eq!(piece.size(), 4);
    }

    #[test]
    fn test_square_rotation_is_noop() {
        let mut piece = Piece::new(ShapeKind::Square);
        let before = piece;
        piece.rotate();
        assert_eq!(piece, before);
    }

    #[test]
    fn test_translate_keeps_grid_and_area() {
        let piece = Piece::new(ShapeKind::StraightSkew);
        let moved = piece.moved(Direction::Right).moved(Direction::Down);
        assert_eq!((moved.x, moved.y), (1, 1));
        assert_eq!(moved.cells(), piece.cells());
        assert_eq!(moved.area(), piece.area());
        assert_eq!(moved.moved(Direction::Up).moved(Direction::Left), piece);
    }

    #[test]
    fn test_bounding_area_empty_grid() {
        assert_eq!(bounding_area(&[[false; PIECE_GRID]; PIECE_GRID]), None);
    }
}
