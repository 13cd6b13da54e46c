//! Pieces module - shape matrices and naive rotation
//!
//! Every piece kind maps to a square boolean matrix: 4x4 for I, 2x2 for O and
//! 3x3 for the rest. Rotation is a plain 90° clockwise turn of that matrix
//! (transpose, then reverse each row) with no wall kicks.

use serde::{Deserialize, Serialize};

use crate::types::{Color, PieceKind, COLS};

/// Largest bounding box used by any piece.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square occupancy matrix of a piece.
///
/// Only the top-left `size x size` corner of `cells` is meaningful; the rest
/// is always `false`. Shapes are values: rotating yields a new `Shape`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of 0/1 values. Rows must form a square of side 2..=4.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let size = rows.len();
        if !(2..=MAX_SHAPE_SIZE).contains(&size) || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = v != 0;
            }
        }
        Some(Self {
            size: size as u8,
            cells,
        })
    }

    /// Side length of the bounding box
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the sub-cell at (x, y) is occupied
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.size as usize && y < self.size as usize && self.cells[y][x]
    }

    /// Iterate occupied sub-cells as (x, y) offsets from the anchor
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size as usize;
        (0..n).flat_map(move |y| {
            (0..n)
                .filter(move |&x| self.cells[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Rotate 90° clockwise: transpose, then reverse each row.
    pub fn rotated(&self) -> Self {
        let n = self.size as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in cells.iter_mut().enumerate().take(n) {
            for (c, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - c][r];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }
}

const fn padded(size: u8, rows: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Shape {
    let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    let mut y = 0;
    while y < MAX_SHAPE_SIZE {
        let mut x = 0;
        while x < MAX_SHAPE_SIZE {
            cells[y][x] = rows[y][x] != 0;
            x += 1;
        }
        y += 1;
    }
    Shape { size, cells }
}

/// Get the spawn shape for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => padded(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
        PieceKind::J => padded(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
        PieceKind::L => padded(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
        PieceKind::O => padded(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
        PieceKind::S => padded(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
        PieceKind::T => padded(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
        PieceKind::Z => padded(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]),
    }
}

/// Anchor position of a piece (top-left of its bounding box).
///
/// `y` may be negative while a piece is still entering the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Spawn position for a shape: horizontally centered on the top row
pub fn spawn_position(shape: &Shape) -> Position {
    Position::new((COLS / 2) as i8 - (shape.size() / 2) as i8, 0)
}

/// A falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    pub position: Position,
}

impl Tetromino {
    /// Create a new piece of `kind` at its spawn position
    pub fn new(kind: PieceKind) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            shape,
            color: kind.color(),
            position: spawn_position(&shape),
        }
    }

    /// Same piece at another position
    pub fn at(self, position: Position) -> Self {
        Self { position, ..self }
    }

    /// Same piece, same position, shape turned 90° clockwise
    pub fn rotated(self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..self
        }
    }

    /// Absolute (x, y) of every occupied sub-cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let Position { x, y } = self.position;
        self.shape.filled().map(move |(dx, dy)| (x + dx, y + dy))
    }
}
