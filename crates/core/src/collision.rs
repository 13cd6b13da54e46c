//! Collision predicate shared by every movement, rotation and spawn check.

use crate::grid::Grid;
use crate::pieces::{Position, Tetromino};
use crate::types::{COLS, ROWS};

/// Would `piece`, placed at `position`, overlap a wall, the floor or a filled cell?
///
/// Sub-cells above the grid (negative rows) only collide with the side walls,
/// which lets pieces enter partially above the visible field.
pub fn collides(piece: &Tetromino, grid: &Grid, position: Position) -> bool {
    piece.shape.filled().any(|(dx, dy)| {
        let x = position.x + dx;
        let y = position.y + dy;
        x < 0 || x >= COLS as i8 || y >= ROWS as i8 || (y >= 0 && grid.is_occupied(x, y))
    })
}
