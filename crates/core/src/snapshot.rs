use serde::{Deserialize, Serialize};

use crate::game_state::Phase;
use crate::pieces::{Shape, Tetromino};
use crate::types::{Color, GridCells, PieceKind, COLS, ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for PieceSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            color: value.color,
            x: value.position.x,
            y: value.position.y,
        }
    }
}

/// Read-only copy of everything a render consumer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: GridCells,
    pub current: Option<PieceSnapshot>,
    pub next: PieceSnapshot,
    pub phase: Phase,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Count of filled grid cells (the falling piece is not included)
    pub fn filled_cells(&self) -> usize {
        self.grid.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[None; COLS as usize]; ROWS as usize],
            current: None,
            next: Tetromino::new(PieceKind::I).into(),
            phase: Phase::NotStarted,
            started: false,
            paused: false,
            game_over: false,
            score: 0,
            lines: 0,
            level: 1,
        }
    }
}
