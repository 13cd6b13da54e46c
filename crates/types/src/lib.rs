//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no engine logic, so they can be shared by the
//! simulation core, the session layer, input mapping and any render consumer.
//!
//! # Grid Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Spawn position**: horizontally centered, `y = 0`
//!
//! # Speed Curve
//!
//! The automatic drop interval decays exponentially with the level and is
//! floored at a minimum:
//!
//! ```text
//! interval_ms = max(MIN_SPEED_MS, INITIAL_SPEED_MS * SPEED_INCREMENT^(level - 1))
//! ```
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_SPEED_MS` | 800 | Drop interval at level 1 |
//! | `MIN_SPEED_MS` | 100 | Fastest drop interval |
//! | `SPEED_INCREMENT` | 0.95 | Per-level multiplier |
//! | `DEFAULT_TICK_MS` | 16 | Tick cadence used by the headless runner |
//!
//! # Examples
//!
//! ```
//! use bricks_types::{Intent, PieceKind, COLS, ROWS};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! let intent = Intent::from_str("moveLeft").unwrap();
//! assert_eq!(intent, Intent::MoveLeft);
//!
//! assert_eq!(COLS, 10);
//! assert_eq!(ROWS, 20);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid width in cells (10 columns)
pub const COLS: u8 = 10;

/// Grid height in cells (20 rows)
pub const ROWS: u8 = 20;

/// Drop interval at level 1 (milliseconds)
pub const INITIAL_SPEED_MS: u32 = 800;

/// Floor of the drop interval (milliseconds)
pub const MIN_SPEED_MS: u32 = 100;

/// Per-level multiplier applied to the drop interval
pub const SPEED_INCREMENT: f64 = 0.95;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Base points for a single cleared line
pub const LINE_CLEAR_BASE: u32 = 100;

/// Stack height (in rows) above which a high-stack warning is raised
pub const HIGH_STACK_ROWS: u8 = 14;

/// Tick cadence for the headless runner (16ms ≈ 60 FPS)
pub const DEFAULT_TICK_MS: u32 = 16;

/// Minimum spacing between forwarded line-clear notifications
pub const LINE_CLEAR_COOLDOWN_MS: u64 = 4000;

/// Color used for occupied cells of an injected grid.
pub const INJECTED_COLOR: Color = Color::rgb(0x55, 0x55, 0x55);

/// A display color token stored in grid cells.
///
/// The engine treats colors as opaque; they only travel to render consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Color)`: Occupied cell with its display color
pub type Cell = Option<Color>;

/// The seven piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green, S-shaped
/// - **T**: Purple, T-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use bricks_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Display color of this kind.
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::rgb(0x00, 0xf0, 0xf0),
            PieceKind::J => Color::rgb(0x00, 0x00, 0xf0),
            PieceKind::L => Color::rgb(0xf0, 0xa0, 0x00),
            PieceKind::O => Color::rgb(0xf0, 0xf0, 0x00),
            PieceKind::S => Color::rgb(0x00, 0xf0, 0x00),
            PieceKind::T => Color::rgb(0xa0, 0x00, 0xf0),
            PieceKind::Z => Color::rgb(0xf0, 0x00, 0x00),
        }
    }
}

/// Discrete player intents delivered by an input source
///
/// At most one intent is applied per call into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (locks it when it cannot fall)
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Toggle pause state
    TogglePause,
}

impl Intent {
    /// Parse intent from string (case-insensitive, short aliases accepted)
    ///
    /// # Examples
    ///
    /// ```
    /// use bricks_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("drop"), Some(Intent::SoftDrop));
    /// assert_eq!(Intent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" | "left" => Some(Intent::MoveLeft),
            "moveright" | "right" => Some(Intent::MoveRight),
            "softdrop" | "drop" | "down" => Some(Intent::SoftDrop),
            "rotate" | "up" => Some(Intent::Rotate),
            "togglepause" | "pause" => Some(Intent::TogglePause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::Rotate => "rotate",
            Intent::TogglePause => "togglePause",
        }
    }
}

/// Kinds of domain events emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEventKind {
    /// One to three lines cleared by a single lock
    LineClear,
    /// Exactly four lines cleared by a single lock
    Tetris,
    /// The freshly spawned piece was blocked
    GameOver,
    /// The stack rose above the warning threshold (advisory only)
    HighStack,
}

impl GameEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEventKind::LineClear => "LINE_CLEAR",
            GameEventKind::Tetris => "TETRIS",
            GameEventKind::GameOver => "GAME_OVER",
            GameEventKind::HighStack => "HIGH_STACK",
        }
    }
}

/// Row-major copy of every grid cell.
pub type GridCells = [[Cell; COLS as usize]; ROWS as usize];

/// Domain event handed to notification consumers.
///
/// Carries copies of the relevant scalars only; `grid` is populated for
/// high-stack warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: GameEventKind,
    pub score: u32,
    /// Lines cleared by the lock that produced this event.
    pub lines_cleared: u32,
    pub level: u32,
    /// Session clock (milliseconds of delivered ticks) when the event left the session.
    pub at_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Box<GridCells>>,
}

impl GameEvent {
    pub fn new(kind: GameEventKind, score: u32, lines_cleared: u32, level: u32) -> Self {
        Self {
            kind,
            score,
            lines_cleared,
            level,
            at_ms: 0,
            grid: None,
        }
    }

    pub fn with_grid(mut self, grid: GridCells) -> Self {
        self.grid = Some(Box::new(grid));
        self
    }
}
