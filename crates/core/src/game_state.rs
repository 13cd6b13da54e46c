//! Game state module - the transition engine
//!
//! Owns the grid, the falling piece, the preview piece, the piece source and
//! the score counters. Every operation is a plain method that returns whether
//! it changed anything; events produced along the way are queued and drained
//! with [`GameState::take_events`].

use serde::{Deserialize, Serialize};

use crate::collision::collides;
use crate::grid::Grid;
use crate::pieces::Tetromino;
use crate::rng::PieceGenerator;
use crate::scoring::{calculate_level, calculate_line_score, get_drop_interval_ms};
use crate::snapshot::GameSnapshot;
use crate::types::{GameEvent, GameEventKind, HIGH_STACK_ROWS, ROWS};

/// Lifecycle phase. `started`, `paused` and `game_over` are derived from it,
/// so `paused && game_over` can never be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Outcome of a single downward step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Not running, or no piece in play
    Ignored,
    /// The piece moved down one row
    Fell,
    /// The piece locked and the next one spawned
    Locked { lines_cleared: u32 },
    /// The piece locked and the next one could not spawn
    GameOver { lines_cleared: u32 },
}

impl DropOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    pub fn locked(&self) -> bool {
        matches!(self, Self::Locked { .. } | Self::GameOver { .. })
    }

    pub fn lines_cleared(&self) -> u32 {
        match *self {
            Self::Locked { lines_cleared } | Self::GameOver { lines_cleared } => lines_cleared,
            _ => 0,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    current: Option<Tetromino>,
    next: Tetromino,
    generator: PieceGenerator,
    phase: Phase,
    score: u32,
    lines: u32,
    level: u32,
    /// Events raised since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_generator(PieceGenerator::new(seed))
    }

    /// Create a new game drawing pieces from `generator`
    pub fn with_generator(mut generator: PieceGenerator) -> Self {
        let next = generator.next_piece();
        Self {
            grid: Grid::new(),
            current: None,
            next,
            generator,
            phase: Phase::NotStarted,
            score: 0,
            lines: 0,
            level: 1,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::Paused)
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Running, unpaused and not over
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> Option<&Tetromino> {
        self.current.as_ref()
    }

    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Automatic drop interval for the current level
    pub fn drop_interval_ms(&self) -> f64 {
        get_drop_interval_ms(self.level)
    }

    /// Start, resume or restart.
    ///
    /// From game over this is a full restart on an empty grid. Otherwise the
    /// game becomes running and, if no piece is in play, the preview piece is
    /// promoted.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Running => false,
            Phase::GameOver => {
                self.grid.clear();
                self.reset_counters();
                self.current = Some(self.generator.next_piece());
                self.next = self.generator.next_piece();
                self.phase = Phase::Running;
                log::info!("game restarted");
                true
            }
            Phase::NotStarted | Phase::Paused => {
                if self.current.is_none() {
                    self.promote_next();
                }
                if self.phase == Phase::NotStarted {
                    log::info!("game started");
                } else {
                    log::debug!("game resumed");
                }
                self.phase = Phase::Running;
                true
            }
        }
    }

    /// Return to the not-started state with an empty grid and zeroed counters
    pub fn stop(&mut self) -> bool {
        let changed = self.phase != Phase::NotStarted
            || self.current.is_some()
            || self.score != 0
            || self.lines != 0
            || !self.grid.is_empty();
        self.grid.clear();
        self.current = None;
        self.next = self.generator.next_piece();
        self.reset_counters();
        self.phase = Phase::NotStarted;
        log::info!("game stopped");
        changed
    }

    /// Flip between running and paused. Ignored in any other phase.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            _ => return false,
        };
        log::debug!("pause toggled: paused={}", self.paused());
        true
    }

    /// Replace the grid and begin a fresh running game on it.
    ///
    /// Rows that are already full are left as they are; they only clear
    /// once a piece locks.
    pub fn inject_grid(&mut self, grid: Grid) -> bool {
        self.grid = grid;
        self.reset_counters();
        self.current = Some(self.generator.next_piece());
        self.next = self.generator.next_piece();
        self.phase = Phase::Running;
        log::info!("grid injected: stack height {}", self.stack_height());
        true
    }

    /// Shift the falling piece one column. Negative `dx` moves left.
    pub fn try_move(&mut self, dx: i8) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };
        let target = piece.position.offset(dx.signum(), 0);
        if collides(&piece, &self.grid, target) {
            return false;
        }
        self.current = Some(piece.at(target));
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1)
    }

    /// Rotate the falling piece a quarter-turn clockwise in place. No kicks.
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };
        let rotated = piece.rotated();
        if collides(&rotated, &self.grid, rotated.position) {
            return false;
        }
        self.current = Some(rotated);
        true
    }

    /// Move the falling piece down one row, locking it if it cannot move.
    pub fn drop_piece(&mut self) -> DropOutcome {
        if !self.is_running() {
            return DropOutcome::Ignored;
        }
        let Some(piece) = self.current else {
            return DropOutcome::Ignored;
        };
        let below = piece.position.offset(0, 1);
        if !collides(&piece, &self.grid, below) {
            self.current = Some(piece.at(below));
            return DropOutcome::Fell;
        }
        self.lock_piece(piece)
    }

    /// Merge, clear, score, then spawn the preview piece.
    fn lock_piece(&mut self, piece: Tetromino) -> DropOutcome {
        let (prev_score, prev_lines, prev_level) = (self.score, self.lines, self.level);

        self.grid.merge_piece(&piece);
        let merged = self.grid.to_rows();
        let lines_cleared = self.grid.clear_full_rows().len() as u32;

        self.score = self
            .score
            .saturating_add(calculate_line_score(lines_cleared));
        self.lines = self.lines.saturating_add(lines_cleared);
        self.level = calculate_level(self.lines);

        if lines_cleared > 0 {
            let kind = if lines_cleared == 4 {
                GameEventKind::Tetris
            } else {
                GameEventKind::LineClear
            };
            log::debug!(
                "{} row(s) cleared, score {} level {}",
                lines_cleared,
                self.score,
                self.level
            );
            self.events
                .push(GameEvent::new(kind, self.score, lines_cleared, self.level));
        }

        let spawned = self.next;
        self.next = self.generator.next_piece();
        if collides(&spawned, &self.grid, spawned.position) {
            self.current = None;
            self.phase = Phase::GameOver;
            log::info!("game over: score {} lines {}", self.score, self.lines);
            self.events.push(GameEvent::new(
                GameEventKind::GameOver,
                self.score,
                lines_cleared,
                self.level,
            ));
            return DropOutcome::GameOver { lines_cleared };
        }
        self.current = Some(spawned);

        if self.stack_height() > HIGH_STACK_ROWS {
            log::debug!("stack height {} above threshold", self.stack_height());
            self.events.push(
                GameEvent::new(GameEventKind::HighStack, prev_score, prev_lines, prev_level)
                    .with_grid(merged),
            );
        }

        DropOutcome::Locked { lines_cleared }
    }

    /// Rows between the floor and the topmost filled cell, inclusive
    pub fn stack_height(&self) -> u8 {
        self.grid
            .topmost_occupied_row()
            .map_or(0, |top| ROWS - top as u8)
    }

    /// Drain queued events in the order they were raised
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Fill an existing snapshot, reusing its storage
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid = self.grid.to_rows();
        out.current = self.current.map(Into::into);
        out.next = self.next.into();
        out.phase = self.phase;
        out.started = self.started();
        out.paused = self.paused();
        out.game_over = self.game_over();
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
    }

    fn promote_next(&mut self) {
        self.current = Some(self.next);
        self.next = self.generator.next_piece();
    }

    fn reset_counters(&mut self) {
        self.score = 0;
        self.lines = 0;
        self.level = 1;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Position;
    use crate::types::{PieceKind, COLS, INJECTED_COLOR};

    fn i_only() -> GameState {
        GameState::with_generator(PieceGenerator::scripted([PieceKind::I]))
    }

    fn fill_row(grid: &mut Grid, y: i8, skip: &[i8]) {
        for x in 0..COLS as i8 {
            if !skip.contains(&x) {
                grid.set(x, y, Some(INJECTED_COLOR));
            }
        }
    }

    fn drop_until_lock(game: &mut GameState) -> DropOutcome {
        loop {
            let outcome = game.drop_piece();
            if outcome != DropOutcome::Fell {
                return outcome;
            }
        }
    }

    #[test]
    fn test_new_game_is_idle() {
        let game = GameState::new(12345);
        assert_eq!(game.phase(), Phase::NotStarted);
        assert!(!game.started());
        assert!(game.current().is_none());
        assert_eq!(game.score(), 0);
        assert_eq!(game.lines(), 0);
        assert_eq!(game.level(), 1);
        assert!(game.grid().is_empty());
    }

    #[test]
    fn test_start_promotes_next() {
        let mut game = GameState::new(12345);
        let preview = *game.next();
        assert!(game.start());
        assert!(game.is_running());
        assert_eq!(game.current().map(|p| p.kind), Some(preview.kind));
        assert!(!game.start());
    }

    #[test]
    fn test_operations_ignored_before_start() {
        let mut game = GameState::new(1);
        assert!(!game.move_left());
        assert!(!game.rotate());
        assert_eq!(game.drop_piece(), DropOutcome::Ignored);
        assert!(!game.toggle_pause());
        assert_eq!(game.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_pause_blocks_everything() {
        let mut game = i_only();
        game.start();
        assert!(game.toggle_pause());
        assert!(game.paused());
        let before = *game.current().unwrap();
        assert!(!game.move_left());
        assert!(!game.rotate());
        assert_eq!(game.drop_piece(), DropOutcome::Ignored);
        assert_eq!(*game.current().unwrap(), before);
        assert!(game.toggle_pause());
        assert!(game.is_running());
    }

    #[test]
    fn test_start_resumes_from_pause_without_respawn() {
        let mut game = i_only();
        game.start();
        game.move_left();
        let moved = *game.current().unwrap();
        game.toggle_pause();
        assert!(game.start());
        assert_eq!(*game.current().unwrap(), moved);
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let mut game = i_only();
        game.start();
        // Horizontal I spawns at x = 3 covering columns 3..=6.
        for _ in 0..3 {
            assert!(game.move_left());
        }
        assert!(!game.move_left());
        assert_eq!(game.current().unwrap().position, Position::new(0, 0));
    }

    #[test]
    fn test_rotation_rejected_without_kick() {
        let mut game = GameState::with_generator(PieceGenerator::scripted([PieceKind::T]));
        game.start();
        let mut grid = Grid::new();
        // Block the cell the rotated T needs below its pivot.
        grid.set(5, 2, Some(INJECTED_COLOR));
        game.inject_grid(grid);
        let before = *game.current().unwrap();
        assert!(!game.rotate());
        assert_eq!(*game.current().unwrap(), before);
    }

    #[test]
    fn test_single_line_clear() {
        let mut game = i_only();
        let mut grid = Grid::new();
        fill_row(&mut grid, 19, &[0, 1, 2, 3]);
        game.inject_grid(grid);
        for _ in 0..3 {
            game.move_left();
        }
        let outcome = drop_until_lock(&mut game);
        assert_eq!(outcome, DropOutcome::Locked { lines_cleared: 1 });
        assert_eq!(game.score(), 100);
        assert_eq!(game.lines(), 1);
        assert_eq!(game.level(), 1);
        assert!(game.grid().is_empty());

        let events = game.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, GameEventKind::LineClear);
        assert_eq!(events[0].score, 100);
        assert_eq!(events[0].lines_cleared, 1);
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn test_tetris_scores_3200() {
        let mut game = i_only();
        let mut grid = Grid::new();
        for y in 16..20 {
            fill_row(&mut grid, y, &[0]);
        }
        game.inject_grid(grid);
        assert!(game.rotate());
        while game.move_left() {}
        assert_eq!(game.current().unwrap().position.x, -2);
        let outcome = drop_until_lock(&mut game);
        assert_eq!(outcome, DropOutcome::Locked { lines_cleared: 4 });
        assert_eq!(game.score(), 3200);
        assert_eq!(game.lines(), 4);

        let events = game.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, GameEventKind::Tetris);
        assert_eq!(events[0].score, 3200);
    }

    #[test]
    fn test_game_over_on_blocked_spawn() {
        let mut game = i_only();
        let mut grid = Grid::new();
        for y in 2..20 {
            fill_row(&mut grid, y, &[0]);
        }
        game.inject_grid(grid);
        let outcome = drop_until_lock(&mut game);
        assert_eq!(outcome, DropOutcome::GameOver { lines_cleared: 0 });
        assert!(game.game_over());
        assert!(!game.paused());
        assert!(game.current().is_none());

        let events = game.take_events();
        assert_eq!(events.last().map(|e| e.kind), Some(GameEventKind::GameOver));
        assert!(!events.iter().any(|e| e.kind == GameEventKind::HighStack));

        // Nothing moves after game over.
        assert!(!game.move_left());
        assert!(!game.toggle_pause());
        assert_eq!(game.drop_piece(), DropOutcome::Ignored);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut game = i_only();
        let mut grid = Grid::new();
        for y in 2..20 {
            fill_row(&mut grid, y, &[0]);
        }
        game.inject_grid(grid);
        drop_until_lock(&mut game);
        assert!(game.game_over());

        assert!(game.start());
        assert!(game.is_running());
        assert!(game.grid().is_empty());
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert!(game.current().is_some());
    }

    #[test]
    fn test_high_stack_event_carries_pre_lock_state() {
        let mut game = GameState::with_generator(PieceGenerator::scripted([PieceKind::O]));
        let mut grid = Grid::new();
        // Stack of 13 rows with a gap so nothing clears.
        for y in 7..20 {
            fill_row(&mut grid, y, &[9]);
        }
        game.inject_grid(grid);
        let outcome = drop_until_lock(&mut game);
        assert_eq!(outcome, DropOutcome::Locked { lines_cleared: 0 });
        assert_eq!(game.stack_height(), 15);

        let events = game.take_events();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.kind, GameEventKind::HighStack);
        assert_eq!(event.score, 0);
        assert_eq!(event.level, 1);
        let grid = event.grid.as_ref().unwrap();
        assert_eq!(grid[5][4], Some(PieceKind::O.color()));
    }

    #[test]
    fn test_injected_full_row_stays_until_lock() {
        let mut game = GameState::with_generator(PieceGenerator::scripted([PieceKind::O]));
        let mut grid = Grid::new();
        fill_row(&mut grid, 19, &[]);
        game.inject_grid(grid);
        assert!(game.grid().is_row_full(19));
        assert_eq!(game.lines(), 0);

        let outcome = drop_until_lock(&mut game);
        assert_eq!(outcome, DropOutcome::Locked { lines_cleared: 1 });
        assert_eq!(game.score(), 100);
    }

    #[test]
    fn test_stop_resets_everything() {
        let mut game = i_only();
        let mut grid = Grid::new();
        fill_row(&mut grid, 19, &[0, 1, 2, 3]);
        game.inject_grid(grid);
        for _ in 0..3 {
            game.move_left();
        }
        drop_until_lock(&mut game);
        assert_eq!(game.score(), 100);

        assert!(game.stop());
        assert_eq!(game.phase(), Phase::NotStarted);
        assert!(game.current().is_none());
        assert_eq!(game.score(), 0);
        assert_eq!(game.lines(), 0);
        assert_eq!(game.level(), 1);
        assert!(game.grid().is_empty());
    }

    #[test]
    fn test_inject_replaces_running_game() {
        let mut game = GameState::new(3);
        game.start();
        game.toggle_pause();
        let mut grid = Grid::new();
        grid.set(0, 19, Some(INJECTED_COLOR));
        assert!(game.inject_grid(grid));
        assert!(game.is_running());
        assert!(game.grid().is_occupied(0, 19));
        assert!(game.current().is_some());
    }

    #[test]
    fn test_level_follows_lines() {
        let mut game = i_only();
        game.start();
        let mut cleared = 0;
        while cleared < 10 {
            let mut grid = Grid::new();
            fill_row(&mut grid, 19, &[0, 1, 2, 3]);
            // inject_grid would zero the counters.
            game.grid = grid;
            game.current = Some(Tetromino::new(PieceKind::I));
            for _ in 0..3 {
                game.move_left();
            }
            cleared += drop_until_lock(&mut game).lines_cleared();
        }
        assert_eq!(game.lines(), 10);
        assert_eq!(game.level(), 2);
        assert!((game.drop_interval_ms() - 760.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut game = GameState::new(9);
        game.start();
        game.toggle_pause();
        let snap = game.snapshot();
        assert!(snap.started);
        assert!(snap.paused);
        assert!(!snap.game_over);
        assert!(!snap.playable());
        assert_eq!(snap.current.map(|p| p.kind), game.current().map(|p| p.kind));
        assert_eq!(snap.next.kind, game.next().kind);
        assert_eq!(snap.level, 1);
    }
}
