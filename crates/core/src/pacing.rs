//! Gravity pacing - turns elapsed wall time into automatic drops.

use crate::game_state::{DropOutcome, GameState};

/// Accumulates elapsed time and drops the piece once per exceeded interval.
///
/// At most one drop happens per [`Pacer::advance`] call, however long the
/// elapsed duration. Surplus time is discarded rather than carried over.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pacer {
    accumulated_ms: f64,
}

impl Pacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulated_ms(&self) -> f64 {
        self.accumulated_ms
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0.0;
    }

    /// Feed one tick. Returns the outcome when a drop was performed.
    pub fn advance(&mut self, game: &mut GameState, elapsed_ms: u32) -> Option<DropOutcome> {
        if !game.is_running() {
            return None;
        }
        self.accumulated_ms += f64::from(elapsed_ms);
        if self.accumulated_ms <= game.drop_interval_ms() {
            return None;
        }
        self.accumulated_ms = 0.0;
        Some(game.drop_piece())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PieceGenerator;
    use crate::types::PieceKind;

    fn running() -> GameState {
        let mut game = GameState::with_generator(PieceGenerator::scripted([PieceKind::O]));
        game.start();
        game
    }

    #[test]
    fn test_drop_requires_strictly_exceeding_interval() {
        let mut game = running();
        let mut pacer = Pacer::new();
        assert_eq!(pacer.advance(&mut game, 800), None);
        assert_eq!(game.current().unwrap().position.y, 0);
        assert_eq!(pacer.advance(&mut game, 1), Some(DropOutcome::Fell));
        assert_eq!(game.current().unwrap().position.y, 1);
        assert_eq!(pacer.accumulated_ms(), 0.0);
    }

    #[test]
    fn test_one_drop_per_tick() {
        let mut game = running();
        let mut pacer = Pacer::new();
        assert_eq!(pacer.advance(&mut game, 10_000), Some(DropOutcome::Fell));
        assert_eq!(game.current().unwrap().position.y, 1);
        assert_eq!(pacer.accumulated_ms(), 0.0);
    }

    #[test]
    fn test_sixteen_ms_ticks() {
        let mut game = running();
        let mut pacer = Pacer::new();
        let mut drops = 0;
        // 50 * 16 = 800 is not enough, the 51st tick crosses the interval.
        for _ in 0..50 {
            if pacer.advance(&mut game, 16).is_some() {
                drops += 1;
            }
        }
        assert_eq!(drops, 0);
        assert!(pacer.advance(&mut game, 16).is_some());
    }

    #[test]
    fn test_paused_game_does_not_accumulate() {
        let mut game = running();
        game.toggle_pause();
        let mut pacer = Pacer::new();
        let snap = game.snapshot();
        for _ in 0..100 {
            assert_eq!(pacer.advance(&mut game, 100), None);
        }
        assert_eq!(pacer.accumulated_ms(), 0.0);
        assert_eq!(game.snapshot(), snap);
    }

    #[test]
    fn test_not_started_and_game_over_are_inert() {
        let mut game = GameState::new(5);
        let mut pacer = Pacer::new();
        assert_eq!(pacer.advance(&mut game, 5_000), None);
        assert_eq!(pacer.accumulated_ms(), 0.0);
    }
}
