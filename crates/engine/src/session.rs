//! Session controller - the entry points external callers use.
//!
//! A [`Session`] owns one [`GameState`], its [`Pacer`] and an [`EventSink`].
//! Every call runs to completion before the next one (`&mut self`), and events
//! raised by the call are stamped with the session clock and delivered to the
//! sink before it returns.

use bricks_core::types::{GameEvent, Intent};
use bricks_core::{DropOutcome, EventSink, GameSnapshot, GameState, Grid, NullSink, Pacer, PieceGenerator};

use crate::tick::TickSource;

pub struct Session<S: EventSink = NullSink> {
    state: GameState,
    pacer: Pacer,
    sink: S,
    /// Milliseconds of ticked time since the session was created
    clock_ms: u64,
}

impl Session<NullSink> {
    /// Session with a seeded generator and no event consumer
    pub fn new(seed: u64) -> Self {
        Self::with_sink(GameState::new(seed), NullSink)
    }
}

impl<S: EventSink> Session<S> {
    pub fn with_sink(state: GameState, sink: S) -> Self {
        Self {
            state,
            pacer: Pacer::new(),
            sink,
            clock_ms: 0,
        }
    }

    /// Session drawing from `generator` and reporting to `sink`
    pub fn with_generator(generator: PieceGenerator, sink: S) -> Self {
        Self::with_sink(GameState::with_generator(generator), sink)
    }

    pub fn start(&mut self) -> bool {
        let changed = self.state.start();
        self.flush();
        changed
    }

    pub fn stop(&mut self) -> bool {
        let changed = self.state.stop();
        self.flush();
        changed
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.state.toggle_pause()
    }

    /// Restart on `grid`, or on an empty grid when `None`
    pub fn reset(&mut self, grid: Option<Grid>) -> bool {
        let changed = self.state.inject_grid(grid.unwrap_or_default());
        self.flush();
        changed
    }

    /// Route one discrete input intent into the engine
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        let changed = match intent {
            Intent::MoveLeft => self.state.move_left(),
            Intent::MoveRight => self.state.move_right(),
            Intent::Rotate => self.state.rotate(),
            Intent::SoftDrop => self.state.drop_piece().changed(),
            Intent::TogglePause => self.state.toggle_pause(),
        };
        self.flush();
        changed
    }

    /// Advance the session clock and let gravity act once at most
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<DropOutcome> {
        self.clock_ms = self.clock_ms.saturating_add(u64::from(elapsed_ms));
        let outcome = self.pacer.advance(&mut self.state, elapsed_ms);
        self.flush();
        outcome
    }

    /// Pull one elapsed duration from `source` and tick with it
    pub fn run_tick(&mut self, source: &mut impl TickSource) -> Option<DropOutcome> {
        let elapsed = source.elapsed_ms();
        self.tick(elapsed)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn flush(&mut self) {
        if !self.state.has_pending_events() {
            return;
        }
        for mut event in self.state.take_events() {
            event.at_ms = self.clock_ms;
            self.deliver(event);
        }
    }

    fn deliver(&mut self, event: GameEvent) {
        log::debug!("event {} at {}ms", event.kind.as_str(), event.at_ms);
        self.sink.emit(event);
    }
}
