//! Event sink seam between the engine and notification consumers.
//!
//! The engine queues [`GameEvent`]s while it mutates state; whoever drives it
//! drains the queue into an [`EventSink`]. Delivery is fire-and-forget: a
//! sink cannot fail the engine and nothing it does feeds back into state.

use crate::types::GameEvent;

/// Receiver of domain events
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Collects events in memory
impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}

/// Adapts a closure into a sink
pub struct FnSink<F>(pub F);

impl<F: FnMut(GameEvent)> EventSink for FnSink<F> {
    fn emit(&mut self, event: GameEvent) {
        (self.0)(event);
    }
}
