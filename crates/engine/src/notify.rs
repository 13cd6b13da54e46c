//! Notification sinks that sit between the session and its consumers.

use bricks_core::types::{GameEvent, GameEventKind, LINE_CLEAR_COOLDOWN_MS};
use bricks_core::EventSink;
use tokio::sync::mpsc::UnboundedSender;

/// Forwards events over an unbounded tokio channel.
///
/// A dropped receiver is not an error; the event is discarded.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<GameEvent>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<GameEvent>) -> Self {
        Self { tx }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl From<UnboundedSender<GameEvent>> for ChannelSink {
    fn from(tx: UnboundedSender<GameEvent>) -> Self {
        Self::new(tx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: GameEvent) {
        if self.tx.send(event).is_err() {
            log::trace!("event receiver closed; dropping event");
        }
    }
}

/// Rate-limits routine line-clear notifications.
///
/// A `LineClear` arriving within the cooldown of the last forwarded event is
/// suppressed. `Tetris`, `GameOver` and `HighStack` always pass. Time is read
/// from each event's `at_ms` stamp, so the cooldown follows the session clock
/// rather than the wall clock.
#[derive(Debug)]
pub struct ThrottledSink<S> {
    inner: S,
    cooldown_ms: u64,
    last_forwarded_ms: Option<u64>,
    suppressed: u64,
}

impl<S: EventSink> ThrottledSink<S> {
    pub fn new(inner: S) -> Self {
        Self::with_cooldown(inner, LINE_CLEAR_COOLDOWN_MS)
    }

    pub fn with_cooldown(inner: S, cooldown_ms: u64) -> Self {
        Self {
            inner,
            cooldown_ms,
            last_forwarded_ms: None,
            suppressed: 0,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Number of events swallowed so far
    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }

    fn in_cooldown(&self, at_ms: u64) -> bool {
        self.last_forwarded_ms
            .is_some_and(|last| at_ms.saturating_sub(last) < self.cooldown_ms)
    }
}

impl<S: EventSink> EventSink for ThrottledSink<S> {
    fn emit(&mut self, event: GameEvent) {
        if event.kind == GameEventKind::LineClear && self.in_cooldown(event.at_ms) {
            self.suppressed += 1;
            log::debug!("line clear at {}ms suppressed by cooldown", event.at_ms);
            return;
        }
        self.last_forwarded_ms = Some(event.at_ms);
        self.inner.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(kind: GameEventKind, at_ms: u64) -> GameEvent {
        let mut event = GameEvent::new(kind, 0, 1, 1);
        event.at_ms = at_ms;
        event
    }

    #[test]
    fn test_line_clear_cooldown() {
        let mut sink = ThrottledSink::new(Vec::new());
        sink.emit(at(GameEventKind::LineClear, 0));
        sink.emit(at(GameEventKind::LineClear, 3_999));
        sink.emit(at(GameEventKind::LineClear, 4_000));
        let kept: Vec<u64> = sink.inner().iter().map(|e| e.at_ms).collect();
        assert_eq!(kept, vec![0, 4_000]);
        assert_eq!(sink.suppressed(), 1);
    }

    #[test]
    fn test_other_kinds_always_pass_and_restart_cooldown() {
        let mut sink = ThrottledSink::new(Vec::new());
        sink.emit(at(GameEventKind::LineClear, 0));
        sink.emit(at(GameEventKind::Tetris, 100));
        sink.emit(at(GameEventKind::HighStack, 200));
        sink.emit(at(GameEventKind::LineClear, 4_100));
        sink.emit(at(GameEventKind::LineClear, 4_200));
        sink.emit(at(GameEventKind::GameOver, 4_300));
        // 4_100 is within 4_000ms of the high stack at 200; 4_200 is not.
        let kept: Vec<u64> = sink.into_inner().into_iter().map(|e| e.at_ms).collect();
        assert_eq!(kept, vec![0, 100, 200, 4_200, 4_300]);
    }

    #[test]
    fn test_channel_sink_ignores_closed_receiver() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<GameEvent>();
        let mut sink = ChannelSink::from(tx);
        sink.emit(at(GameEventKind::Tetris, 1));
        assert_eq!(rx.try_recv().map(|e| e.kind).ok(), Some(GameEventKind::Tetris));
        drop(rx);
        assert!(sink.is_closed());
        sink.emit(at(GameEventKind::GameOver, 2));
    }
}
