//! Event sinks (mechanics only).
//!
//! A sink is the receiving end of a side channel: producers call `emit` for
//! every event, in order, and never read anything back. Control flow must not
//! depend on what a sink does with the events.

use crate::Event;

/// Receives events in emission order.
pub trait EventSink<E: Event> {
    fn emit(&mut self, event: E);
}

/// In-memory collector: events are appended in emission order.
impl<E: Event> EventSink<E> for Vec<E> {
    fn emit(&mut self, event: E) {
        self.push(event);
    }
}

impl<E: Event, S: EventSink<E> + ?Sized> EventSink<E> for &mut S {
    fn emit(&mut self, event: E) {
        (**self).emit(event);
    }
}

/// Fan-out: every event goes to both sinks (first, then second).
impl<E, A, B> EventSink<E> for (A, B)
where
    E: Event,
    A: EventSink<E>,
    B: EventSink<E>,
{
    fn emit(&mut self, event: E) {
        self.0.emit(event.clone());
        self.1.emit(event);
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl<E: Event> EventSink<E> for Discard {
    fn emit(&mut self, _event: E) {}
}

/// Forwards every event to `tracing` at DEBUG level, counting what it saw.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink {
    emitted: usize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events forwarded so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl<E: Event> EventSink<E> for TracingSink {
    fn emit(&mut self, event: E) {
        self.emitted += 1;
        tracing::debug!(event_type = event.event_type(), ?event, "event");
    }
}
