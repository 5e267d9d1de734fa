//! Domain events and the sinks that observe them.
//!
//! Algorithms that want to expose their intermediate decisions take an
//! explicit `&mut impl EventSink<E>` parameter instead of printing. Callers
//! pick the sink: collect into a `Vec`, forward to `tracing`, or both.

pub mod event;
pub mod sink;

pub use event::Event;
pub use sink::{Discard, EventSink, TracingSink};
