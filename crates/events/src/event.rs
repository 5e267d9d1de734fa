/// A domain-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **named** with a stable type identifier
/// - designed to be **append-only** (collected in emission order)
pub trait Event: Clone + core::fmt::Debug + 'static {
    /// Stable event name/type identifier (e.g. "shelf.include").
    fn event_type(&self) -> &'static str;
}
