use crate::platform::Position;

/// A native source of the global cursor position. Exactly one implementation is compiled in,
/// picked by the target platform (see `CursorSource`).
///
/// Sources are driven from a single thread. They must never panic or block on a failed native
/// call; failures show up as `None` from `poll`.
pub trait CursorSourceImpl {
    /// Asks the platform for the current cursor position. Returns `None` when nothing could be
    /// observed this tick, in which case the caller keeps its previous value.
    fn poll(&mut self) -> Option<Position>;

    /// Releases any native resources opened by `poll`. Must be safe to call repeatedly, and a
    /// later `poll` must not touch released handles.
    fn release(&mut self);

    /// Whether the source has permanently given up. A source that returns `true` here makes no
    /// further native calls.
    fn is_unavailable(&self) -> bool {
        false
    }
}
