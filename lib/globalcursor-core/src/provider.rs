use crate::config::ProviderConfig;
use crate::platform::{CursorSource, CursorSourceImpl, Position};

/// Caches the last global cursor position observed by a platform cursor source.
///
/// `refresh` is meant to be called from the host's update loop and `shutdown` before the host
/// reloads or exits. Neither ever fails: when the platform cannot deliver a position, the cached
/// value simply stops changing.
pub struct CursorPositionProvider<S: CursorSourceImpl = CursorSource> {
    position: Position,
    source: S,
}

impl CursorPositionProvider {
    pub fn new() -> Self {
        Self::with_config(&ProviderConfig::default())
    }

    pub fn with_config(config: &ProviderConfig) -> Self {
        Self::from_source(CursorSource::from_config(config))
    }
}

impl Default for CursorPositionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: CursorSourceImpl> CursorPositionProvider<S> {
    pub fn from_source(source: S) -> Self {
        Self {
            position: Position::default(),
            source,
        }
    }

    /// The last successfully observed position, (0, 0) until the first one.
    pub fn current_position(&self) -> Position {
        self.position
    }

    pub fn refresh(&mut self) {
        if let Some(position) = self.source.poll() {
            self.position = position;
        }
    }

    /// Releases native resources held by the source. Safe to call any number of times; a later
    /// `refresh` reopens them if the source is still available.
    pub fn shutdown(&mut self) {
        self.source.release();
    }

    /// `false` once the source has permanently given up.
    pub fn is_available(&self) -> bool {
        !self.source.is_unavailable()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
