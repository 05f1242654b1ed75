use crate::config::ProviderConfig;
use crate::platform::{CursorSourceImpl, PlatformResult, Position};
use core_graphics::event::CGEvent;
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use log::trace;

/// Reads the cursor from the location of a freshly created Quartz event.
///
/// The event source and the event only live for one `poll`. Both are CoreFoundation objects that
/// are released when dropped, so they are freed on every return path, including a failed
/// `CGEvent::new`.
#[derive(Debug, Default)]
pub struct MacOSCursorSource;

impl MacOSCursorSource {
    pub fn from_config(_config: &ProviderConfig) -> Self {
        Self
    }

    fn cursor_position() -> PlatformResult<Position> {
        let source = CGEventSource::new(CGEventSourceStateID::CombinedSessionState)?;
        let event = CGEvent::new(source)?;
        let location = event.location();

        // Quartz global coordinates already have their origin at the top left of the main display
        Ok(Position::from_f64(location.x, location.y))
    }
}

impl CursorSourceImpl for MacOSCursorSource {
    fn poll(&mut self) -> Option<Position> {
        match Self::cursor_position() {
            Ok(position) => Some(position),
            Err(err) => {
                trace!("Could not read cursor location from a CGEvent: {err}");
                None
            }
        }
    }

    fn release(&mut self) {}
}
