use crate::config::ProviderConfig;
use crate::platform::{CursorSourceImpl, PlatformResult, Position};
use log::trace;
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

/// Reads the cursor with `GetCursorPos`. Holds no native resources.
#[derive(Debug, Default)]
pub struct WindowsCursorSource;

impl WindowsCursorSource {
    pub fn from_config(_config: &ProviderConfig) -> Self {
        Self
    }

    fn cursor_position() -> PlatformResult<Position> {
        let mut point = POINT::default();

        unsafe {
            GetCursorPos(&mut point).map_err(|err| err.to_string())?;
        }

        Ok(Position::new(point.x, point.y))
    }
}

impl CursorSourceImpl for WindowsCursorSource {
    fn poll(&mut self) -> Option<Position> {
        match Self::cursor_position() {
            Ok(position) => Some(position),
            Err(err) => {
                trace!("GetCursorPos failed: {err}");
                None
            }
        }
    }

    fn release(&mut self) {}
}
