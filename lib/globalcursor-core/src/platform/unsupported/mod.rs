use crate::config::ProviderConfig;
use crate::diagnostics::{FailureClass, WarningLatch};
use crate::platform::{CursorSourceImpl, Position};

/// Fallback for targets without a native cursor query. Never updates the position.
#[derive(Debug, Default)]
pub struct UnsupportedCursorSource {
    warnings: WarningLatch,
}

impl UnsupportedCursorSource {
    pub fn from_config(_config: &ProviderConfig) -> Self {
        Self::default()
    }
}

impl CursorSourceImpl for UnsupportedCursorSource {
    fn poll(&mut self) -> Option<Position> {
        self.warnings.warn_once(
            FailureClass::Unsupported,
            format_args!(
                "Global cursor position is not supported on {}",
                std::env::consts::OS
            ),
        );
        None
    }

    fn release(&mut self) {}

    fn is_unavailable(&self) -> bool {
        true
    }
}
