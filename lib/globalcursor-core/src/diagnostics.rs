//! Rate limiting for the non-fatal warnings a cursor source emits.

use log::warn;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// The native library backing the source is not installed.
    DependencyMissing,
    /// The library is present but no display could be opened.
    DisplayUnavailable,
    /// Any other native failure. Carries its detail in the message.
    Unexpected,
    /// The build target has no cursor source.
    Unsupported,
}

impl FailureClass {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            FailureClass::DependencyMissing => 0,
            FailureClass::DisplayUnavailable => 1,
            FailureClass::Unexpected => 2,
            FailureClass::Unsupported => 3,
        }
    }
}

/// Remembers which failure classes have already been reported, so a source polled every frame
/// warns at most once per class.
#[derive(Debug, Default)]
pub struct WarningLatch {
    issued: [bool; FailureClass::COUNT],
    emitted: usize,
}

impl WarningLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs `message` unless `class` was already reported. Returns whether it logged.
    pub fn warn_once(&mut self, class: FailureClass, message: fmt::Arguments<'_>) -> bool {
        let issued = &mut self.issued[class.index()];
        if *issued {
            return false;
        }

        *issued = true;
        self.emitted += 1;
        warn!("{message}");
        true
    }

    pub fn is_issued(&self, class: FailureClass) -> bool {
        self.issued[class.index()]
    }

    /// Number of warnings actually written.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}
