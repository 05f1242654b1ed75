use crate::platform::{PlatformResult, Position};
use std::ffi::CStr;
use thiserror::Error;

/// Why the X11 client library could not be bound. Both cases are permanent.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("X11 client library is not installed: {0}")]
    LibraryMissing(String),
    #[error("failed to bind the X11 client library: {0}")]
    Unexpected(String),
}

/// The handful of Xlib calls the cursor source needs.
pub trait XlibApi {
    /// A display connection together with the root window of its default screen.
    type Connection;

    /// Opens a connection to `display_name`, or `$DISPLAY` when `None`. `Ok(None)` means the
    /// library works but no display server accepted the connection.
    fn open_connection(&self, display_name: Option<&CStr>)
        -> PlatformResult<Option<Self::Connection>>;

    /// Pointer position relative to the connection's root window, or `None` when the server
    /// reports the pointer is not on that screen.
    fn query_pointer(&self, connection: &Self::Connection) -> Option<Position>;

    fn close_connection(&self, connection: Self::Connection) -> PlatformResult<()>;
}

/// Binds an `XlibApi`. Called at most once per source, on the first poll.
pub type XlibLoader<A> = Box<dyn FnMut() -> Result<A, BindError>>;
