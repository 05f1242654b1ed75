use crate::platform::x11::{BindError, XlibApi};
use crate::platform::{PlatformResult, Position};
use std::ffi::CStr;
use std::os::raw::{c_int, c_uint};
use std::ptr::{self, NonNull};
use x11_dl::error::OpenErrorKind;
use x11_dl::xlib;

/// libX11 resolved with `dlopen`.
pub struct Xlib {
    lib: xlib::Xlib,
}

impl Xlib {
    pub fn load() -> Result<Self, BindError> {
        xlib::Xlib::open()
            .map(|lib| Self { lib })
            .map_err(|err| match err.kind() {
                OpenErrorKind::Library => BindError::LibraryMissing(err.detail().to_string()),
                OpenErrorKind::Symbol => BindError::Unexpected(err.to_string()),
            })
    }
}

pub struct XConnection {
    display: NonNull<xlib::Display>,
    root: xlib::Window,
}

impl XlibApi for Xlib {
    type Connection = XConnection;

    fn open_connection(
        &self,
        display_name: Option<&CStr>,
    ) -> PlatformResult<Option<Self::Connection>> {
        let name = display_name.map_or(ptr::null(), CStr::as_ptr);

        unsafe {
            let Some(display) = NonNull::new((self.lib.XOpenDisplay)(name)) else {
                return Ok(None);
            };

            let screen = (self.lib.XDefaultScreen)(display.as_ptr());
            let root = (self.lib.XRootWindow)(display.as_ptr(), screen);
            if root == 0 {
                (self.lib.XCloseDisplay)(display.as_ptr());
                return Err(format!("X server reported no root window for screen {screen}").into());
            }

            Ok(Some(XConnection { display, root }))
        }
    }

    fn query_pointer(&self, connection: &Self::Connection) -> Option<Position> {
        let mut root_return: xlib::Window = 0;
        let mut child_return: xlib::Window = 0;
        let mut root_x: c_int = 0;
        let mut root_y: c_int = 0;
        let mut win_x: c_int = 0;
        let mut win_y: c_int = 0;
        let mut mask: c_uint = 0;

        let on_screen = unsafe {
            (self.lib.XQueryPointer)(
                connection.display.as_ptr(),
                connection.root,
                &mut root_return,
                &mut child_return,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            )
        };

        (on_screen != xlib::False).then(|| Position::new(root_x, root_y))
    }

    fn close_connection(&self, connection: Self::Connection) -> PlatformResult<()> {
        unsafe {
            (self.lib.XCloseDisplay)(connection.display.as_ptr());
        }
        Ok(())
    }
}
