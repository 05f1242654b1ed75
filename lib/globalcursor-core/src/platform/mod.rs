pub use common::*;
pub use traits::*;

mod common;
mod traits;

#[cfg(test)]
pub(crate) mod mock;

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(target_os = "windows")] {
        mod windows;
        pub type CursorSource = windows::WindowsCursorSource;
    } else if #[cfg(target_os = "macos")] {
        mod macos;
        pub type CursorSource = macos::MacOSCursorSource;
    } else if #[cfg(any(
        target_os = "linux",
        target_os = "freebsd",
        target_os = "dragonfly",
        target_os = "netbsd",
        target_os = "openbsd"
    ))] {
        pub mod x11;
        pub type CursorSource = x11::X11CursorSource;
    } else {
        mod unsupported;
        pub type CursorSource = unsupported::UnsupportedCursorSource;
    }
}
