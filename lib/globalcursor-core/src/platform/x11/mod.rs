//! X11 cursor source. libX11 is loaded at runtime, so a machine without it degrades to a
//! provider that never updates instead of failing to start.

pub use api::*;
pub use source::*;
pub use xlib::*;

mod api;
mod source;
mod xlib;
