pub use source::*;

mod source;
