pub mod config;
pub mod diagnostics;
pub mod paths;
pub mod platform;
mod provider;

pub use config::{ConfigError, ProviderConfig};
pub use platform::Position;
pub use provider::CursorPositionProvider;

pub fn version() -> &'static str {
    option_env!("VERSION").unwrap_or("v0.0.0-dev")
}
