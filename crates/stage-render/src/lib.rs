//! Backends that turn a [`stage_command::Command`] stream into an actual
//! effect: escape sequences on a real terminal, or a structured JSON log.

mod ansi;
mod backend;
mod downgrade;
mod error;
mod event;

pub use ansi::AnsiBackend;
pub use backend::Backend;
pub use downgrade::{downgrade, rgb_to_ansi16, rgb_to_xterm256, xterm256_to_ansi16};
pub use error::RenderError;
pub use event::EventBackend;
