//! Terminal backend abstraction, capability detection, and the process-wide
//! runtime singleton that serializes command application across every
//! registered backend.

pub mod capabilities;
mod guard;
mod runtime;

pub use capabilities::detect;
pub use guard::{CrosstermBackend, TerminalBackend, TerminalGuard};
pub use runtime::Runtime;
