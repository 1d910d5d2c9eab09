//! Live session: a registry of independently-addressed, independently
//! updatable screen regions (§4.7), plus the two long-running animation
//! handles built on top of it — [`ProgressHandle`] and [`SpinnerHandle`].

mod progress;
mod session;
mod spinner;

pub use progress::ProgressHandle;
pub use session::LiveSession;
pub use spinner::SpinnerHandle;
