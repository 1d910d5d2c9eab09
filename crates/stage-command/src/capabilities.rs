//! Terminal capability bundle.
//!
//! Detection itself (color depth probing, TTY checks, size queries) is an
//! external collaborator; this struct is just the shape every consumer
//! (render context, paint engine, ANSI backend) agrees on.

/// Recognized capability options. `Default` picks the most
/// conservative bundle (no color, no Unicode, not a TTY) so code that forgets
/// to thread real detection through degrades gracefully instead of assuming
/// capabilities it doesn't have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capabilities {
    pub truecolor: bool,
    pub xterm256: bool,
    pub unicode: bool,
    pub width: u16,
    pub height: u16,
    pub is_tty: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            truecolor: false,
            xterm256: false,
            unicode: false,
            width: 80,
            height: 24,
            is_tty: false,
        }
    }
}

impl Capabilities {
    pub const fn new(
        truecolor: bool,
        xterm256: bool,
        unicode: bool,
        width: u16,
        height: u16,
        is_tty: bool,
    ) -> Self {
        Self {
            truecolor,
            xterm256,
            unicode,
            width,
            height,
            is_tty,
        }
    }
}
