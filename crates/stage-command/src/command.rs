//! The closed set of backend primitives.
//!
//! Every command is a value; a stream is just `Vec<Command>` (or any ordered
//! iterator) handed to a [`crate::Address`]-oblivious backend. Structural
//! commands double as the event backend's payload and as the live session's
//! incremental diff vocabulary; screen/cursor/style/content/control commands
//! are what the paint engine actually emits for a node.

use crate::{Address, Color, NodeKind, TextStyle};

/// A single frame's progress payload, attached to `Command::Frame`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub frame_index: u64,
    /// Always within `[0.0, 1.0]`.
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // Structural — address-addressed, consumed by the event backend and the
    // live session's incremental diff synthesis.
    Begin {
        address: Address,
        kind: NodeKind,
        parent: Option<Address>,
    },
    SetText {
        address: Address,
        text: String,
    },
    Frame {
        address: Address,
        info: FrameInfo,
    },
    End {
        address: Address,
    },

    // Screen
    Clear,
    ClearLine,
    ClearToEndOfLine,

    // Cursor — 0-indexed.
    MoveCursor {
        row: u16,
        column: u16,
    },
    SaveCursor,
    RestoreCursor,
    HideCursor,
    ShowCursor,

    // Style
    SetForeground(Color),
    SetBackground(Color),
    SetStyle(TextStyle),
    Reset,

    // Content
    Write(String),
    WriteLine(String),

    // Control
    Flush,
}

impl Command {
    /// The address a structural command targets, if any. Non-structural
    /// commands (screen/cursor/style/content/control) have no address.
    pub fn address(&self) -> Option<&Address> {
        match self {
            Command::Begin { address, .. }
            | Command::SetText { address, .. }
            | Command::Frame { address, .. }
            | Command::End { address } => Some(address),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_extracts_structural_target() {
        let cmd = Command::Begin {
            address: Address::new("root.text"),
            kind: NodeKind::Text,
            parent: None,
        };
        assert_eq!(cmd.address().map(Address::as_str), Some("root.text"));
    }

    #[test]
    fn address_is_none_for_non_structural() {
        assert_eq!(Command::Clear.address(), None);
        assert_eq!(Command::Flush.address(), None);
    }
}
