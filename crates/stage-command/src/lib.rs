//! Command model: the closed set of backend primitives plus the value types
//! (`Address`, `NodeKind`, `Color`, `TextStyle`) commands and nodes share.

mod address;
mod capabilities;
mod color;
mod command;
mod kind;
mod style;
mod theme;

pub use address::Address;
pub use capabilities::Capabilities;
pub use color::{Color, SemanticColor};
pub use command::{Command, FrameInfo};
pub use kind::NodeKind;
pub use style::TextStyle;
pub use theme::{NoopTheme, Theme};
