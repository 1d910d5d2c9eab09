//! Color model.
//!
//! [`Color`] is a tagged union covering the four representations a view can
//! ask for. [`SemanticColor`] entries resolve through a theme (see
//! `stage-paint::Theme`) to a concrete [`Color`] before the paint engine ever
//! emits a command — backends only ever see already-resolved colors, and
//! perform their own downgrade for the terminal's actual capabilities.

/// A theme-relative color tag, resolved to a concrete [`Color`] during paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SemanticColor {
    Accent,
    Muted,
    Info,
    Success,
    Warning,
    Error,
}

/// A color value as produced by a view's property bag, or as already resolved
/// by the theme. `None` is an explicit sentinel distinct from "unset" — it
/// tells a backend to emit the default (`39`/`49`) rather than skip emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    Indexed(u8),
    Xterm256(u8),
    Rgb(u8, u8, u8),
    Semantic(SemanticColor),
    None,
}

impl Color {
    pub const fn is_none(self) -> bool {
        matches!(self, Color::None)
    }
}
