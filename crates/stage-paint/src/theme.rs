//! A default palette for terminals that never loaded a user theme.

use stage_command::{Color, SemanticColor, Theme};

/// Maps each semantic tag to a conservative 16-color ANSI index. Callers
/// that want richer palettes provide their own [`Theme`] instead; this one
/// exists so a session never has to special-case "no theme configured."
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTheme;

impl Theme for DefaultTheme {
    fn resolve(&self, tag: SemanticColor) -> Color {
        match tag {
            SemanticColor::Accent => Color::Indexed(4),
            SemanticColor::Muted => Color::Indexed(8),
            SemanticColor::Info => Color::Indexed(6),
            SemanticColor::Success => Color::Indexed(2),
            SemanticColor::Warning => Color::Indexed(3),
            SemanticColor::Error => Color::Indexed(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_semantic_tag_resolves_to_a_concrete_color() {
        let theme = DefaultTheme;
        for tag in [
            SemanticColor::Accent,
            SemanticColor::Muted,
            SemanticColor::Info,
            SemanticColor::Success,
            SemanticColor::Warning,
            SemanticColor::Error,
        ] {
            assert_ne!(theme.resolve(tag), Color::None);
        }
    }
}
