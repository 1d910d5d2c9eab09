//! Text attribute bitset.

use bitflags::bitflags;

bitflags! {
    /// SGR text attributes a span may carry simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TextStyle: u16 {
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const BLINK         = 1 << 4;
        const REVERSE       = 1 << 5;
        const HIDDEN        = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}

impl TextStyle {
    /// Attribute names in a stable emission order, used by the event backend
    /// to populate the `styles` payload array.
    pub fn names(self) -> Vec<&'static str> {
        let table: &[(TextStyle, &str)] = &[
            (TextStyle::BOLD, "bold"),
            (TextStyle::DIM, "dim"),
            (TextStyle::ITALIC, "italic"),
            (TextStyle::UNDERLINE, "underline"),
            (TextStyle::BLINK, "blink"),
            (TextStyle::REVERSE, "reverse"),
            (TextStyle::HIDDEN, "hidden"),
            (TextStyle::STRIKETHROUGH, "strikethrough"),
        ];
        table
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_lists_set_attributes_in_order() {
        let style = TextStyle::UNDERLINE | TextStyle::BOLD;
        assert_eq!(style.names(), vec!["bold", "underline"]);
    }

    #[test]
    fn empty_style_has_no_names() {
        assert!(TextStyle::empty().names().is_empty());
    }
}
