//! Natural size of a node: how much room it would like, before a container
//! shrinks it to fit or a spacer absorbs the leftover. This is not a general
//! constraint solver — just the per-kind arithmetic a stack or panel needs to
//! position its children, applied recursively.

use stage_node::{keys, Node, NodeKind};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

fn text_width(s: &str) -> u16 {
    s.width().min(u16::MAX as usize) as u16
}

/// The width a node would occupy if nothing constrained it, given the width
/// `avail` its parent currently has to offer (used as the fill amount for
/// nodes that expand, like [`stage_node::NodeKind::Divider`]).
pub fn natural_size(node: &Node, avail: u16) -> Size {
    match node.kind {
        NodeKind::Text => {
            let content: String = node.properties.get(keys::TEXT).unwrap_or_default();
            Size::new(text_width(&content).min(avail), 1)
        }
        NodeKind::Divider => Size::new(avail, 1),
        NodeKind::Spacer => {
            let min_length: i64 = node.properties.get(keys::MIN_LENGTH).unwrap_or(0);
            Size::new(min_length as u16, 0)
        }
        NodeKind::Badge => {
            let label: String = node.properties.get(keys::LABEL).unwrap_or_default();
            Size::new(text_width(&label).min(avail), 1)
        }
        NodeKind::Note | NodeKind::Code => {
            let content: String = node.properties.get(keys::TEXT).unwrap_or_default();
            Size::new(text_width(&content).min(avail), 1)
        }
        NodeKind::TextField => {
            let value: String = node.properties.get(keys::VALUE).unwrap_or_default();
            let placeholder: String = node.properties.get(keys::PLACEHOLDER).unwrap_or_default();
            let shown = if value.is_empty() { &placeholder } else { &value };
            Size::new(text_width(shown).min(avail), 1)
        }
        NodeKind::Button => {
            let label: String = node.properties.get(keys::LABEL).unwrap_or_default();
            Size::new((text_width(&label) + 4).min(avail), 1)
        }
        NodeKind::Selector => {
            let options: Vec<String> = node.properties.get(keys::OPTIONS).unwrap_or_default();
            let width = options.iter().map(|o| text_width(o)).max().unwrap_or(0);
            Size::new(width.min(avail), options.len().max(1) as u16)
        }
        NodeKind::Progress => Size::new(avail, 1),
        NodeKind::Spinner => {
            let label: String = node.properties.get(keys::LABEL).unwrap_or_default();
            let glyph_width = node
                .properties
                .get::<Vec<String>>(keys::FRAMES)
                .unwrap_or_default()
                .first()
                .map(|f| text_width(f))
                .unwrap_or(1);
            let total = if label.is_empty() {
                glyph_width
            } else {
                glyph_width + 1 + text_width(&label)
            };
            Size::new(total.min(avail), 1)
        }
        NodeKind::Panel => {
            let width: i64 = node
                .properties
                .get(keys::WIDTH)
                .unwrap_or(avail as i64);
            let inner_avail = (width as u16).saturating_sub(2);
            let child_height = node
                .children
                .first()
                .map(|c| natural_size(c, inner_avail).height)
                .unwrap_or(0);
            Size::new(width as u16, child_height + 2)
        }
        NodeKind::HStack => {
            let padding: i64 = node.properties.get(keys::PADDING).unwrap_or(0);
            let spacing: i64 = node.properties.get(keys::SPACING).unwrap_or(0);
            let inner_avail = avail.saturating_sub(2 * padding as u16);
            let sizes: Vec<Size> = node
                .children
                .iter()
                .map(|c| natural_size(c, inner_avail))
                .collect();
            let width: u16 = sizes.iter().map(|s| s.width).sum::<u16>()
                + spacing as u16 * sizes.len().saturating_sub(1) as u16
                + 2 * padding as u16;
            let height = sizes.iter().map(|s| s.height).max().unwrap_or(0) + 2 * padding as u16;
            Size::new(width.min(avail.max(width)), height)
        }
        NodeKind::VStack => {
            let padding: i64 = node.properties.get(keys::PADDING).unwrap_or(0);
            let spacing: i64 = node.properties.get(keys::SPACING).unwrap_or(0);
            let inner_avail = avail.saturating_sub(2 * padding as u16);
            let sizes: Vec<Size> = node
                .children
                .iter()
                .map(|c| natural_size(c, inner_avail))
                .collect();
            let width = sizes.iter().map(|s| s.width).max().unwrap_or(0) + 2 * padding as u16;
            let height: u16 = sizes.iter().map(|s| s.height).sum::<u16>()
                + spacing as u16 * sizes.len().saturating_sub(1) as u16
                + 2 * padding as u16;
            Size::new(width, height)
        }
        NodeKind::Group => Size::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stage_node::{Address, Properties};

    fn text(content: &str) -> Node {
        Node::new(
            Address::new("text"),
            NodeKind::Text,
            Properties::new().with(keys::TEXT, content.to_string()),
        )
    }

    #[test]
    fn text_width_clips_to_available() {
        let size = natural_size(&text("hello world"), 3);
        assert_eq!(size, Size::new(3, 1));
    }

    #[test]
    fn spacer_without_min_length_is_zero_width() {
        let node = Node::new(Address::new("spacer"), NodeKind::Spacer, Properties::new());
        assert_eq!(natural_size(&node, 40), Size::new(0, 0));
    }

    #[test]
    fn vstack_sums_heights_and_takes_max_width() {
        let child_a = text("ab");
        let child_b = text("abcd");
        let stack = Node::new(Address::new("vstack"), NodeKind::VStack, Properties::new())
            .with_children(vec![child_a, child_b]);
        assert_eq!(natural_size(&stack, 80), Size::new(4, 2));
    }
}
