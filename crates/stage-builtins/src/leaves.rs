//! Leaf views: produce a node with no children directly from their own
//! configuration. Each implements [`View`] by reserving its address and
//! writing its fields into a fresh [`Properties`] bag.

use stage_command::{Color, TextStyle};
use stage_node::{keys, Node, NodeKind, Properties};
use stage_view::{RenderContext, View};

/// Plain text.
pub struct Text {
    content: String,
    foreground: Color,
    style: TextStyle,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            foreground: Color::None,
            style: TextStyle::empty(),
        }
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }
}

impl View for Text {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        let address = ctx.make_address(NodeKind::Text.as_str());
        let props = Properties::new()
            .with(keys::TEXT, self.content.clone())
            .with(keys::FOREGROUND, self.foreground)
            .with(keys::STYLE_BITS, self.style.bits() as i64);
        Node::new(address, NodeKind::Text, props)
    }
}

/// A single horizontal rule.
pub struct Divider;

impl View for Divider {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        let address = ctx.make_address(NodeKind::Divider.as_str());
        Node::new(address, NodeKind::Divider, Properties::new())
    }
}

/// Absorbs slack along its stack's main axis; flexible unless `min_length`
/// is set, in which case it never shrinks below it.
pub struct Spacer {
    min_length: Option<u16>,
}

impl Spacer {
    pub fn new() -> Self {
        Self { min_length: None }
    }

    pub fn min_length(mut self, length: u16) -> Self {
        self.min_length = Some(length);
        self
    }
}

impl Default for Spacer {
    fn default() -> Self {
        Self::new()
    }
}

impl View for Spacer {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        let address = ctx.make_address(NodeKind::Spacer.as_str());
        let mut props = Properties::new();
        if let Some(len) = self.min_length {
            props = props.with(keys::MIN_LENGTH, len as i64);
        }
        Node::new(address, NodeKind::Spacer, props)
    }
}

/// A small pill of text, typically rendered with a semantic background.
pub struct Badge {
    label: String,
    foreground: Color,
}

impl Badge {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            foreground: Color::None,
        }
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }
}

impl View for Badge {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        let address = ctx.make_address(NodeKind::Badge.as_str());
        let props = Properties::new()
            .with(keys::LABEL, self.label.clone())
            .with(keys::FOREGROUND, self.foreground);
        Node::new(address, NodeKind::Badge, props)
    }
}

/// An annotative aside, usually rendered dimmed/italic.
pub struct Note {
    content: String,
}

impl Note {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl View for Note {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        let address = ctx.make_address(NodeKind::Note.as_str());
        let props = Properties::new().with(keys::TEXT, self.content.clone());
        Node::new(address, NodeKind::Note, props)
    }
}

/// A fixed-width code snippet.
pub struct Code {
    content: String,
}

impl Code {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl View for Code {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        let address = ctx.make_address(NodeKind::Code.as_str());
        let props = Properties::new().with(keys::TEXT, self.content.clone());
        Node::new(address, NodeKind::Code, props)
    }
}

/// A single-line text input's current value.
pub struct TextField {
    value: String,
    placeholder: String,
}

impl TextField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            placeholder: String::new(),
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

impl View for TextField {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        let address = ctx.make_address(NodeKind::TextField.as_str());
        let props = Properties::new()
            .with(keys::VALUE, self.value.clone())
            .with(keys::PLACEHOLDER, self.placeholder.clone());
        Node::new(address, NodeKind::TextField, props)
    }
}

/// A clickable/actionable label.
pub struct Button {
    label: String,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl View for Button {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        let address = ctx.make_address(NodeKind::Button.as_str());
        let props = Properties::new().with(keys::LABEL, self.label.clone());
        Node::new(address, NodeKind::Button, props)
    }
}

/// A list of options with one selected index.
pub struct Selector {
    options: Vec<String>,
    selected_index: i64,
}

impl Selector {
    pub fn new(options: Vec<String>, selected_index: usize) -> Self {
        Self {
            options,
            selected_index: selected_index as i64,
        }
    }
}

impl View for Selector {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        let address = ctx.make_address(NodeKind::Selector.as_str());
        let props = Properties::new()
            .with(keys::OPTIONS, self.options.clone())
            .with(keys::SELECTED_INDEX, self.selected_index);
        Node::new(address, NodeKind::Selector, props)
    }
}

/// A determinate progress node; the paint engine renders `current/total` as
/// a bar, the live session's `ProgressHandle` drives `current` over time.
pub struct Progress {
    total: i64,
    current: i64,
    label: String,
}

impl Progress {
    pub fn new(total: i64, current: i64) -> Self {
        Self {
            total,
            current,
            label: String::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl View for Progress {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        let address = ctx.make_address(NodeKind::Progress.as_str());
        let props = Properties::new()
            .with(keys::TOTAL, self.total)
            .with(keys::CURRENT, self.current)
            .with(keys::LABEL, self.label.clone());
        Node::new(address, NodeKind::Progress, props)
    }
}

/// An indeterminate animated node; `frames` cycles under `SpinnerHandle`.
pub struct Spinner {
    frames: Vec<String>,
    interval_ms: i64,
    label: String,
}

impl Spinner {
    pub fn new(frames: Vec<String>, interval_ms: i64) -> Self {
        Self {
            frames,
            interval_ms,
            label: String::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl View for Spinner {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        let address = ctx.make_address(NodeKind::Spinner.as_str());
        let props = Properties::new()
            .with(keys::FRAMES, self.frames.clone())
            .with(keys::INTERVAL_MS, self.interval_ms)
            .with(keys::LABEL, self.label.clone());
        Node::new(address, NodeKind::Spinner, props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_elaborates_with_content_property() {
        let mut ctx = RenderContext::for_test(80, 24);
        let node = Text::new("hi").make_node(&mut ctx);
        assert_eq!(node.kind, NodeKind::Text);
        assert_eq!(node.properties.get(keys::TEXT), Some("hi".to_string()));
        assert!(node.children.is_empty());
    }

    #[test]
    fn spacer_without_min_length_has_no_property() {
        let mut ctx = RenderContext::for_test(80, 24);
        let node = Spacer::new().make_node(&mut ctx);
        assert_eq!(node.properties.get(keys::MIN_LENGTH), None);
    }

    #[test]
    fn spacer_with_min_length_carries_it() {
        let mut ctx = RenderContext::for_test(80, 24);
        let node = Spacer::new().min_length(3).make_node(&mut ctx);
        assert_eq!(node.properties.get(keys::MIN_LENGTH), Some(3));
    }
}
