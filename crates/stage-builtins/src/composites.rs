//! Composite views: reserve their own address, descend into it, elaborate a
//! single child (flattening it if it is a `Group`), and attach the result as
//! their own children.

use stage_node::{keys, Node, NodeKind, Properties};
use stage_view::{flatten_child, group, Group, RenderContext, View};

/// A bordered box with an optional title.
pub struct Panel<V: View> {
    title: Option<String>,
    child: V,
}

impl<V: View> Panel<V> {
    pub fn new(child: V) -> Self {
        Self { title: None, child }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl<V: View> View for Panel<V> {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        let address = ctx.make_address(NodeKind::Panel.as_str());
        ctx.push(address.clone());
        let child_node = self.child.make_node(ctx);
        ctx.pop();

        let mut props = Properties::new().with(keys::BORDERED, true);
        if let Some(title) = &self.title {
            props = props.with(keys::TITLE, title.clone());
        }
        Node::new(address.clone(), NodeKind::Panel, props)
            .with_children(flatten_child(child_node, &address))
    }
}

/// Shared implementation for the two stack orientations: both just elaborate
/// a (usually `Group`-wrapped) child and attach padding/spacing properties.
fn make_stack_node(
    ctx: &mut RenderContext,
    kind: NodeKind,
    child: &dyn View,
    padding: u16,
    spacing: u16,
) -> Node {
    let address = ctx.make_address(kind.as_str());
    ctx.push(address.clone());
    let child_node = child.make_node(ctx);
    ctx.pop();

    let props = Properties::new()
        .with(keys::PADDING, padding as i64)
        .with(keys::SPACING, spacing as i64);
    Node::new(address.clone(), kind, props).with_children(flatten_child(child_node, &address))
}

/// Lays out children left to right: width = sum of child widths, height =
/// max child height.
pub struct HStack {
    child: Group,
    padding: u16,
    spacing: u16,
}

impl HStack {
    pub fn new(children: Vec<Box<dyn View>>) -> Self {
        Self {
            child: group(children),
            padding: 0,
            spacing: 0,
        }
    }

    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }
}

impl View for HStack {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        make_stack_node(ctx, NodeKind::HStack, &self.child, self.padding, self.spacing)
    }
}

/// Lays out children top to bottom: width = max child width, height = sum
/// of child heights.
pub struct VStack {
    child: Group,
    padding: u16,
    spacing: u16,
}

impl VStack {
    pub fn new(children: Vec<Box<dyn View>>) -> Self {
        Self {
            child: group(children),
            padding: 0,
            spacing: 0,
        }
    }

    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }
}

impl View for VStack {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        make_stack_node(ctx, NodeKind::VStack, &self.child, self.padding, self.spacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Text;

    #[test]
    fn panel_wraps_single_child() {
        let mut ctx = RenderContext::for_test(20, 5);
        let panel = Panel::new(Text::new("x")).title("T");
        let node = panel.make_node(&mut ctx);
        assert_eq!(node.kind, NodeKind::Panel);
        assert_eq!(node.properties.get(keys::TITLE), Some("T".to_string()));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].parent_address.as_ref(), Some(&node.address));
    }

    #[test]
    fn vstack_flattens_group_children() {
        let mut ctx = RenderContext::for_test(20, 5);
        let stack = VStack::new(vec![Box::new(Text::new("a")), Box::new(Text::new("b"))]);
        let node = stack.make_node(&mut ctx);
        assert_eq!(node.kind, NodeKind::VStack);
        assert_eq!(node.children.len(), 2);
        assert!(node.children.iter().all(|c| c.kind == NodeKind::Text));
    }

    #[test]
    fn no_group_node_survives_in_finalized_tree() {
        let mut ctx = RenderContext::for_test(20, 5);
        let stack = VStack::new(vec![Box::new(Text::new("a")), Box::new(Text::new("b"))]);
        let node = stack.make_node(&mut ctx);
        fn assert_no_group(n: &Node) {
            assert_ne!(n.kind, NodeKind::Group);
            for c in &n.children {
                assert_no_group(c);
            }
        }
        assert_no_group(&node);
    }
}
