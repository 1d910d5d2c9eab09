//! The `View` trait and the transparent-flattening `Group` combinator.

use crate::RenderContext;
use stage_node::Node;

/// Anything that can elaborate itself into a [`Node`] given a
/// [`RenderContext`]. Implementors reserve their own address as the first
/// step of `make_node` via `ctx.make_address(segment)`; composite views
/// additionally push that address before elaborating their child and pop it
/// afterward, flattening away a [`Group`] child.
pub trait View: Send {
    fn make_node(&self, ctx: &mut RenderContext) -> Node;
}

impl<V: View + ?Sized> View for Box<V> {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        (**self).make_node(ctx)
    }
}

/// Elaborates `child`, flattening it away if it turns out to be a `group`
/// node, and re-parenting the resulting children under `parent_address`.
/// Composite views (panel, stacks, ...) call this once for their single
/// stored child after pushing their own address.
pub fn flatten_child(child: Node, parent_address: &stage_node::Address) -> Vec<Node> {
    let children = if child.kind.is_group() {
        child.children
    } else {
        vec![child]
    };
    children
        .into_iter()
        .map(|c| c.with_parent_address(parent_address.clone()))
        .collect()
}

/// A transparent container: elaborates every child view in order under its
/// own (discarded) scope, so a composite that receives a `Group` as its
/// single child effectively receives many. Never appears in a finalized
/// tree — any composite that elaborates one must flatten it via
/// [`flatten_child`].
pub struct Group {
    views: Vec<Box<dyn View>>,
}

impl Group {
    pub fn new(views: Vec<Box<dyn View>>) -> Self {
        Self { views }
    }
}

impl View for Group {
    fn make_node(&self, ctx: &mut RenderContext) -> Node {
        use stage_node::{NodeKind, Properties};

        let address = ctx.make_address(NodeKind::Group.as_str());
        ctx.push(address.clone());
        let mut children: Vec<Node> = Vec::new();
        for view in &self.views {
            let child = view.make_node(ctx);
            children.extend(flatten_child(child, &address));
        }
        ctx.pop();
        Node::new(address, NodeKind::Group, Properties::new()).with_children(children)
    }
}

/// Convenience constructor mirroring a typical builder-closure call site:
/// `group(vec![Box::new(Text::new("a")), Box::new(Text::new("b"))])`.
pub fn group(views: Vec<Box<dyn View>>) -> Group {
    Group::new(views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RenderContext;
    use stage_node::{NodeKind, Properties};

    struct Leaf(&'static str);
    impl View for Leaf {
        fn make_node(&self, ctx: &mut RenderContext) -> Node {
            let addr = ctx.make_address(self.0);
            Node::new(addr, NodeKind::Text, Properties::new())
        }
    }

    #[test]
    fn group_flattens_into_parent_children() {
        let mut ctx = RenderContext::for_test(80, 24);
        let grouped = group(vec![Box::new(Leaf("a")), Box::new(Leaf("b"))]);
        let node = grouped.make_node(&mut ctx);
        // The group node itself is the raw elaboration result here; callers
        // (composites) are responsible for flattening it away, which is
        // exercised in `stage-view`'s composite helpers and in
        // `stage-builtins`'s stack tests.
        assert_eq!(node.kind, NodeKind::Group);
        assert_eq!(node.children.len(), 2);
    }

    #[test]
    fn flatten_child_substitutes_group_children() {
        let mut ctx = RenderContext::for_test(80, 24);
        let parent_addr = ctx.make_address("panel");
        ctx.push(parent_addr.clone());
        let grouped = group(vec![Box::new(Leaf("a")), Box::new(Leaf("b"))]);
        let group_node = grouped.make_node(&mut ctx);
        ctx.pop();

        let flattened = flatten_child(group_node, &parent_addr);
        assert_eq!(flattened.len(), 2);
        for child in &flattened {
            assert_eq!(child.parent_address.as_ref(), Some(&parent_addr));
            assert_ne!(child.kind, NodeKind::Group);
        }
    }

    #[test]
    fn flatten_child_passes_through_non_group() {
        let mut ctx = RenderContext::for_test(80, 24);
        let parent_addr = ctx.make_address("panel");
        ctx.push(parent_addr.clone());
        let leaf_node = Leaf("x").make_node(&mut ctx);
        ctx.pop();

        let flattened = flatten_child(leaf_node, &parent_addr);
        assert_eq!(flattened.len(), 1);
        assert_eq!(flattened[0].parent_address.as_ref(), Some(&parent_addr));
    }
}
