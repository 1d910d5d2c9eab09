//! Immutable tree node.

use crate::Properties;
use stage_command::{Address, NodeKind};

/// A single element of an elaborated tree. Nodes are value-typed: updates
/// always produce a new `Node` rather than mutating one in place, so a
/// previous tree can be retained (e.g. by the live session) as a diff
/// baseline without fear of it changing out from under the diff.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub address: Address,
    /// User-supplied identity used by the reconciler to track a node across
    /// reorders; absent means "match by address only."
    pub logical_id: Option<String>,
    pub kind: NodeKind,
    pub properties: Properties,
    pub children: Vec<Node>,
    /// Lookup key for diagnostics only — not an owning reference, so there is
    /// no cycle in the data model even though every non-root node carries one.
    pub parent_address: Option<Address>,
}

impl Node {
    pub fn new(address: Address, kind: NodeKind, properties: Properties) -> Self {
        Self {
            address,
            logical_id: None,
            kind,
            properties,
            children: Vec::new(),
            parent_address: None,
        }
    }

    pub fn with_logical_id(mut self, id: impl Into<String>) -> Self {
        self.logical_id = Some(id.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_parent_address(mut self, parent: Address) -> Self {
        self.parent_address = Some(parent);
        self
    }

    /// The reconciler's matching key: `logical_id` when present, else the address.
    pub fn diff_key(&self) -> &str {
        self.logical_id.as_deref().unwrap_or(self.address.as_str())
    }

    /// All addresses in this node's subtree, pre-order, self first.
    pub fn addresses(&self) -> Vec<&Address> {
        let mut out = vec![&self.address];
        for child in &self.children {
            out.extend(child.addresses());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_key_prefers_logical_id() {
        let node = Node::new(Address::new("root.text"), NodeKind::Text, Properties::new())
            .with_logical_id("item-1");
        assert_eq!(node.diff_key(), "item-1");
    }

    #[test]
    fn diff_key_falls_back_to_address() {
        let node = Node::new(Address::new("root.text"), NodeKind::Text, Properties::new());
        assert_eq!(node.diff_key(), "root.text");
    }

    #[test]
    fn addresses_are_preorder() {
        let leaf_a = Node::new(Address::new("root.a"), NodeKind::Text, Properties::new());
        let leaf_b = Node::new(Address::new("root.b"), NodeKind::Text, Properties::new());
        let root = Node::new(Address::new("root"), NodeKind::VStack, Properties::new())
            .with_children(vec![leaf_a, leaf_b]);
        let addrs: Vec<&str> = root.addresses().into_iter().map(Address::as_str).collect();
        assert_eq!(addrs, vec!["root", "root.a", "root.b"]);
    }
}
