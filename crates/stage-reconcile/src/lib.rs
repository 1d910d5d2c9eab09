//! Tree diffing between two elaborated node trees.
//!
//! Nodes are matched by [`stage_node::Node::diff_key`] within a common
//! parent: a `logical_id` match survives reordering and property changes
//! alike, while a node with no `logical_id` only ever matches itself by
//! address (so moving it without a `logical_id` looks like a delete plus an
//! insert, which is the conservative, correct behavior for anonymous nodes).

use std::collections::HashMap;

use stage_command::Address;
use stage_node::Node;

mod result;

pub use result::{Move, ReconciliationResult, Update};

/// Diffs `old` (the previous frame, if one exists) against `new`, producing
/// the minimal set of structural changes that turns one into the other.
pub fn reconcile(old: Option<&Node>, new: &Node) -> ReconciliationResult {
    let mut result = ReconciliationResult::default();
    match old {
        None => insert_subtree(new, &mut result),
        Some(old) => diff_node(old, new, &mut result),
    }
    result.has_changes =
        !result.insertions.is_empty() || !result.updates.is_empty() || !result.moves.is_empty() || !result.deletions.is_empty();
    tracing::debug!(
        insertions = result.insertions.len(),
        updates = result.updates.len(),
        moves = result.moves.len(),
        deletions = result.deletions.len(),
        "reconciled tree"
    );
    result
}

/// Records one insertion per node in `node`'s subtree, pre-order.
fn insert_subtree(node: &Node, result: &mut ReconciliationResult) {
    result.insertions.push(node.clone());
    for child in &node.children {
        insert_subtree(child, result);
    }
}

/// Records one deletion for the subtree root; descendants are implied.
fn delete_subtree(node: &Node, result: &mut ReconciliationResult) {
    result.deletions.push(node.address.clone());
}

/// Diffs two nodes known to occupy the same slot (matched by `diff_key` at
/// the parent level, or the tree root). A `kind` change is a delete+insert
/// of the whole subtree, never a shallow update — the two kinds may not even
/// share a painter, so there is nothing sensible to diff property-by-property.
/// Otherwise emits an update if the node's own data differs, then recurses
/// into children keyed by `diff_key`.
fn diff_node(old: &Node, new: &Node, result: &mut ReconciliationResult) {
    if old == new {
        return;
    }
    if old.kind != new.kind {
        delete_subtree(old, result);
        insert_subtree(new, result);
        return;
    }
    if old.properties != new.properties || old.logical_id != new.logical_id {
        result.updates.push(Update {
            address: new.address.clone(),
            node: new.clone(),
        });
    }
    diff_children(&old.children, &new.children, result);
}

fn diff_children(old_children: &[Node], new_children: &[Node], result: &mut ReconciliationResult) {
    let old_by_key: HashMap<&str, &Node> = old_children.iter().map(|n| (n.diff_key(), n)).collect();
    let mut matched_old_keys: HashMap<&str, bool> = HashMap::new();

    for new_child in new_children {
        match old_by_key.get(new_child.diff_key()) {
            Some(old_child) => {
                matched_old_keys.insert(old_child.diff_key(), true);
                if old_child.address != new_child.address {
                    result.moves.push(Move {
                        from: old_child.address.clone(),
                        to: new_child.address.clone(),
                    });
                }
                diff_node(old_child, new_child, result);
            }
            None => insert_subtree(new_child, result),
        }
    }

    for old_child in old_children {
        if !matched_old_keys.contains_key(old_child.diff_key()) {
            delete_subtree(old_child, result);
        }
    }
}

/// Convenience used by callers that only need the set of addresses an
/// update touched, without threading `stage_node::Node` itself through.
pub fn updated_addresses(result: &ReconciliationResult) -> Vec<&Address> {
    result.updates.iter().map(|u| &u.address).collect()
}
