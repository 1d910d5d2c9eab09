use stage_command::Address;
use stage_node::Node;

/// A node whose own data (kind, properties, or `logical_id`) changed between
/// frames; `node` is the new value, ready to hand to a paint pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub address: Address,
    pub node: Node,
}

/// A matched node that moved to a different address within its parent —
/// same `diff_key`, different position.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub from: Address,
    pub to: Address,
}

/// The complete set of structural changes between two trees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationResult {
    pub insertions: Vec<Node>,
    pub updates: Vec<Update>,
    pub moves: Vec<Move>,
    pub deletions: Vec<Address>,
    /// `false` iff every field above is empty; spares callers from writing
    /// `insertions.is_empty() && ...` at every call site.
    pub has_changes: bool,
}
