//! Stable hierarchical addressing.
//!
//! An [`Address`] is the dotted path assigned to a node during elaboration
//! (see `stage-view`'s `RenderContext::make_address`). It is the sole
//! identity carried by commands, nodes, and reconciliation results — there is
//! no parallel numeric id.

use std::fmt;

/// A stable, dotted path identifying a node within a tree, e.g. `root.panel.text[1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address(String);

impl Address {
    /// Wraps an already-formatted dotted path. Callers that need to *build*
    /// one segment at a time should go through `RenderContext::make_address`
    /// instead of constructing this directly.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Appends a child segment, producing the dotted path a nested context
    /// would compute for that segment (no sibling-counter suffix).
    pub fn join(&self, segment: &str) -> Self {
        if self.0.is_empty() {
            Self(segment.to_string())
        } else {
            Self(format!("{}.{}", self.0, segment))
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
