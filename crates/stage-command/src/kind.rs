//! The closed set of node kinds.

/// Tag identifying what a node represents. Closed set — adding a variant is
/// a breaking change for every `match` in the workspace, which is the point:
/// paint, reconcile, and the event backend all dispatch on this exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NodeKind {
    Text,
    Panel,
    HStack,
    VStack,
    Divider,
    Spacer,
    Badge,
    Note,
    Code,
    TextField,
    Button,
    Selector,
    Progress,
    Spinner,
    /// Transparent: never appears in a finalized tree handed to paint or the
    /// reconciler. Its parent flattens it away during elaboration.
    Group,
}

impl NodeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Text => "text",
            NodeKind::Panel => "panel",
            NodeKind::HStack => "hstack",
            NodeKind::VStack => "vstack",
            NodeKind::Divider => "divider",
            NodeKind::Spacer => "spacer",
            NodeKind::Badge => "badge",
            NodeKind::Note => "note",
            NodeKind::Code => "code",
            NodeKind::TextField => "textfield",
            NodeKind::Button => "button",
            NodeKind::Selector => "selector",
            NodeKind::Progress => "progress",
            NodeKind::Spinner => "spinner",
            NodeKind::Group => "group",
        }
    }

    pub const fn is_group(self) -> bool {
        matches!(self, NodeKind::Group)
    }
}
