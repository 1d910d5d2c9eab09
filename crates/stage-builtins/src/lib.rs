//! Minimal reference leaf/composite component catalog.
//!
//! The component catalog is treated as a replaceable collaborator elsewhere
//! in the workspace; this crate is a usable stand-in, kept intentionally
//! thin so paint, reconcile, and session have concrete views to elaborate
//! and test against.

mod composites;
mod leaves;

pub use composites::{HStack, Panel, VStack};
pub use leaves::{Badge, Button, Code, Divider, Note, Progress, Selector, Spacer, Spinner, Text, TextField};

pub use stage_view::{group, Group};
