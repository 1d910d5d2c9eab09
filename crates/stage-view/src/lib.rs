//! View trait, elaboration context, and the `Group` flattening combinator.

mod context;
mod options;
mod view;

pub use context::RenderContext;
pub use options::SessionOptions;
pub use view::{flatten_child, group, Group, View};
