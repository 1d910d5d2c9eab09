//! Property container and node/address data model.

pub mod keys;
mod node;
mod properties;

pub use node::Node;
pub use properties::{FromPropertyValue, PropertyKey, PropertyValue, Properties};

pub use stage_command::{Address, NodeKind};
