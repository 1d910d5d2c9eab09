//! Heterogeneous, type-safe property bag.
//!
//! A key is a name *plus* the value type it's supposed to hold
//! ([`PropertyKey<T>`]); retrieval downcasts the stored [`PropertyValue`] and
//! returns `None` both when the name is absent and when it's present but
//! holds a different variant. Lookup is therefore total: there is no
//! "wrong type" error, only absence.
//!
//! [`Properties`] is a persistent, copy-on-write value: `with()` returns a
//! new container sharing storage with the original until a write actually
//! diverges them, via `Arc::make_mut`.

use stage_command::Color;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// The finite set of value shapes a property can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Color(Color),
    StringList(Vec<String>),
    IntList(Vec<i64>),
}

/// A typed handle for a named property. `T` is phantom: it only constrains
/// which [`FromPropertyValue`] impl `Properties::get` uses.
pub struct PropertyKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

// Manual impls: `#[derive]` would require `T: Clone`/`Copy`, which most value
// types here don't need to satisfy since the marker never holds a `T`.
impl<T> Clone for PropertyKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for PropertyKey<T> {}

impl<T> PropertyKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Converts between a Rust value and its [`PropertyValue`] representation.
/// Implemented for every type a property can hold.
pub trait FromPropertyValue: Sized {
    fn from_value(value: &PropertyValue) -> Option<Self>;
    fn into_value(self) -> PropertyValue;
}

impl FromPropertyValue for String {
    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
    fn into_value(self) -> PropertyValue {
        PropertyValue::Str(self)
    }
}

impl FromPropertyValue for i64 {
    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Int(n) => Some(*n),
            _ => None,
        }
    }
    fn into_value(self) -> PropertyValue {
        PropertyValue::Int(self)
    }
}

impl FromPropertyValue for bool {
    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
    fn into_value(self) -> PropertyValue {
        PropertyValue::Bool(self)
    }
}

impl FromPropertyValue for Color {
    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Color(c) => Some(*c),
            _ => None,
        }
    }
    fn into_value(self) -> PropertyValue {
        PropertyValue::Color(self)
    }
}

impl FromPropertyValue for Vec<String> {
    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::StringList(v) => Some(v.clone()),
            _ => None,
        }
    }
    fn into_value(self) -> PropertyValue {
        PropertyValue::StringList(self)
    }
}

impl FromPropertyValue for Vec<i64> {
    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::IntList(v) => Some(v.clone()),
            _ => None,
        }
    }
    fn into_value(self) -> PropertyValue {
        PropertyValue::IntList(self)
    }
}

/// Persistent, copy-on-write mapping from property name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties(Arc<HashMap<&'static str, PropertyValue>>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new container with `key` set to `value`, sharing storage
    /// with `self` until this call forces a divergent clone.
    pub fn with<T: FromPropertyValue>(mut self, key: PropertyKey<T>, value: T) -> Self {
        Arc::make_mut(&mut self.0).insert(key.name(), value.into_value());
        self
    }

    /// Total lookup: absent or type-mismatched keys both yield `None`;
    /// callers apply their own neutral default.
    pub fn get<T: FromPropertyValue>(&self, key: PropertyKey<T>) -> Option<T> {
        self.0.get(key.name()).and_then(T::from_value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE: PropertyKey<String> = PropertyKey::new("title");
    const WIDTH: PropertyKey<i64> = PropertyKey::new("width");

    #[test]
    fn with_then_get_round_trips() {
        let props = Properties::new().with(TITLE, "hello".to_string());
        assert_eq!(props.get(TITLE), Some("hello".to_string()));
    }

    #[test]
    fn absent_key_is_none() {
        let props = Properties::new();
        assert_eq!(props.get(TITLE), None);
    }

    #[test]
    fn type_mismatch_is_none_not_error() {
        let props = Properties::new().with(TITLE, "hello".to_string());
        assert_eq!(props.get(WIDTH), None);
    }

    #[test]
    fn with_is_copy_on_write() {
        let base = Properties::new().with(WIDTH, 10);
        let updated = base.clone().with(WIDTH, 20);
        assert_eq!(base.get(WIDTH), Some(10));
        assert_eq!(updated.get(WIDTH), Some(20));
    }

    #[test]
    fn equality_is_by_value() {
        let a = Properties::new().with(TITLE, "x".to_string());
        let b = Properties::new().with(TITLE, "x".to_string());
        assert_eq!(a, b);
    }
}
