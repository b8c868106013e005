//! Graph nodes.
//!
//! An [`Object`] wraps one shared value together with an optional name, a
//! completion flag and the edges recorded while its fields were resolved.
//! Edges point at other objects by [`ObjectId`]; the [`Graph`] owns every
//! node.
//!
//! [`Graph`]: crate::graph::Graph

use core::any::TypeId;
use core::fmt;

use hashbrown::HashMap;

use crate::value::{AnyValue, Injectable, Shared};

/// Identifier of an object within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    /// Returns the raw index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object_{}", self.0)
    }
}

/// A value registered in a graph.
///
/// # Example
///
/// ```
/// use graft_inject::prelude::*;
///
/// #[derive(Default, Injectable)]
/// struct Pool {
///     size: usize,
/// }
///
/// let pool = shared(Pool { size: 4 });
/// let object = Object::new(pool.clone()).named("primary pool").complete();
///
/// assert_eq!(object.name(), Some("primary pool"));
/// assert!(object.is_complete());
/// assert!(object.to_string().ends_with("named \"primary pool\""));
/// ```
pub struct Object {
    value: AnyValue,
    name: Option<String>,
    complete: bool,
    private: bool,
    fields: HashMap<&'static str, ObjectId>,
}

impl Object {
    /// Wraps a shared value. The object starts unnamed and incomplete.
    #[must_use]
    pub fn new<T: Injectable>(value: Shared<T>) -> Self {
        Self::from_erased(value)
    }

    /// Wraps an already type-erased value.
    #[must_use]
    pub fn from_erased(value: AnyValue) -> Self {
        Self {
            value,
            name: None,
            complete: false,
            private: false,
            fields: HashMap::new(),
        }
    }

    /// Makes the object addressable by `name`.
    ///
    /// Named objects are only reachable through named fields; they are never
    /// candidates for type-based matching. An empty name leaves the object
    /// unnamed.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into()).filter(|name| !name.is_empty());
        self
    }

    /// Marks the object as fully constructed so its fields are never scanned.
    #[must_use]
    pub fn complete(mut self) -> Self {
        self.complete = true;
        self
    }

    /// Marks the object as created for a private field.
    pub(crate) fn private(mut self) -> Self {
        self.private = true;
        self
    }

    /// Returns the type-erased value.
    #[must_use]
    pub fn value(&self) -> &AnyValue {
        &self.value
    }

    /// Returns the value as `Shared<T>` if it has that concrete type.
    #[must_use]
    pub fn downcast<T: Injectable>(&self) -> Option<Shared<T>> {
        self.value
            .clone()
            .downcast_arc::<parking_lot::RwLock<T>>()
            .ok()
    }

    /// Returns the [`TypeId`] of the value.
    #[must_use]
    pub fn value_type(&self) -> TypeId {
        self.value.value_type()
    }

    /// Returns the value's type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.value.type_name()
    }

    /// Returns the object's name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` once every field has been resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Returns `true` if the resolver created this object for a private field.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.private
    }

    /// Returns the object satisfying `field`, if the resolver assigned it.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<ObjectId> {
        self.fields.get(field).copied()
    }

    /// Returns every recorded edge, sorted by field name.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, ObjectId)> {
        let mut fields: Vec<_> = self.fields.iter().map(|(name, id)| (*name, *id)).collect();
        fields.sort_unstable();
        fields
    }

    pub(crate) fn mark_complete(&mut self) {
        self.complete = true;
    }

    pub(crate) fn record_field(&mut self, field: &'static str, target: ObjectId) {
        self.fields.insert(field, target);
    }
}

/// Renders the value type, then the name when present.
impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())?;
        if let Some(name) = &self.name {
            write!(f, " named {name:?}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("type", &self.type_name())
            .field("name", &self.name)
            .field("complete", &self.complete)
            .field("private", &self.private)
            .field("fields", &self.fields())
            .finish()
    }
}
