//! The object store.
//!
//! A [`Graph`] owns every [`Object`] of one resolution session. Objects are
//! partitioned into:
//!
//! - **named** objects, addressable by exact name (names are unique);
//! - **unnamed** objects, the candidates for type-based matching.
//!
//! Objects are never removed; the store is discarded by dropping it.
//!
//! # Example
//!
//! ```
//! use graft_inject::prelude::*;
//!
//! #[derive(Default, Injectable)]
//! struct Answer {
//!     answer: i32,
//! }
//!
//! #[derive(Default, Injectable)]
//! struct Nested {
//!     #[inject]
//!     answer: Dep<Answer>,
//! }
//!
//! #[derive(Default, Injectable)]
//! struct Root {
//!     #[inject]
//!     answer: Dep<Answer>,
//!     #[inject]
//!     nested: Dep<Nested>,
//! }
//!
//! let answer = shared(Answer::default());
//! let nested = shared(Nested::default());
//! let root = shared(Root::default());
//!
//! let mut graph = Graph::new();
//! graph.provide_all([
//!     Object::new(answer.clone()),
//!     Object::new(nested.clone()),
//!     Object::new(root.clone()),
//! ])?;
//! graph.resolve()?;
//!
//! assert!(root.read().answer.points_to(&answer));
//! assert!(nested.read().answer.points_to(&answer));
//! assert!(root.read().nested.points_to(&nested));
//! # Ok::<(), graft_inject::error::InjectError>(())
//! ```

use hashbrown::HashMap;

use crate::config::ResolverConfig;
use crate::error::InjectError;
use crate::logger::{Logger, trace_step};
use crate::object::{Object, ObjectId};
use crate::value::TypeToken;

/// Container for the objects of one resolution session.
#[derive(Default)]
pub struct Graph {
    /// Every object, indexed by [`ObjectId`].
    pub(crate) objects: Vec<Object>,
    /// Objects without a name, in registration order.
    pub(crate) unnamed: Vec<ObjectId>,
    /// Name partition.
    pub(crate) named: HashMap<String, ObjectId>,
    /// Resolution settings.
    pub(crate) config: ResolverConfig,
    /// Optional diagnostic sink.
    pub(crate) logger: Option<Box<dyn Logger>>,
}

impl Graph {
    /// Creates an empty graph with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with the given configuration.
    #[must_use]
    pub fn with_config(config: ResolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Installs a diagnostic sink.
    #[must_use]
    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(Box::new(logger));
        self
    }

    /// Returns the resolver configuration.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Registers an object.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::DuplicateName`] if another object already uses
    /// the same name. The graph is left unchanged in that case.
    pub fn provide(&mut self, object: Object) -> Result<ObjectId, InjectError> {
        let id = ObjectId(self.objects.len());

        match object.name() {
            Some(name) => {
                if let Some(existing) = self.named.get(name) {
                    return Err(InjectError::DuplicateName {
                        name: name.to_string(),
                        existing: self.objects[existing.0].to_string(),
                        provided: object.to_string(),
                    });
                }
                self.named.insert(name.to_string(), id);
            }
            None => self.unnamed.push(id),
        }

        trace_step!(self.logger.as_deref(), "provided {}", object);
        self.objects.push(object);
        Ok(id)
    }

    /// Registers several objects in order.
    ///
    /// # Errors
    ///
    /// Stops at the first [`InjectError::DuplicateName`]; objects registered
    /// before the failing one stay in the graph.
    pub fn provide_all<I>(&mut self, objects: I) -> Result<Vec<ObjectId>, InjectError>
    where
        I: IntoIterator<Item = Object>,
    {
        objects
            .into_iter()
            .map(|object| self.provide(object))
            .collect()
    }

    /// Returns the object registered under `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        self.named.get(name).copied()
    }

    /// Returns the object with the given id.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0)
    }

    /// Returns every unnamed, shareable object whose value fits `token`.
    ///
    /// Concrete tokens match by type identity; capability tokens match every
    /// value that provides the capability set. Objects created for private
    /// fields are never candidates.
    #[must_use]
    pub fn candidates(&self, token: &TypeToken) -> Vec<ObjectId> {
        self.unnamed
            .iter()
            .copied()
            .filter(|id| {
                let object = &self.objects[id.0];
                !object.is_private() && token.accepts(object.value().as_ref())
            })
            .collect()
    }

    /// Returns every object, named and unnamed.
    ///
    /// The order is not stable: with a shuffled traversal order it changes
    /// from call to call.
    #[must_use]
    pub fn objects(&self) -> Vec<&Object> {
        let mut objects: Vec<&Object> = self.objects.iter().collect();
        self.config.traversal().orderer().arrange(&mut objects);
        objects
    }

    /// Returns the number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if no object has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns `true` once every object is complete.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.objects.iter().all(Object::is_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TraversalOrder;
    use crate::value::{Assignment, AnyValue, FieldSpec, Injectable, shared};

    #[derive(Default)]
    struct Leaf;

    impl Injectable for Leaf {
        fn fields() -> Vec<FieldSpec> {
            Vec::new()
        }

        fn construct() -> Option<Self> {
            Some(Self)
        }

        fn is_populated(&self, _field: &str) -> bool {
            false
        }

        fn inject(&mut self, _field: &str, _value: &AnyValue) -> Assignment {
            Assignment::UnknownField
        }
    }

    #[test]
    fn provide_partitions_by_name() {
        let mut graph = Graph::new();
        let unnamed = graph.provide(Object::new(shared(Leaf))).unwrap();
        let named = graph
            .provide(Object::new(shared(Leaf)).named("leaf"))
            .unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.lookup("leaf"), Some(named));
        assert_eq!(graph.lookup("missing"), None);
        assert_eq!(
            graph.candidates(&TypeToken::concrete::<Leaf>()),
            vec![unnamed]
        );
    }

    #[test]
    fn duplicate_name_is_rejected_without_side_effects() {
        let mut graph = Graph::new();
        graph
            .provide(Object::new(shared(Leaf)).named("leaf"))
            .unwrap();

        let err = graph
            .provide(Object::new(shared(Leaf)).named("leaf"))
            .unwrap_err();

        assert!(matches!(err, InjectError::DuplicateName { ref name, .. } if name == "leaf"));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn empty_names_are_unnamed() {
        let mut graph = Graph::new();
        let ids = graph
            .provide_all([
                Object::new(shared(Leaf)).named(""),
                Object::new(shared(Leaf)).named(""),
            ])
            .unwrap();

        assert_eq!(graph.lookup(""), None);
        assert_eq!(graph.candidates(&TypeToken::concrete::<Leaf>()), ids);
        assert_eq!(ids[0].index(), 0);
        assert_eq!(ids[1].index(), 1);
    }

    #[test]
    fn provide_all_stops_at_first_error() {
        let mut graph = Graph::new();
        let result = graph.provide_all([
            Object::new(shared(Leaf)).named("a"),
            Object::new(shared(Leaf)).named("a"),
            Object::new(shared(Leaf)),
        ]);

        assert!(result.is_err());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn private_objects_are_not_candidates() {
        let mut graph = Graph::new();
        graph
            .provide(Object::new(shared(Leaf)).private())
            .unwrap();

        assert!(graph.candidates(&TypeToken::concrete::<Leaf>()).is_empty());
    }

    #[test]
    fn objects_enumerates_both_partitions() {
        let mut graph = Graph::with_config(
            ResolverConfig::new().with_traversal(TraversalOrder::Shuffled),
        );
        graph
            .provide_all((0..8).map(|i| {
                let object = Object::new(shared(Leaf));
                if i % 2 == 0 {
                    object.named(format!("leaf {i}"))
                } else {
                    object
                }
            }))
            .unwrap();

        assert_eq!(graph.objects().len(), 8);
        let named = graph.objects().iter().filter(|o| o.name().is_some()).count();
        assert_eq!(named, 4);
    }

    #[test]
    fn config_is_kept() {
        let graph = Graph::with_config(
            ResolverConfig::new()
                .with_traversal(TraversalOrder::Seeded(9))
                .with_max_sweeps(4),
        );

        assert_eq!(graph.config().traversal(), TraversalOrder::Seeded(9));
        assert_eq!(graph.config().max_sweeps(), 4);
        assert!(!graph.config().overwrite_private());
    }

    #[test]
    fn empty_graph_is_resolved() {
        let graph = Graph::new();
        assert!(graph.is_empty());
        assert!(graph.is_resolved());
    }
}
