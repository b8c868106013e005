//! One-call graph construction.
//!
//! [`populate`] registers every value as an unnamed object, resolves, and
//! drops the graph. The caller keeps its `Shared<T>` handles and sees the
//! filled-in fields.
//!
//! ```
//! use graft_inject::prelude::*;
//!
//! #[derive(Default, Injectable)]
//! struct Settings {
//!     verbose: bool,
//! }
//!
//! #[derive(Default, Injectable)]
//! struct Service {
//!     #[inject]
//!     settings: Dep<Settings>,
//! }
//!
//! let settings = shared(Settings { verbose: true });
//! let service = shared(Service::default());
//!
//! populate((settings.clone(), service.clone()))?;
//!
//! assert!(service.read().settings.points_to(&settings));
//! assert!(service.read().settings.read().verbose);
//! # Ok::<(), graft_inject::error::InjectError>(())
//! ```

use variadics_please::all_tuples;

use crate::config::ResolverConfig;
use crate::error::InjectError;
use crate::graph::Graph;
use crate::object::Object;
use crate::value::{Injectable, Shared};

// ─────────────────────────────────────────────────────────────────────────────
// IntoObjects Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Values that can be handed to [`populate`].
///
/// Implemented for `Shared<T>`, for [`Object`] (to pass named or complete
/// objects), and for tuples of up to 16 of either.
pub trait IntoObjects {
    /// Converts `self` into graph objects, in order.
    fn into_objects(self) -> Vec<Object>;
}

impl<T: Injectable> IntoObjects for Shared<T> {
    fn into_objects(self) -> Vec<Object> {
        vec![Object::new(self)]
    }
}

impl IntoObjects for Object {
    fn into_objects(self) -> Vec<Object> {
        vec![self]
    }
}

macro_rules! impl_into_objects_for_tuple {
    ($($V:ident),*) => {
        impl<$($V: IntoObjects),*> IntoObjects for ($($V,)*) {
            #[expect(non_snake_case, reason = "bindings reuse the tuple type parameter names")]
            fn into_objects(self) -> Vec<Object> {
                let ($($V,)*) = self;
                let mut objects = Vec::new();
                $(objects.extend($V.into_objects());)*
                objects
            }
        }
    };
}

all_tuples!(impl_into_objects_for_tuple, 1, 16, V);

// ─────────────────────────────────────────────────────────────────────────────
// Entry points
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a graph from `values` with the default configuration and resolves
/// it.
///
/// # Errors
///
/// Any error from [`Graph::provide`] or [`Graph::resolve`].
pub fn populate(values: impl IntoObjects) -> Result<(), InjectError> {
    populate_with(ResolverConfig::default(), values)
}

/// Like [`populate`], with an explicit configuration.
///
/// # Errors
///
/// Any error from [`Graph::provide`] or [`Graph::resolve`].
pub fn populate_with(config: ResolverConfig, values: impl IntoObjects) -> Result<(), InjectError> {
    let mut graph = Graph::with_config(config);
    graph.provide_all(values.into_objects())?;
    graph.resolve()
}
