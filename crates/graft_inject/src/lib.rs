//! Object-graph dependency injection.
//!
//! `graft_inject` fills the dependency fields of caller-supplied values by
//! matching them against the other values in a [`Graph`](graph::Graph):
//!
//! - [`directive`] - how a field asks for its dependency
//! - [`value`] - shared values, dependency slots and type manifests
//! - [`object`] - graph nodes
//! - [`graph`] - the object store
//! - [`resolver`] - fixed-point resolution
//! - [`populate`](mod@populate) - one-call construction
//! - [`config`] - resolver settings
//! - [`error`] - registration and resolution errors
//! - [`logger`] - optional diagnostic sink
//!
//! # Example
//!
//! ```
//! use graft_inject::prelude::*;
//!
//! #[capability]
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! #[derive(Default, Injectable)]
//! #[injectable(provides(Greeter))]
//! struct English;
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! #[derive(Default, Injectable)]
//! struct Config {
//!     punctuation: String,
//! }
//!
//! #[derive(Default, Injectable)]
//! struct App {
//!     #[inject]
//!     greeter: Dep<dyn Greeter>,
//!     #[inject(name = "config")]
//!     config: Dep<Config>,
//!     #[inject(private)]
//!     scratch: Dep<Config>,
//! }
//!
//! let app = shared(App::default());
//! let config = shared(Config { punctuation: "!".into() });
//!
//! let mut graph = Graph::new();
//! graph.provide(Object::new(shared(English)))?;
//! graph.provide(Object::new(config.clone()).named("config"))?;
//! graph.provide(Object::new(app.clone()))?;
//! graph.resolve()?;
//!
//! let app = app.read();
//! let line = format!("{}{}", app.greeter.read().greet(), app.config.read().punctuation);
//! assert_eq!(line, "hello!");
//! assert!(!app.scratch.points_to(&config));
//! # Ok::<(), graft_inject::error::InjectError>(())
//! ```

// Self-reference so derive output can use `graft_inject::` paths inside this
// crate.
extern crate self as graft_inject;

/// Resolver settings.
pub mod config;

/// Field directives.
pub mod directive;

/// Registration and resolution errors.
pub mod error;

/// The object store.
pub mod graph;

/// Optional diagnostic sink.
pub mod logger;

/// Graph nodes.
pub mod object;

/// One-call graph construction.
pub mod populate;

/// Fixed-point resolution.
pub mod resolver;

/// Shared values, dependency slots and type manifests.
pub mod value;

/// Re-export the `Injectable` derive and the `#[capability]` attribute.
pub use graft_inject_macros::{Injectable, capability};

pub use populate::{populate, populate_with};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::config::{ResolverConfig, TraversalOrder};
    pub use crate::directive::Directive;
    pub use crate::error::InjectError;
    pub use crate::graph::Graph;
    pub use crate::logger::Logger;
    pub use crate::object::{Object, ObjectId};
    pub use crate::populate::{IntoObjects, populate, populate_with};
    pub use crate::value::{Dep, Injectable, Shared, shared};
    pub use crate::{Injectable, capability};
}
