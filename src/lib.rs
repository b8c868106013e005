//! Object-graph dependency injection for Rust.
//!
//! Hand `graft` a set of values, and it fills in their `#[inject]` fields:
//! shared singletons by type, fresh private instances, objects registered
//! under a name, and trait objects matched against whatever provides them.
//!
//! ```
//! use graft::prelude::*;
//!
//! #[derive(Default, Injectable)]
//! struct Answer {
//!     answer: i32,
//! }
//!
//! #[derive(Default, Injectable)]
//! struct Question {
//!     #[inject]
//!     answer: Dep<Answer>,
//! }
//!
//! let question = shared(Question::default());
//! populate(question.clone())?;
//!
//! assert_eq!(question.read().answer.read().answer, 0);
//! # Ok::<(), graft::graft_inject::error::InjectError>(())
//! ```

pub use graft_inject;

pub use graft_inject::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use graft_inject::prelude::*;
}
