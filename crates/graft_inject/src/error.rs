//! Errors returned by graph registration and resolution.

use core::fmt;

/// An object that was still incomplete when resolution gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingObject {
    /// Rendered object (type and name).
    pub object: String,
    /// Fields that could not be resolved, with their declared types.
    pub fields: Vec<PendingField>,
}

/// A field that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingField {
    /// The field name.
    pub field: &'static str,
    /// The field's declared type.
    pub wanted: &'static str,
}

impl fmt::Display for PendingObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.object)?;
        if !self.fields.is_empty() {
            let fields = self
                .fields
                .iter()
                .map(|field| format!("{}: {}", field.field, field.wanted))
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, " [{fields}]")?;
        }
        Ok(())
    }
}

/// Renders a list of pending objects as `a; b; c`.
fn render_pending(pending: &[PendingObject]) -> String {
    pending
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur while building or resolving a graph.
///
/// Every variant carries the field, the declaring type and the competing or
/// requested targets, so the message is actionable without re-running the
/// resolver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InjectError {
    /// Two objects were registered under the same name.
    #[error("provided two instances named {name:?}: {existing} and {provided}")]
    DuplicateName {
        /// The contested name.
        name: String,
        /// The object already holding the name.
        existing: String,
        /// The object that was rejected.
        provided: String,
    },

    /// A standard field matched more than one candidate.
    #[error(
        "found {} assignable values for field {field} ({wanted}) in type {owner}: {}",
        .candidates.len(),
        .candidates.join(", ")
    )]
    AmbiguousDependency {
        /// The field being resolved.
        field: &'static str,
        /// The type declaring the field.
        owner: &'static str,
        /// The field's declared type.
        wanted: &'static str,
        /// Every matching object.
        candidates: Vec<String>,
    },

    /// No candidate exists for a field.
    #[error(
        "found no assignable value for field {field} ({wanted}) in type {owner}{}",
        .name
            .as_ref()
            .map(|requested| format!(": no object named {requested:?}"))
            .unwrap_or_default()
    )]
    UnsatisfiedDependency {
        /// The field being resolved.
        field: &'static str,
        /// The type declaring the field.
        owner: &'static str,
        /// The field's declared type.
        wanted: &'static str,
        /// The requested name, for named fields.
        name: Option<String>,
    },

    /// A named object exists but cannot be stored in the field.
    #[error(
        "object named {name:?} of type {found} is not assignable to field {field} ({wanted}) in type {owner}"
    )]
    TypeMismatch {
        /// The field being resolved.
        field: &'static str,
        /// The type declaring the field.
        owner: &'static str,
        /// The field's declared type.
        wanted: &'static str,
        /// The requested name.
        name: String,
        /// The type of the object registered under that name.
        found: &'static str,
    },

    /// A full sweep made no progress while incomplete objects remain.
    #[error("resolution stalled with incomplete objects: {}", render_pending(.pending))]
    StalledResolution {
        /// Every incomplete object and its unresolved fields.
        pending: Vec<PendingObject>,
    },

    /// The configured number of sweeps ran out.
    #[error(
        "resolution did not converge within {limit} sweeps: {}",
        render_pending(.pending)
    )]
    SweepLimitExceeded {
        /// The configured sweep limit.
        limit: usize,
        /// Every incomplete object and its unresolved fields.
        pending: Vec<PendingObject>,
    },

    /// A manifest names a field the type does not accept.
    #[error("type {owner} has no injectable field {field}")]
    UnknownField {
        /// The field named by the manifest.
        field: &'static str,
        /// The type declaring the manifest.
        owner: &'static str,
    },
}
