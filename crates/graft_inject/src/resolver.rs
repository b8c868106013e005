//! Fixed-point resolution.
//!
//! [`Graph::resolve`] repeatedly sweeps the incomplete objects (the working
//! set) and fills in their fields:
//!
//! | Directive | Declared type | Behaviour |
//! |-----------|---------------|-----------|
//! | standard | concrete | share the single unnamed instance, creating it on first use |
//! | standard | capability | the single unnamed value providing the capability set |
//! | private | concrete | always a fresh instance, never shared |
//! | named | either | the object registered under that name |
//!
//! Capability fields are matched once the concrete sweeps have reached their
//! fixed point, so every implementer the resolver will ever create exists by
//! then. Visiting order follows the configured
//! [`TraversalOrder`](crate::config::TraversalOrder); results do not depend
//! on it.
//!
//! Resolution fails with:
//!
//! - [`InjectError::AmbiguousDependency`] when a standard field has several
//!   candidates;
//! - [`InjectError::UnsatisfiedDependency`] when a capability field has no
//!   implementer or a named field names nothing;
//! - [`InjectError::TypeMismatch`] when a named object has the wrong type;
//! - [`InjectError::StalledResolution`] when a sweep makes no progress;
//! - [`InjectError::SweepLimitExceeded`] when the sweep budget runs out.

use crate::config::Orderer;
use crate::directive::Directive;
use crate::error::{InjectError, PendingField, PendingObject};
use crate::graph::Graph;
use crate::logger::trace_step;
use crate::object::{Object, ObjectId};
use crate::value::{AnyValue, Assignment, FieldSpec};

impl Graph {
    /// Resolves every incomplete object.
    ///
    /// Fields are filled in place, so callers holding `Shared<T>` handles
    /// observe the result. Calling `resolve` again on a resolved graph does
    /// nothing; objects provided after a successful call are resolved by the
    /// next one.
    ///
    /// # Errors
    ///
    /// See the [module documentation](crate::resolver). The graph may be
    /// partially resolved when an error is returned.
    pub fn resolve(&mut self) -> Result<(), InjectError> {
        let span = tracing::debug_span!("resolve", objects = self.objects.len());
        let _enter = span.enter();

        Resolver::new(self).run()
    }
}

/// Which fields a visit may resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Concrete, private and named fields; capability fields wait.
    Concrete,
    /// Capability fields, after the concrete fixed point.
    Capabilities,
}

/// What happened to one field during a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// The field was assigned during this visit.
    Assigned,
    /// The field already held a value.
    Satisfied,
    /// No candidate exists and none can be created.
    Blocked,
    /// The field waits for the capability phase.
    Deferred,
}

/// Summary of one object visit.
#[derive(Debug, Default)]
struct Visit {
    assigned: usize,
    blocked: usize,
    deferred: usize,
}

/// One resolution session over a graph.
struct Resolver<'g> {
    graph: &'g mut Graph,
    orderer: Orderer,
}

impl<'g> Resolver<'g> {
    fn new(graph: &'g mut Graph) -> Self {
        let orderer = graph.config.traversal().orderer();
        Self { graph, orderer }
    }

    fn run(mut self) -> Result<(), InjectError> {
        let limit = self.graph.config.max_sweeps();
        let mut sweeps = 0;

        loop {
            let mut working = self.working_set();
            if working.is_empty() {
                tracing::debug!(sweeps, "graph resolved");
                return Ok(());
            }
            if sweeps == limit {
                return Err(InjectError::SweepLimitExceeded {
                    limit,
                    pending: self.pending(),
                });
            }
            sweeps += 1;
            tracing::trace!(sweep = sweeps, working = working.len(), "sweep started");

            self.orderer.arrange(&mut working);
            let known = self.graph.objects.len();
            let mut progress = false;
            let mut blocked = false;

            for id in working {
                let visit = self.visit(id, Phase::Concrete)?;
                progress |= visit.assigned > 0 || self.graph.objects[id.0].is_complete();
                blocked |= visit.blocked > 0;
            }

            let created = self.graph.objects.len() > known;
            if blocked {
                if !(progress || created) {
                    return Err(InjectError::StalledResolution {
                        pending: self.pending(),
                    });
                }
            } else if !created {
                self.resolve_capabilities()?;
            }
        }
    }

    /// Incomplete objects, in registration order.
    fn working_set(&self) -> Vec<ObjectId> {
        self.graph
            .objects
            .iter()
            .enumerate()
            .filter(|(_, object)| !object.is_complete())
            .map(|(index, _)| ObjectId(index))
            .collect()
    }

    /// Runs the capability phase over every object still waiting on it.
    fn resolve_capabilities(&mut self) -> Result<(), InjectError> {
        let mut waiting = self.working_set();
        tracing::trace!(waiting = waiting.len(), "capability phase");
        self.orderer.arrange(&mut waiting);

        for id in waiting {
            self.visit(id, Phase::Capabilities)?;
        }
        Ok(())
    }

    /// Resolves what it can of one object's fields, completing it when
    /// nothing is left.
    fn visit(&mut self, id: ObjectId, phase: Phase) -> Result<Visit, InjectError> {
        let value = self.graph.objects[id.0].value().clone();
        let mut visit = Visit::default();

        for field in value.fields() {
            match self.resolve_field(id, &value, &field, phase)? {
                Outcome::Assigned => visit.assigned += 1,
                Outcome::Satisfied => {}
                Outcome::Blocked => visit.blocked += 1,
                Outcome::Deferred => visit.deferred += 1,
            }
        }

        if visit.blocked == 0 && visit.deferred == 0 {
            self.graph.objects[id.0].mark_complete();
            trace_step!(
                self.graph.logger.as_deref(),
                "completed {}",
                self.graph.objects[id.0]
            );
        }
        Ok(visit)
    }

    fn resolve_field(
        &mut self,
        id: ObjectId,
        value: &AnyValue,
        field: &FieldSpec,
        phase: Phase,
    ) -> Result<Outcome, InjectError> {
        if self.graph.objects[id.0].field(field.name()).is_some() {
            return Ok(Outcome::Satisfied);
        }

        let overwrite = field.directive().is_private() && self.graph.config.overwrite_private();
        if !overwrite && value.is_populated(field.name()) {
            return Ok(Outcome::Satisfied);
        }

        match field.directive() {
            Directive::Standard if field.target().is_capability() => match phase {
                Phase::Concrete => Ok(Outcome::Deferred),
                Phase::Capabilities => self.resolve_capability(id, value, field),
            },
            Directive::Standard => self.resolve_standard(id, value, field),
            Directive::Private => self.resolve_private(id, value, field),
            Directive::Named(name) => self.resolve_named(id, value, field, name),
        }
    }

    fn resolve_standard(
        &mut self,
        id: ObjectId,
        value: &AnyValue,
        field: &FieldSpec,
    ) -> Result<Outcome, InjectError> {
        let mut candidates = self.graph.candidates(field.target());
        self.orderer.arrange(&mut candidates);

        match candidates.as_slice() {
            [] => {
                let Some(created) = field.target().construct() else {
                    tracing::trace!(
                        field = field.name(),
                        owner = value.type_name(),
                        "no candidate and no default constructor"
                    );
                    return Ok(Outcome::Blocked);
                };
                let target = self.graph.provide(Object::from_erased(created))?;
                self.assign(id, value, field, target)?;
                trace_step!(
                    self.graph.logger.as_deref(),
                    "assigned new {} to field {} in {}",
                    self.graph.objects[target.0],
                    field.name(),
                    value.type_name()
                );
            }
            [target] => {
                self.assign(id, value, field, *target)?;
                trace_step!(
                    self.graph.logger.as_deref(),
                    "assigned existing {} to field {} in {}",
                    self.graph.objects[target.0],
                    field.name(),
                    value.type_name()
                );
            }
            _ => return Err(self.ambiguous(value, field, &candidates)),
        }
        Ok(Outcome::Assigned)
    }

    fn resolve_capability(
        &mut self,
        id: ObjectId,
        value: &AnyValue,
        field: &FieldSpec,
    ) -> Result<Outcome, InjectError> {
        let mut candidates = self.graph.candidates(field.target());
        self.orderer.arrange(&mut candidates);

        match candidates.as_slice() {
            [] => Err(InjectError::UnsatisfiedDependency {
                field: field.name(),
                owner: value.type_name(),
                wanted: field.target().name(),
                name: None,
            }),
            [target] => {
                self.assign(id, value, field, *target)?;
                trace_step!(
                    self.graph.logger.as_deref(),
                    "assigned {} to capability field {} in {}",
                    self.graph.objects[target.0],
                    field.name(),
                    value.type_name()
                );
                Ok(Outcome::Assigned)
            }
            _ => Err(self.ambiguous(value, field, &candidates)),
        }
    }

    fn resolve_private(
        &mut self,
        id: ObjectId,
        value: &AnyValue,
        field: &FieldSpec,
    ) -> Result<Outcome, InjectError> {
        let Some(created) = field.target().construct() else {
            return Err(InjectError::UnsatisfiedDependency {
                field: field.name(),
                owner: value.type_name(),
                wanted: field.target().name(),
                name: None,
            });
        };

        let target = self.graph.provide(Object::from_erased(created).private())?;
        self.assign(id, value, field, target)?;
        trace_step!(
            self.graph.logger.as_deref(),
            "assigned new private {} to field {} in {}",
            self.graph.objects[target.0],
            field.name(),
            value.type_name()
        );
        Ok(Outcome::Assigned)
    }

    fn resolve_named(
        &mut self,
        id: ObjectId,
        value: &AnyValue,
        field: &FieldSpec,
        name: &str,
    ) -> Result<Outcome, InjectError> {
        let Some(target) = self.graph.lookup(name) else {
            return Err(InjectError::UnsatisfiedDependency {
                field: field.name(),
                owner: value.type_name(),
                wanted: field.target().name(),
                name: Some(name.to_string()),
            });
        };

        let found = self.graph.objects[target.0].value();
        if !field.target().accepts(found.as_ref()) {
            return Err(InjectError::TypeMismatch {
                field: field.name(),
                owner: value.type_name(),
                wanted: field.target().name(),
                name: name.to_string(),
                found: found.type_name(),
            });
        }

        self.assign(id, value, field, target)?;
        trace_step!(
            self.graph.logger.as_deref(),
            "assigned {} to field {} in {}",
            self.graph.objects[target.0],
            field.name(),
            value.type_name()
        );
        Ok(Outcome::Assigned)
    }

    /// Stores `target` in the field and records the edge.
    fn assign(
        &mut self,
        id: ObjectId,
        value: &AnyValue,
        field: &FieldSpec,
        target: ObjectId,
    ) -> Result<(), InjectError> {
        let target_value = self.graph.objects[target.0].value().clone();
        match value.inject(field.name(), &target_value) {
            Assignment::Assigned => {
                self.graph.objects[id.0].record_field(field.name(), target);
                Ok(())
            }
            Assignment::Incompatible => Err(InjectError::TypeMismatch {
                field: field.name(),
                owner: value.type_name(),
                wanted: field.target().name(),
                name: self.graph.objects[target.0].to_string(),
                found: target_value.type_name(),
            }),
            Assignment::UnknownField => Err(InjectError::UnknownField {
                field: field.name(),
                owner: value.type_name(),
            }),
        }
    }

    fn ambiguous(&self, value: &AnyValue, field: &FieldSpec, candidates: &[ObjectId]) -> InjectError {
        InjectError::AmbiguousDependency {
            field: field.name(),
            owner: value.type_name(),
            wanted: field.target().name(),
            candidates: candidates
                .iter()
                .map(|id| self.graph.objects[id.0].to_string())
                .collect(),
        }
    }

    /// Incomplete objects and the fields they are still missing.
    fn pending(&self) -> Vec<PendingObject> {
        self.graph
            .objects
            .iter()
            .filter(|object| !object.is_complete())
            .map(|object| PendingObject {
                object: object.to_string(),
                fields: object
                    .value()
                    .fields()
                    .into_iter()
                    .filter(|field| {
                        object.field(field.name()).is_none()
                            && !object.value().is_populated(field.name())
                    })
                    .map(|field| PendingField {
                        field: field.name(),
                        wanted: field.target().name(),
                    })
                    .collect(),
            })
            .collect()
    }
}
