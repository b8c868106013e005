//! Values, dependency slots and type manifests.
//!
//! Rust has no runtime reflection, so every type that takes part in a graph
//! describes itself through a static manifest:
//!
//! - [`Injectable`] - implemented (usually derived) by concrete types. Lists
//!   the injectable fields ([`FieldSpec`]), the capability sets the type
//!   provides ([`Capability`]), and how to default-construct it.
//! - [`Target`] - anything a field may point at: every [`Injectable`] type,
//!   plus `dyn Trait` for traits marked `#[capability]`.
//! - [`Slot`] - a field that can hold a dependency: [`Dep<T>`] or
//!   `Option<Shared<T>>`.
//! - [`ErasedValue`] - the object-safe view the resolver works with.
//!
//! Values live behind [`Shared<T>`] (`Arc<RwLock<T>>`) so the caller keeps a
//! handle and observes the fields the resolver fills in.

use core::any::{Any, TypeId};
use core::fmt;
use std::sync::Arc;

use downcast_rs::{DowncastSync, impl_downcast};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directive::Directive;

/// A value shared between the caller and the graph.
pub type Shared<T> = Arc<RwLock<T>>;

/// A type-erased [`Shared`] value.
pub type AnyValue = Arc<dyn ErasedValue>;

/// Wraps a value so it can be handed to a graph.
///
/// # Example
///
/// ```
/// use graft_inject::value::shared;
///
/// let counter = shared(0_u32);
/// *counter.write() += 1;
/// assert_eq!(*counter.read(), 1);
/// ```
#[must_use]
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(RwLock::new(value))
}

// ─────────────────────────────────────────────────────────────────────────────
// Injectable
// ─────────────────────────────────────────────────────────────────────────────

/// Result of assigning a resolved value to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// The field now holds the value.
    Assigned,
    /// The value is not compatible with the field's declared type.
    Incompatible,
    /// The type has no injectable field with that name.
    UnknownField,
}

/// A concrete type that can live in an object graph.
///
/// Use `#[derive(Injectable)]` rather than implementing this by hand:
///
/// ```
/// use graft_inject::prelude::*;
///
/// #[derive(Default, Injectable)]
/// struct Database {
///     url: String,
/// }
///
/// #[derive(Default, Injectable)]
/// struct Repository {
///     #[inject]
///     db: Dep<Database>,
///     cache_hits: u64,
/// }
///
/// let fields = Repository::fields();
/// assert_eq!(fields.len(), 1);
/// assert_eq!(fields[0].name(), "db");
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Returns one entry per injectable field, in declaration order.
    fn fields() -> Vec<FieldSpec>;

    /// Returns the capability sets this type provides.
    fn capabilities() -> Vec<Capability> {
        Vec::new()
    }

    /// Creates a fresh instance for synthesized nodes.
    ///
    /// `None` means the type cannot be created by the resolver and must be
    /// provided by the caller.
    fn construct() -> Option<Self>;

    /// Returns `true` if the named field already holds a value.
    fn is_populated(&self, field: &str) -> bool;

    /// Stores `value` in the named field.
    fn inject(&mut self, field: &str, value: &AnyValue) -> Assignment;
}

// ─────────────────────────────────────────────────────────────────────────────
// Erased values
// ─────────────────────────────────────────────────────────────────────────────

/// Object-safe view of a [`Shared`] injectable value.
///
/// Implemented for `RwLock<T>` for every [`Injectable`] `T`, so any
/// `Shared<T>` coerces into an [`AnyValue`]. Only [`is_populated`] and
/// [`inject`] take the lock, and never while holding another one.
///
/// [`is_populated`]: ErasedValue::is_populated
/// [`inject`]: ErasedValue::inject
pub trait ErasedValue: DowncastSync {
    /// Returns the [`TypeId`] of the wrapped value.
    fn value_type(&self) -> TypeId;

    /// Returns the wrapped value's type name.
    fn type_name(&self) -> &'static str;

    /// Returns the manifest of the wrapped type.
    fn fields(&self) -> Vec<FieldSpec>;

    /// Returns the capability sets the wrapped type provides.
    fn capabilities(&self) -> Vec<Capability>;

    /// Returns `true` if the named field already holds a value.
    fn is_populated(&self, field: &str) -> bool;

    /// Stores `value` in the named field.
    fn inject(&self, field: &str, value: &AnyValue) -> Assignment;
}

impl_downcast!(sync ErasedValue);

impl<T: Injectable> ErasedValue for RwLock<T> {
    fn value_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }

    fn fields(&self) -> Vec<FieldSpec> {
        T::fields()
    }

    fn capabilities(&self) -> Vec<Capability> {
        T::capabilities()
    }

    fn is_populated(&self, field: &str) -> bool {
        self.read().is_populated(field)
    }

    fn inject(&self, field: &str, value: &AnyValue) -> Assignment {
        self.write().inject(field, value)
    }
}

/// Default-constructs `T` behind a fresh lock.
fn construct_erased<T: Injectable>() -> Option<AnyValue> {
    T::construct().map(|value| shared(value) as AnyValue)
}

// ─────────────────────────────────────────────────────────────────────────────
// Capabilities
// ─────────────────────────────────────────────────────────────────────────────

type Upcast = dyn Fn(&AnyValue) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync;

/// A capability set (trait object type) provided by a concrete type.
///
/// Generated by `#[injectable(provides(Trait))]`; the upcast turns a
/// `Shared<T>` into a `Shared<dyn Trait>` pointing at the same value.
#[derive(Clone)]
pub struct Capability {
    id: TypeId,
    name: &'static str,
    upcast: Arc<Upcast>,
}

impl Capability {
    /// Declares that `T` provides the capability set `C`.
    ///
    /// The coercion itself is supplied by the caller because only code that
    /// names both types can perform it:
    ///
    /// ```
    /// use graft_inject::prelude::*;
    /// use graft_inject::value::Capability;
    ///
    /// #[capability]
    /// trait Clock: Send + Sync {
    ///     fn now(&self) -> u64;
    /// }
    ///
    /// #[derive(Default, Injectable)]
    /// struct FixedClock;
    ///
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> u64 {
    ///         7
    ///     }
    /// }
    ///
    /// let capability = Capability::new::<dyn Clock, FixedClock>(
    ///     |clock: Shared<FixedClock>| -> Shared<dyn Clock> { clock },
    /// );
    /// assert!(capability.name().contains("Clock"));
    /// ```
    #[must_use]
    pub fn new<C, T>(upcast: fn(Shared<T>) -> Shared<C>) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
        T: Injectable,
    {
        Self {
            id: TypeId::of::<C>(),
            name: core::any::type_name::<C>(),
            upcast: Arc::new(move |value: &AnyValue| {
                let concrete = value.clone().downcast_arc::<RwLock<T>>().ok()?;
                Some(Box::new(upcast(concrete)) as Box<dyn Any + Send + Sync>)
            }),
        }
    }

    /// Returns the [`TypeId`] of the capability's trait object type.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the capability's type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Views `value` as the capability set `C`, if its type provides it.
///
/// Used by the `#[capability]` attribute to implement [`Target::cast`].
#[must_use]
pub fn cast_capability<C>(value: &AnyValue) -> Option<Shared<C>>
where
    C: ?Sized + Send + Sync + 'static,
{
    let id = TypeId::of::<C>();
    let capability = value.capabilities().into_iter().find(|cap| cap.id == id)?;
    let upcast = (capability.upcast)(value)?;
    upcast.downcast::<Shared<C>>().ok().map(|boxed| *boxed)
}

// ─────────────────────────────────────────────────────────────────────────────
// Type tokens
// ─────────────────────────────────────────────────────────────────────────────

/// What kind of type a [`TypeToken`] stands for.
#[derive(Debug, Clone, Copy)]
enum TokenKind {
    /// A concrete [`Injectable`] type, matched by type identity.
    Concrete {
        /// Creates a fresh erased instance, if the type allows it.
        construct: fn() -> Option<AnyValue>,
    },
    /// A capability set, matched by any value that provides it.
    Capability,
}

/// Runtime stand-in for a field's declared type.
#[derive(Debug, Clone, Copy)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
    kind: TokenKind,
}

impl TypeToken {
    /// Token for the concrete type `T`.
    #[must_use]
    pub fn concrete<T: Injectable>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
            kind: TokenKind::Concrete {
                construct: construct_erased::<T>,
            },
        }
    }

    /// Token for the capability set `C` (a `dyn Trait` type).
    #[must_use]
    pub fn capability<C: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: core::any::type_name::<C>(),
            kind: TokenKind::Capability,
        }
    }

    /// Returns the [`TypeId`] of the declared type.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the declared type's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` for capability-set tokens.
    #[must_use]
    pub fn is_capability(&self) -> bool {
        matches!(self.kind, TokenKind::Capability)
    }

    /// Returns `true` if `value` can be stored in a field of this type.
    #[must_use]
    pub fn accepts(&self, value: &dyn ErasedValue) -> bool {
        match self.kind {
            TokenKind::Concrete { .. } => value.value_type() == self.id,
            TokenKind::Capability => value.capabilities().iter().any(|cap| cap.id == self.id),
        }
    }

    /// Creates a fresh instance of a concrete type.
    ///
    /// Returns `None` for capability sets and for types that opted out of
    /// default construction.
    #[must_use]
    pub fn construct(&self) -> Option<AnyValue> {
        match self.kind {
            TokenKind::Concrete { construct } => construct(),
            TokenKind::Capability => None,
        }
    }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeToken {}

/// One injectable field in a type's manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    name: &'static str,
    directive: Directive,
    target: TypeToken,
}

impl FieldSpec {
    /// Describes a field named `name`, declared as pointing at `T`.
    #[must_use]
    pub fn new<T: Target + ?Sized>(name: &'static str, directive: Directive) -> Self {
        Self {
            name,
            directive,
            target: T::token(),
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns how the field's dependency is located.
    #[must_use]
    pub fn directive(&self) -> &Directive {
        &self.directive
    }

    /// Returns the field's declared type.
    #[must_use]
    pub fn target(&self) -> &TypeToken {
        &self.target
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Targets and slots
// ─────────────────────────────────────────────────────────────────────────────

/// A type a dependency field may be declared as.
///
/// Implemented for every [`Injectable`] type and, through the
/// `#[capability]` attribute, for `dyn Trait`.
pub trait Target: Send + Sync + 'static {
    /// Returns the runtime token for this type.
    fn token() -> TypeToken;

    /// Views an erased value as this type, if compatible.
    fn cast(value: &AnyValue) -> Option<Shared<Self>>;
}

impl<T: Injectable> Target for T {
    fn token() -> TypeToken {
        TypeToken::concrete::<T>()
    }

    fn cast(value: &AnyValue) -> Option<Shared<Self>> {
        value.clone().downcast_arc::<RwLock<T>>().ok()
    }
}

/// A field type that can hold a resolved dependency.
pub trait Slot {
    /// The declared type of the dependency.
    type Target: Target + ?Sized;

    /// Returns `true` if the slot already holds a value.
    fn is_set(&self) -> bool;

    /// Stores `value`, returning `false` if it is not compatible.
    fn assign(&mut self, value: &AnyValue) -> bool;
}

impl<T: Target + ?Sized> Slot for Option<Shared<T>> {
    type Target = T;

    fn is_set(&self) -> bool {
        self.is_some()
    }

    fn assign(&mut self, value: &AnyValue) -> bool {
        match T::cast(value) {
            Some(shared) => {
                *self = Some(shared);
                true
            }
            None => false,
        }
    }
}

/// A dependency field.
///
/// Starts empty; the resolver fills it in. A `Dep` that is already set
/// before resolution is left alone.
///
/// # Example
///
/// ```
/// use graft_inject::prelude::*;
///
/// #[derive(Default, Injectable)]
/// struct Answer {
///     answer: i32,
/// }
///
/// let answer = shared(Answer { answer: 42 });
/// let dep = Dep::new(answer.clone());
///
/// assert!(dep.is_set());
/// assert!(dep.points_to(&answer));
/// assert_eq!(dep.read().answer, 42);
/// ```
pub struct Dep<T: ?Sized> {
    slot: Option<Shared<T>>,
}

impl<T: ?Sized> Dep<T> {
    /// Creates an empty dependency.
    #[must_use]
    pub fn empty() -> Self {
        Self { slot: None }
    }

    /// Creates a dependency that is already satisfied.
    #[must_use]
    pub fn new(value: Shared<T>) -> Self {
        Self { slot: Some(value) }
    }

    /// Returns the resolved value, if any.
    #[must_use]
    pub fn get(&self) -> Option<&Shared<T>> {
        self.slot.as_ref()
    }

    /// Returns `true` once the dependency holds a value.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.slot.is_some()
    }

    /// Returns `true` if this dependency holds exactly `other`.
    ///
    /// Compares addresses only, so a `Dep<dyn Trait>` can be compared with
    /// the concrete `Shared<T>` it was resolved to.
    #[must_use]
    pub fn points_to<U: ?Sized>(&self, other: &Arc<RwLock<U>>) -> bool {
        self.slot
            .as_ref()
            .is_some_and(|own| core::ptr::addr_eq(Arc::as_ptr(own), Arc::as_ptr(other)))
    }

    /// Locks the dependency for reading, or returns `None` if unresolved.
    #[must_use]
    pub fn try_read(&self) -> Option<RwLockReadGuard<'_, T>> {
        self.slot.as_ref().map(|value| value.read())
    }

    /// Locks the dependency for reading.
    ///
    /// # Panics
    ///
    /// Panics if the dependency has not been resolved.
    #[must_use]
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        match &self.slot {
            Some(value) => value.read(),
            None => panic!(
                "dependency `{}` read before it was resolved",
                core::any::type_name::<T>()
            ),
        }
    }

    /// Locks the dependency for writing.
    ///
    /// # Panics
    ///
    /// Panics if the dependency has not been resolved.
    #[must_use]
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        match &self.slot {
            Some(value) => value.write(),
            None => panic!(
                "dependency `{}` written before it was resolved",
                core::any::type_name::<T>()
            ),
        }
    }
}

impl<T: Target + ?Sized> Slot for Dep<T> {
    type Target = T;

    fn is_set(&self) -> bool {
        self.slot.is_set()
    }

    fn assign(&mut self, value: &AnyValue) -> bool {
        self.slot.assign(value)
    }
}

impl<T: ?Sized> Default for Dep<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> Clone for Dep<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Dep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_set() { "set" } else { "empty" };
        write!(f, "Dep<{}>({state})", core::any::type_name::<T>())
    }
}

impl<T: ?Sized> From<Shared<T>> for Dep<T> {
    fn from(value: Shared<T>) -> Self {
        Self::new(value)
    }
}
