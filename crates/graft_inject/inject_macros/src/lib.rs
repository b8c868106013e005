//! Procedural macros for `graft_inject`.
//!
//! This crate provides `#[derive(Injectable)]`, which generates a type's
//! injection manifest, and `#[capability]`, which lets a trait be used as a
//! dependency type (`Dep<dyn Trait>`).

mod capability;
mod injectable;
mod path;

use proc_macro::TokenStream;

/// Derive macro for the `Injectable` trait.
///
/// Only fields carrying an `#[inject]` attribute take part in resolution;
/// their type must be `Dep<T>` or `Option<Shared<T>>`.
///
/// # Field attributes
///
/// - `#[inject]` or `#[inject = ""]`: share the single unnamed instance.
/// - `#[inject(private)]` or `#[inject = "private"]`: always a fresh instance.
/// - `#[inject(name = "primary")]` or `#[inject = "primary"]`: the object
///   registered under that name.
///
/// # Container attributes
///
/// - `provides(TraitA, TraitB)`: capability sets the type provides. Each
///   trait must be marked `#[capability]`.
/// - `no_default`: the resolver never creates instances; the type must be
///   provided. Without it the type must implement `Default`.
///
/// # Example
///
/// ```ignore
/// #[derive(Default, Injectable)]
/// #[injectable(provides(Store))]
/// struct Repository {
///     #[inject]
///     pool: Dep<Pool>,
///     #[inject(name = "settings")]
///     settings: Dep<Settings>,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(inject, injectable))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    injectable::derive_injectable(input)
}

/// Attribute macro that turns a trait into a capability set.
///
/// The trait must have `Send + Sync` supertraits and no generic
/// parameters. Fields may then be declared as `Dep<dyn Trait>`.
///
/// # Example
///
/// ```ignore
/// #[capability]
/// trait Store: Send + Sync {
///     fn get(&self, key: &str) -> Option<String>;
/// }
/// ```
#[proc_macro_attribute]
pub fn capability(attr: TokenStream, item: TokenStream) -> TokenStream {
    capability::capability(attr, item)
}
