//! The `#[capability]` attribute.

use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemTrait, TypeParamBound, parse_macro_input};

/// Returns `true` if the trait lists `bound` (`Send` or `Sync`) as a
/// supertrait.
fn has_supertrait(item: &ItemTrait, bound: &str) -> bool {
    item.supertraits.iter().any(|supertrait| match supertrait {
        TypeParamBound::Trait(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == bound),
        _ => false,
    })
}

/// Implementation of the `#[capability]` attribute.
///
/// Emits the trait unchanged, followed by a `Target` impl for `dyn Trait`.
pub(crate) fn capability(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new_spanned(
            proc_macro2::TokenStream::from(attr),
            "#[capability] takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let item = parse_macro_input!(item as ItemTrait);

    if !item.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &item.generics,
            "#[capability] does not support generic traits",
        )
        .to_compile_error()
        .into();
    }

    if !(has_supertrait(&item, "Send") && has_supertrait(&item, "Sync")) {
        return syn::Error::new_spanned(
            &item.ident,
            "#[capability] traits must have `Send + Sync` supertraits",
        )
        .to_compile_error()
        .into();
    }

    let ident = &item.ident;
    let krate = crate::path::inject_crate_path();

    let expanded = quote! {
        #item

        impl #krate::value::Target for dyn #ident {
            fn token() -> #krate::value::TypeToken {
                #krate::value::TypeToken::capability::<dyn #ident>()
            }

            fn cast(
                value: &#krate::value::AnyValue,
            ) -> ::core::option::Option<#krate::value::Shared<Self>> {
                #krate::value::cast_capability::<dyn #ident>(value)
            }
        }
    };

    expanded.into()
}
