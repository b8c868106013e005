//! Locating `graft_inject` from the expanding crate.

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// Returns the path generated code uses to reach `graft_inject`.
///
/// A direct dependency wins, including a renamed one. Otherwise the `graft`
/// umbrella is used, which re-exports the runtime as `graft::graft_inject`.
/// If neither is found the bare name is emitted and the compiler reports the
/// missing dependency at the use site.
pub(crate) fn inject_crate_path() -> TokenStream {
    let runtime = format_ident!("graft_inject");

    match crate_name("graft_inject") {
        // `graft_inject` declares `extern crate self as graft_inject`.
        Ok(FoundCrate::Itself) => quote!(#runtime),
        Ok(FoundCrate::Name(renamed)) => {
            let renamed = format_ident!("{}", renamed);
            quote!(::#renamed)
        }
        Err(_) => match crate_name("graft") {
            Ok(FoundCrate::Name(umbrella)) => {
                let umbrella = format_ident!("{}", umbrella);
                quote!(::#umbrella::#runtime)
            }
            _ => quote!(#runtime),
        },
    }
}
