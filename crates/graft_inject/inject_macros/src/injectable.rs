//! Derive macro for the `Injectable` trait.

use darling::FromDeriveInput;
use darling::ast::Data;
use darling::util::{Ignored, PathList};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Attribute, DeriveInput, Expr, ExprLit, Lit, LitStr, Meta, parse_macro_input};

/// Parsed container attributes.
#[derive(FromDeriveInput)]
#[darling(attributes(injectable), supports(struct_named, struct_unit))]
struct InjectableArgs {
    ident: syn::Ident,
    generics: syn::Generics,
    data: Data<Ignored, syn::Field>,

    /// Capability sets the type provides.
    #[darling(default)]
    provides: PathList,

    /// Whether the resolver may create instances.
    #[darling(default)]
    no_default: bool,
}

/// How an `#[inject]` field locates its dependency.
enum FieldDirective {
    /// `#[inject]`
    Standard,
    /// `#[inject = "tag"]`, interpreted at runtime like any tag.
    Tag(LitStr),
    /// `#[inject(private)]`
    Private,
    /// `#[inject(name = "...")]`
    Named(LitStr),
}

/// One `#[inject]` field.
struct InjectField {
    ident: syn::Ident,
    ty: syn::Type,
    directive: FieldDirective,
}

/// Parses the `#[inject]` attribute of a field, if present.
fn parse_inject_attr(attrs: &[Attribute]) -> syn::Result<Option<FieldDirective>> {
    let mut found = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("inject")) {
        if found.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "duplicate #[inject] attribute",
            ));
        }

        let directive = match &attr.meta {
            Meta::Path(_) => FieldDirective::Standard,
            Meta::NameValue(meta) => match &meta.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(tag), ..
                }) => FieldDirective::Tag(tag.clone()),
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected a string literal, e.g. #[inject = \"private\"]",
                    ));
                }
            },
            Meta::List(list) => {
                let mut directive = None;
                list.parse_nested_meta(|meta| {
                    if directive.is_some() {
                        return Err(meta.error("#[inject(...)] takes a single directive"));
                    }
                    if meta.path.is_ident("private") {
                        directive = Some(FieldDirective::Private);
                        Ok(())
                    } else if meta.path.is_ident("name") {
                        let name: LitStr = meta.value()?.parse()?;
                        if name.value().is_empty() {
                            return Err(syn::Error::new_spanned(&name, "name must not be empty"));
                        }
                        directive = Some(FieldDirective::Named(name));
                        Ok(())
                    } else {
                        Err(meta.error("expected `private` or `name = \"...\"`"))
                    }
                })?;
                directive.unwrap_or(FieldDirective::Standard)
            }
        };

        found = Some(directive);
    }

    Ok(found)
}

/// Collects the `#[inject]` fields of the struct.
fn inject_fields(data: Data<Ignored, syn::Field>) -> syn::Result<Vec<InjectField>> {
    let fields = data
        .take_struct()
        .map(|fields| fields.fields)
        .unwrap_or_default();

    let mut inject = Vec::new();
    for field in fields {
        let Some(directive) = parse_inject_attr(&field.attrs)? else {
            continue;
        };
        let Some(ident) = field.ident else {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "#[inject] requires a named field",
            ));
        };
        inject.push(InjectField {
            ident,
            ty: field.ty,
            directive,
        });
    }
    Ok(inject)
}

/// Implementation of the `#[derive(Injectable)]` macro.
///
/// Generates the manifest (`fields`, `capabilities`, `construct`) and the
/// per-field accessors (`is_populated`, `inject`).
pub(crate) fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let args = match InjectableArgs::from_derive_input(&input) {
        Ok(args) => args,
        Err(err) => return err.write_errors().into(),
    };

    let fields = match inject_fields(args.data) {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error().into(),
    };

    let krate = crate::path::inject_crate_path();
    let name = &args.ident;
    let (impl_generics, ty_generics, where_clause) = args.generics.split_for_impl();

    let specs = fields.iter().map(|field| {
        let ty = &field.ty;
        let field_name = field.ident.unraw().to_string();
        let directive = directive_tokens(&krate, &field.directive);
        quote! {
            #krate::value::FieldSpec::new::<<#ty as #krate::value::Slot>::Target>(
                #field_name,
                #directive,
            )
        }
    });

    let capabilities = args.provides.iter().map(|path| {
        quote! {
            #krate::value::Capability::new::<dyn #path, Self>(
                |value: #krate::value::Shared<Self>| -> #krate::value::Shared<dyn #path> { value },
            )
        }
    });

    let construct = if args.no_default {
        quote!(::core::option::Option::None)
    } else {
        quote!(::core::option::Option::Some(<Self as ::core::default::Default>::default()))
    };

    let names: Vec<String> = fields
        .iter()
        .map(|field| field.ident.unraw().to_string())
        .collect();
    let idents: Vec<&syn::Ident> = fields.iter().map(|field| &field.ident).collect();

    let (field_arg, value_arg) = if fields.is_empty() {
        (quote!(_field), quote!(_value))
    } else {
        (quote!(field), quote!(value))
    };

    let expanded = quote! {
        #[automatically_derived]
        impl #impl_generics #krate::value::Injectable for #name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<#krate::value::FieldSpec> {
                ::std::vec![#(#specs),*]
            }

            fn capabilities() -> ::std::vec::Vec<#krate::value::Capability> {
                ::std::vec![#(#capabilities),*]
            }

            fn construct() -> ::core::option::Option<Self> {
                #construct
            }

            fn is_populated(&self, #field_arg: &str) -> bool {
                match #field_arg {
                    #(#names => #krate::value::Slot::is_set(&self.#idents),)*
                    _ => false,
                }
            }

            fn inject(
                &mut self,
                #field_arg: &str,
                #value_arg: &#krate::value::AnyValue,
            ) -> #krate::value::Assignment {
                match #field_arg {
                    #(#names => {
                        if #krate::value::Slot::assign(&mut self.#idents, #value_arg) {
                            #krate::value::Assignment::Assigned
                        } else {
                            #krate::value::Assignment::Incompatible
                        }
                    })*
                    _ => #krate::value::Assignment::UnknownField,
                }
            }
        }
    };

    expanded.into()
}

/// Builds the `Directive` expression for a field.
fn directive_tokens(krate: &TokenStream2, directive: &FieldDirective) -> TokenStream2 {
    match directive {
        FieldDirective::Standard => quote!(#krate::directive::Directive::Standard),
        FieldDirective::Tag(tag) => quote!(#krate::directive::Directive::parse(#tag)),
        FieldDirective::Private => quote!(#krate::directive::Directive::Private),
        FieldDirective::Named(name) => quote!(#krate::directive::Directive::named(#name)),
    }
}
