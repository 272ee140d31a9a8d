//! `#[derive(Reflected)]` for classref
//!
//! ```ignore
//! #[derive(Reflected)]
//! struct Actor;
//!
//! #[derive(Reflected)]
//! #[reflect(parent = Actor)]
//! struct Pawn;
//!
//! #[derive(Reflected)]
//! #[reflect(name = "PlayerPawn", parent = Pawn)]
//! struct Player;
//! ```
//!
//! The class name defaults to the type's identifier. A `parent` also
//! produces the `HasParent` impl that compile-time upcasts rely on.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, LitStr, Type};

/// Parsed `#[reflect(...)]` options.
#[derive(Default)]
struct ReflectArgs {
    name: Option<LitStr>,
    parent: Option<Type>,
}

impl ReflectArgs {
    fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        let mut args = ReflectArgs::default();

        for attr in input.attrs.iter().filter(|a| a.path().is_ident("reflect")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    if args.name.is_some() {
                        return Err(meta.error("duplicate `name`"));
                    }
                    let name: LitStr = meta.value()?.parse()?;
                    let value = name.value();
                    if value.is_empty() || value.trim() != value {
                        return Err(syn::Error::new(
                            name.span(),
                            "class name cannot be empty or padded with whitespace",
                        ));
                    }
                    args.name = Some(name);
                    Ok(())
                } else if meta.path.is_ident("parent") {
                    if args.parent.is_some() {
                        return Err(meta.error("duplicate `parent`"));
                    }
                    args.parent = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("expected `name` or `parent`"))
                }
            })?;
        }

        Ok(args)
    }
}

/// Derive `classref::Reflected` (and `classref::HasParent` when a parent is
/// given).
#[proc_macro_derive(Reflected, attributes(reflect))]
pub fn derive_reflected(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Reflected cannot be derived for generic types; each class needs one fixed name",
        ));
    }

    let ident = &input.ident;
    let args = ReflectArgs::from_input(input)?;
    let name = args
        .name
        .unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));

    let tokens = match args.parent {
        Some(parent) => quote! {
            impl ::classref::Reflected for #ident {
                const CLASS_NAME: &'static str = #name;
                const PARENT_NAME: ::core::option::Option<&'static str> =
                    ::core::option::Option::Some(<#parent as ::classref::Reflected>::CLASS_NAME);
            }

            impl ::classref::HasParent for #ident {
                type Parent = #parent;
            }
        },
        None => quote! {
            impl ::classref::Reflected for #ident {
                const CLASS_NAME: &'static str = #name;
            }
        },
    };

    Ok(tokens)
}
