use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, parse_macro_input, spanned::Spanned};

use crate::utils;

/// One unit variant and the spellings that select it.
struct Choice {
    ident: Ident,
    canonical: LitStr,
    accepted: Vec<LitStr>,
}

pub fn derive_cli_value_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let enum_ident = input.ident;

    let Data::Enum(data_enum) = input.data else {
        return syn::Error::new(enum_ident.span(), "CliValue needs a fieldless enum")
            .to_compile_error()
            .into();
    };

    let mut choices = Vec::new();
    let mut default_variant: Option<Ident> = None;

    for variant in data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new(variant.span(), "CliValue variants cannot carry fields")
                .to_compile_error()
                .into();
        }

        let canonical = utils::to_kebab_case(&variant.ident.to_string());
        let mut accepted = vec![LitStr::new(&canonical, Span::call_site())];
        let mut is_default = false;

        for attr in variant.attrs.iter().filter(|attr| attr.path().is_ident("cli")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("alias") {
                    let alias: LitStr = meta.value()?.parse()?;
                    accepted.push(LitStr::new(
                        &alias.value().to_ascii_lowercase(),
                        alias.span(),
                    ));
                    Ok(())
                } else if meta.path.is_ident("default") {
                    is_default = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `alias = \"...\"` or `default`"))
                }
            });
            if let Err(err) = parsed {
                return err.to_compile_error().into();
            }
        }

        if is_default {
            if default_variant.is_some() {
                return syn::Error::new(variant.span(), "only one variant can be #[cli(default)]")
                    .to_compile_error()
                    .into();
            }
            default_variant = Some(variant.ident.clone());
        }

        choices.push(Choice {
            ident: variant.ident,
            canonical: LitStr::new(&canonical, Span::call_site()),
            accepted,
        });
    }

    let canonical_names: Vec<&LitStr> = choices.iter().map(|c| &c.canonical).collect();
    let from_str_arms = choices.iter().map(|c| {
        let ident = &c.ident;
        let accepted = &c.accepted;
        quote! { #(#accepted)|* => Ok(Self::#ident), }
    });
    let display_arms = choices.iter().map(|c| {
        let ident = &c.ident;
        let canonical = &c.canonical;
        quote! { Self::#ident => #canonical, }
    });
    let default_impl = default_variant.map(|ident| {
        quote! {
            impl ::std::default::Default for #enum_ident {
                fn default() -> Self {
                    Self::#ident
                }
            }
        }
    });

    let expanded = quote! {
        impl #enum_ident {
            /// Canonical spellings in declaration order.
            pub const VARIANTS: &'static [&'static str] = &[#(#canonical_names),*];
        }

        impl ::std::str::FromStr for #enum_ident {
            type Err = String;

            fn from_str(raw: &str) -> ::std::result::Result<Self, Self::Err> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    #(#from_str_arms)*
                    _ => Err(format!("expected one of {}", Self::VARIANTS.join("|"))),
                }
            }
        }

        impl ::std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(match self {
                    #(#display_arms)*
                })
            }
        }

        #default_impl
    };

    TokenStream::from(expanded)
}
