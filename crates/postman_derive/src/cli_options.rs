use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, LitChar, LitStr, Type, parse_macro_input, spanned::Spanned,
};

use crate::utils;

struct CliField<'a> {
    ident: &'a syn::Ident,
    ty: &'a Type,
    short: Option<char>,
    long: Option<String>,
    required: bool,
}

impl CliField<'_> {
    fn label(&self) -> String {
        match (self.short, &self.long) {
            (Some(short), Some(long)) => format!("-{short}/--{long}"),
            (Some(short), None) => format!("-{short}"),
            (None, Some(long)) => format!("--{long}"),
            (None, None) => self.ident.to_string(),
        }
    }
}

pub fn derive_cli_options_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "CliOptions can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "CliOptions requires named fields")
            .to_compile_error()
            .into();
    };

    let mut cli_fields = Vec::new();
    for field in &fields.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let mut cli_field = CliField {
            ident,
            ty: &field.ty,
            short: None,
            long: None,
            required: false,
        };

        for attr in &field.attrs {
            if !attr.path().is_ident("cli") {
                continue;
            }
            let parse_result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("short") {
                    let lit: LitChar = meta.value()?.parse()?;
                    cli_field.short = Some(lit.value());
                    return Ok(());
                }
                if meta.path.is_ident("long") {
                    let lit: LitStr = meta.value()?.parse()?;
                    cli_field.long = Some(lit.value());
                    return Ok(());
                }
                if meta.path.is_ident("required") {
                    cli_field.required = true;
                    return Ok(());
                }
                Err(meta.error("unsupported cli attribute; expected short/long/required"))
            });
            if let Err(err) = parse_result {
                return err.to_compile_error().into();
            }
        }

        if cli_field.short.is_some() || cli_field.long.is_some() {
            cli_fields.push(cli_field);
        }
    }

    let mut arms = Vec::new();
    let mut required_checks = Vec::new();

    for cli_field in &cli_fields {
        let field_ident = cli_field.ident;
        let mut names: Vec<LitStr> = Vec::new();
        if let Some(short) = cli_field.short {
            names.push(LitStr::new(&short.to_string(), Span::call_site()));
        }
        if let Some(long) = &cli_field.long {
            names.push(LitStr::new(long, Span::call_site()));
        }
        let parse_expr = utils::build_cli_parse_expr(cli_field.ty);

        arms.push(quote! {
            #(#names)|* => {
                let raw = value.ok_or_else(|| {
                    crate::Error::invalid_input(format!("Missing value for {flag}"))
                })?;
                self.#field_ident = #parse_expr;
                Ok(true)
            }
        });

        if cli_field.required {
            let label = LitStr::new(&cli_field.label(), Span::call_site());
            let is_missing = if utils::inner_of_option(cli_field.ty).is_some() {
                quote! { self.#field_ident.is_none() }
            } else {
                quote! { self.#field_ident.to_string().trim().is_empty() }
            };
            required_checks.push(quote! {
                if #is_missing {
                    missing.push(#label);
                }
            });
        }
    }

    let expanded = quote! {
        impl #struct_ident {
            /// `-x` and `--xyz` are options; `-3` and `-0.5` are values.
            fn is_option_token(arg: &str) -> bool {
                match arg.strip_prefix('-') {
                    Some(rest) => !rest.is_empty()
                        && !rest.starts_with(|c: char| c.is_ascii_digit() || c == '.'),
                    None => false,
                }
            }

            fn split_arg(
                raw_name: &str,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> (String, Option<String>) {
                if let Some((k, v)) = raw_name.split_once('=') {
                    return (k.to_string(), Some(v.to_string()));
                }

                let value = match args.peek() {
                    Some(next) if !Self::is_option_token(next) => args.next(),
                    _ => None,
                };

                (raw_name.to_string(), value)
            }

            fn apply_cli_option(
                &mut self,
                name: &str,
                value: Option<String>,
            ) -> crate::Result<bool> {
                let flag = if name.chars().count() == 1 {
                    format!("-{name}")
                } else {
                    format!("--{name}")
                };
                match name {
                    #(#arms,)*
                    _ => Ok(false),
                }
            }

            fn missing_required(&self) -> Vec<&'static str> {
                let mut missing = Vec::new();
                #(#required_checks)*
                missing
            }
        }
    };

    TokenStream::from(expanded)
}
