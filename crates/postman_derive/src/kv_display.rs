use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr, parse_macro_input, spanned::Spanned};

/// How a field value is rendered after `key = `.
enum KvFormat {
    /// `Display` of the value itself.
    Plain,
    /// `Option<T>`: the inner value, or `-` when unset.
    Optional,
    /// Floats with two decimals.
    Fixed2,
}

impl KvFormat {
    fn from_field(field: &Field) -> syn::Result<Self> {
        let mut format = Self::Plain;
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("kv")) {
            attr.parse_nested_meta(|meta| {
                if !meta.path.is_ident("fmt") {
                    return Err(meta.error("expected `fmt = \"opt\"` or `fmt = \"fixed2\"`"));
                }
                let lit: LitStr = meta.value()?.parse()?;
                format = match lit.value().as_str() {
                    "opt" => Self::Optional,
                    "fixed2" => Self::Fixed2,
                    other => {
                        return Err(syn::Error::new(
                            lit.span(),
                            format!("unknown kv fmt `{other}`"),
                        ));
                    }
                };
                Ok(())
            })?;
        }
        Ok(format)
    }

    fn render(&self, ident: &Ident) -> proc_macro2::TokenStream {
        match self {
            Self::Plain => quote! { self.#ident },
            Self::Optional => quote! {
                match &self.#ident {
                    Some(value) => value.to_string(),
                    None => String::from("-"),
                }
            },
            Self::Fixed2 => quote! { format!("{:.2}", self.#ident) },
        }
    }
}

pub fn derive_kv_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = &input.ident;

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "KvDisplay needs a struct")
            .to_compile_error()
            .into();
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "KvDisplay needs named fields")
            .to_compile_error()
            .into();
    };

    let mut rows = Vec::new();
    for field in &fields.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        match KvFormat::from_field(field) {
            Ok(format) => rows.push((ident.to_string(), format.render(ident))),
            Err(err) => return err.to_compile_error().into(),
        }
    }

    // One `\n\t<key padded> = {}` line per field, keys aligned.
    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let template: String = rows
        .iter()
        .map(|(key, _)| format!("\n\t{key:<width$} = {{}}"))
        .collect();
    let template = LitStr::new(&template, Span::call_site());
    let values = rows.iter().map(|(_, value)| value);

    let expanded = quote! {
        impl ::std::fmt::Display for #struct_ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, #template, #(#values),*)
            }
        }
    };

    TokenStream::from(expanded)
}
