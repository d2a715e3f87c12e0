use quote::quote;
use syn::{AngleBracketedGenericArguments, GenericArgument, PathArguments, Type, TypePath};

/// Returns `T` for `Option<T>`, `std::option::Option<T>` and `core::option::Option<T>`.
pub fn inner_of_option(ty: &Type) -> Option<&Type> {
    let Type::Path(TypePath { path, .. }) = ty else {
        return None;
    };
    let is_option = match path.segments.len() {
        1 => path.segments[0].ident == "Option",
        3 => {
            (path.segments[0].ident == "std" || path.segments[0].ident == "core")
                && path.segments[1].ident == "option"
                && path.segments[2].ident == "Option"
        }
        _ => false,
    };
    if !is_option {
        return None;
    }

    if let Some(seg) = path.segments.last()
        && let PathArguments::AngleBracketed(AngleBracketedGenericArguments { args, .. }) =
            &seg.arguments
        && let Some(GenericArgument::Type(inner)) = args.first()
    {
        return Some(inner);
    }
    None
}

/// Builds the expression turning the local `raw: String` into a field value
/// through `FromStr`.
///
/// `Option<T>` fields parse `T` and wrap it in `Some`.
pub fn build_cli_parse_expr(ty: &Type) -> proc_macro2::TokenStream {
    let (target, wrap) = match inner_of_option(ty) {
        Some(inner) => (inner, true),
        None => (ty, false),
    };
    let parsed = quote! {
        raw.parse::<#target>()
            .map_err(|e| crate::Error::invalid_input(format!(
                "Invalid value for {flag}: {raw} ({e})"
            )))?
    };
    if wrap {
        quote! { Some(#parsed) }
    } else {
        parsed
    }
}

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
