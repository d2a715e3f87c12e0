use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, LitStr, parse_macro_input};

pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item_fn = parse_macro_input!(item as ItemFn);
    let label = if attr.is_empty() {
        item_fn.sig.ident.to_string()
    } else {
        parse_macro_input!(attr as LitStr).value()
    };

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = item_fn;
    let stmts = &block.stmts;

    let expanded = quote! {
        #(#attrs)*
        #vis #sig {
            struct __TimerGuard(::std::time::Instant);

            impl Drop for __TimerGuard {
                fn drop(&mut self) {
                    log::debug!(
                        "{}: elapsed_s={:.3}",
                        #label,
                        self.0.elapsed().as_secs_f64()
                    );
                }
            }

            let __timer_guard = __TimerGuard(::std::time::Instant::now());
            #(#stmts)*
        }
    };

    TokenStream::from(expanded)
}
