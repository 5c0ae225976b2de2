use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, LitStr};
use thompson_regular_expressions::parse_regex;

/// Parses a pattern literal at compile time and expands to the expression constructing its
/// `thompson::Regex`. Malformed patterns are reported as compile errors on the literal.
#[proc_macro]
pub fn pattern(input: TokenStream) -> TokenStream {
    let literal = parse_macro_input!(input as LitStr);
    let krate: proc_macro2::TokenStream = quote!(::thompson);

    match parse_regex(literal.value()) {
        Ok(regex) => regex.emit(&krate).into(),
        Err(e) => syn::Error::new(literal.span(), format!("invalid pattern: {e}"))
            .to_compile_error()
            .into(),
    }
}
