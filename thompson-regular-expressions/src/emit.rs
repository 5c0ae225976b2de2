use crate::Regex;
use proc_macro2::TokenStream;
use quote::quote;

impl Regex {
    /// Convert this regex into rust code that constructs the same tree at runtime.
    /// `krate` is the path under which the [`Regex`] type is reachable from the expansion site,
    /// for example `::thompson`.
    pub fn emit(&self, krate: &TokenStream) -> TokenStream {
        match self {
            Regex::Literal(c) => quote!(#krate::Regex::Literal(#c)),
            Regex::Epsilon => quote!(#krate::Regex::Epsilon),
            Regex::Concat(l, r) => {
                let l = l.emit(krate);
                let r = r.emit(krate);
                quote!(#krate::Regex::concat(#l, #r))
            }
            Regex::Union(l, r) => {
                let l = l.emit(krate);
                let r = r.emit(krate);
                quote!(#krate::Regex::union(#l, #r))
            }
            Regex::Star(i) => {
                let i = i.emit(krate);
                quote!(#krate::Regex::star(#i))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_regex;
    use quote::quote;

    #[test]
    fn test_emit() {
        let krate = quote!(::thompson);
        let emitted = parse_regex("a*|@").unwrap().emit(&krate);
        let expected = quote!(::thompson::Regex::union(
            ::thompson::Regex::star(::thompson::Regex::Literal('a')),
            ::thompson::Regex::Epsilon
        ));
        assert_eq!(emitted.to_string(), expected.to_string());
    }
}
