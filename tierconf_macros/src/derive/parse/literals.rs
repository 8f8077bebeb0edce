//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr};

/// Parses a literal from an attribute using `extractor`, naming `expected`
/// in the error when the literal has the wrong type.
fn parse_lit<T, F>(meta: &ParseNestedMeta, key: &str, expected: &str, extractor: F) -> syn::Result<T>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be a {expected}")))
}

/// Parses a string literal from an attribute.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    parse_lit(meta, key, "string", |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

pub(crate) fn lit_bool(meta: &ParseNestedMeta, key: &str) -> syn::Result<bool> {
    parse_lit(meta, key, "bool", |lit| match lit {
        Lit::Bool(b) => Some(b.value),
        _ => None,
    })
}
