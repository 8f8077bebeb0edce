//! Parsing of `#[tierconf(...)]` attributes and field types.

use syn::meta::ParseNestedMeta;
use syn::parenthesized;
use syn::{Attribute, Token};

mod input;
mod literals;
mod type_utils;

pub(crate) use input::parse_input;
use literals::{lit_bool, lit_str};
pub(crate) use type_utils::is_scalar;

#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[tierconf(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `tierconf::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(TierConfig)]`.
///
/// - `name` replaces the external name derived from the identifier.
/// - `help` is shown beside the field's environment variable.
/// - `nested` marks a nested record decoded from a file table.
/// - `skip` removes the field from every source.
#[derive(Default, Clone, Debug)]
pub(crate) struct FieldAttrs {
    pub name: Option<String>,
    pub help: Option<String>,
    pub nested: bool,
    pub skip: bool,
}

/// Iterate all `#[tierconf(...)]` attributes once and apply a callback.
fn parse_tierconf<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("tierconf")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Accepts both `key` and `key = true|false`.
fn parse_switch(meta: &ParseNestedMeta, key: &str) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        lit_bool(meta, key)
    } else {
        Ok(true)
    }
}

/// Extracts `#[tierconf(...)]` metadata applied to a struct.
///
/// Only `crate` is recognised. Unknown keys are ignored.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_tierconf(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            Ok(())
        } else {
            discard_unknown(meta)
        }
    })?;
    Ok(out)
}

/// Applies a recognised field attribute, returning `true` if handled.
fn apply_field_attr(meta: &ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<bool> {
    let Some(ident) = meta.path.get_ident() else {
        return Ok(false);
    };
    match ident.to_string().as_str() {
        "name" => {
            let s = lit_str(meta, "name")?;
            if s.value().is_empty() {
                return Err(syn::Error::new(s.span(), "name must not be empty"));
            }
            out.name = Some(s.value());
        }
        "help" => out.help = Some(lit_str(meta, "help")?.value()),
        "nested" => out.nested = parse_switch(meta, "nested")?,
        "skip" => out.skip = parse_switch(meta, "skip")?,
        _ => return Ok(false),
    }
    Ok(true)
}

/// Parses field-level `#[tierconf(...)]` attributes.
///
/// Recognised keys are `name`, `help`, `nested` and `skip`; unknown keys are
/// ignored, matching [`parse_struct_attrs`]. A field cannot be both `nested`
/// and `skip`.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_tierconf(&field.attrs, |meta| {
        if !apply_field_attr(meta, &mut out)? {
            discard_unknown(meta)?;
        }
        Ok(())
    })?;
    if out.nested && out.skip {
        return Err(syn::Error::new_spanned(
            field,
            "`nested` and `skip` cannot be combined",
        ));
    }
    Ok(out)
}
