//! Struct-level validation for the `TierConfig` derive macro.

use syn::{Data, DeriveInput, Field, Fields};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// A derive input that has passed structural checks.
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub struct_attrs: StructAttrs,
    /// Named fields in declaration order, each with its parsed attributes.
    pub fields: Vec<(Field, FieldAttrs)>,
}

/// Validates that `input` is a struct with named fields and parses every
/// `#[tierconf(...)]` attribute on it.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "TierConfig can only be derived for structs",
        ));
    };
    let named = match &data.fields {
        Fields::Named(named) => &named.named,
        Fields::Unit => {
            return Ok(ParsedInput {
                ident: input.ident.clone(),
                struct_attrs: parse_struct_attrs(&input.attrs)?,
                fields: Vec::new(),
            });
        }
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                data.struct_token,
                "TierConfig requires named fields",
            ));
        }
    };

    let fields = named
        .iter()
        .map(|field| Ok((field.clone(), parse_field_attrs(field)?)))
        .collect::<syn::Result<Vec<_>>>()?;
    Ok(ParsedInput {
        ident: input.ident.clone(),
        struct_attrs: parse_struct_attrs(&input.attrs)?,
        fields,
    })
}
