//! Expansion of `#[derive(TierConfig)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Ident, Type};

mod generate;
mod parse;

use parse::{FieldAttrs, is_scalar, parse_input};

/// How a field takes part in configuration loading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FieldRole {
    /// Addressable by every source.
    Scalar,
    /// A nested record decoded from a file table.
    Nested,
    /// Any other deserializable value, decoded from files only.
    Value,
    /// Ignored by every source.
    Skipped,
}

pub(crate) struct FieldModel {
    pub ident: Ident,
    pub ty: Type,
    pub attrs: FieldAttrs,
    pub role: FieldRole,
}

impl FieldModel {
    fn new(field: syn::Field, attrs: FieldAttrs) -> syn::Result<Self> {
        let Some(ident) = field.ident else {
            return Err(syn::Error::new_spanned(&field.ty, "TierConfig requires named fields"));
        };
        let role = if attrs.skip {
            FieldRole::Skipped
        } else if attrs.nested {
            FieldRole::Nested
        } else if is_scalar(&field.ty) {
            FieldRole::Scalar
        } else {
            FieldRole::Value
        };
        Ok(Self {
            ident,
            ty: field.ty,
            attrs,
            role,
        })
    }
}

/// Expands the derive for `input`.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse_input(input)?;
    let models = parsed
        .fields
        .into_iter()
        .map(|(field, attrs)| FieldModel::new(field, attrs))
        .collect::<syn::Result<Vec<_>>>()?;
    let krate = parsed
        .struct_attrs
        .crate_path
        .as_ref()
        .map_or_else(|| quote! { tierconf }, |path| quote! { #path });
    Ok(generate::generate_trait_impl(
        &parsed.ident,
        &input.generics,
        &models,
        &krate,
    ))
}
