//! `TierConfig` trait implementation generation.
//!
//! `register` lists the scalar fields with their projections. The generated
//! `apply_file_table` walks the table once and routes each key by role:
//! scalars are strictly decoded, nested records recurse and other fields are
//! deserialized wholesale. Unknown keys are rejected.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, Ident};

use super::{FieldModel, FieldRole};

fn option_tokens(value: Option<&str>) -> TokenStream {
    value.map_or_else(
        || quote! { ::core::option::Option::None },
        |text| quote! { ::core::option::Option::Some(#text) },
    )
}

/// Generate one `fields.add(...)` statement per scalar field.
pub(crate) fn generate_register(models: &[FieldModel], krate: &TokenStream) -> TokenStream {
    let adds: Vec<TokenStream> = models
        .iter()
        .filter(|model| model.role == FieldRole::Scalar)
        .map(|model| {
            let member = &model.ident;
            let ident_str = member.to_string();
            let ty = &model.ty;
            let name_call = model
                .attrs
                .name
                .as_deref()
                .map(|name| quote! { .with_name(#name) });
            let help_call = model
                .attrs
                .help
                .as_deref()
                .map(|help| quote! { .with_help(#help) });
            quote! {
                fields.add(
                    #krate::FieldSpec::<Self>::scalar::<#ty>(#ident_str, |record| &mut record.#member)
                        #name_call
                        #help_call
                );
            }
        })
        .collect();
    if adds.is_empty() {
        return quote! {
            fn register(_fields: &mut #krate::FieldRegistry<Self>) {}
        };
    }
    quote! {
        fn register(fields: &mut #krate::FieldRegistry<Self>) {
            #( #adds )*
        }
    }
}

/// Generate the file table applier.
pub(crate) fn generate_apply_file_table(models: &[FieldModel], krate: &TokenStream) -> TokenStream {
    let arms: Vec<TokenStream> = models
        .iter()
        .filter(|model| model.role != FieldRole::Skipped)
        .map(|model| {
            let member = &model.ident;
            let ident_str = member.to_string();
            let ty = &model.ty;
            let explicit = option_tokens(model.attrs.name.as_deref());
            let assign = match model.role {
                FieldRole::Nested => quote! {
                    #krate::file::decode_nested(&mut self.#member, &key, value)?;
                },
                FieldRole::Scalar => quote! {
                    self.#member = #krate::file::decode_scalar::<#ty>(&key, value)?;
                },
                FieldRole::Value | FieldRole::Skipped => quote! {
                    self.#member = #krate::file::decode_value::<#ty>(&key, value)?;
                },
            };
            quote! {
                if key == #krate::naming::external_name(#ident_str, #explicit) {
                    #assign
                    continue;
                }
            }
        })
        .collect();

    let body = if arms.is_empty() {
        quote! {
            if let ::core::option::Option::Some((key, _)) = table.into_iter().next() {
                return ::core::result::Result::Err(#krate::FileValueError::unknown_key(key));
            }
        }
    } else {
        quote! {
            for (key, value) in table {
                #( #arms )*
                return ::core::result::Result::Err(#krate::FileValueError::unknown_key(key));
            }
        }
    };

    quote! {
        fn apply_file_table(
            &mut self,
            table: #krate::file::Table,
        ) -> ::core::result::Result<(), #krate::FileValueError> {
            #body
            ::core::result::Result::Ok(())
        }
    }
}

/// Compose the complete trait implementation.
pub(crate) fn generate_trait_impl(
    ident: &Ident,
    generics: &Generics,
    models: &[FieldModel],
    krate: &TokenStream,
) -> TokenStream {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let register = generate_register(models, krate);
    let apply = generate_apply_file_table(models, krate);
    quote! {
        impl #impl_generics #krate::TierConfig for #ident #ty_generics #where_clause {
            #register

            #apply
        }
    }
}

#[cfg(test)]
mod tests;
