//! Procedural macros for `tierconf`.
//!
//! `#[derive(TierConfig)]` registers every scalar field of a struct with the
//! loader and generates the applier that decodes configuration file tables
//! into the struct in place.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `tierconf::TierConfig`.
///
/// Field attributes, all under `#[tierconf(...)]`:
///
/// - `name = "..."` replaces the name derived from the field identifier.
/// - `help = "..."` adds help text to the environment variable listing.
/// - `nested` decodes the field as a nested record from a file table.
/// - `skip` leaves the field out of every source.
///
/// The struct attribute `#[tierconf(crate = "path")]` points generated code at
/// a renamed dependency.
#[proc_macro_derive(TierConfig, attributes(tierconf))]
pub fn derive_tier_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
