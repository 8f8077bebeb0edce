//! Type introspection helpers.
//!
//! Classification is syntactic. Plain scalars match on their final path
//! segment, so `std::string::String` is addressable. `DateTime` must name its
//! time zone as `FixedOffset` or `Utc`, and `Level` must be bare or qualified
//! by `tracing`. Type aliases are never recognised.

use syn::{GenericArgument, PathArguments, Type, TypePath};

/// Final path segments of the plain types the loader can address directly.
const PLAIN_SCALARS: &[&str] = &[
    "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize", "f32", "f64", "bool",
    "String",
];

/// Time zones with a `Scalar` implementation for `DateTime<Tz>`.
const DATETIME_ZONES: &[&str] = &["FixedOffset", "Utc"];

/// Strips invisible groups and parentheses around a type.
fn peel(ty: &Type) -> &Type {
    match ty {
        Type::Group(group) => peel(&group.elem),
        Type::Paren(paren) => peel(&paren.elem),
        other => other,
    }
}

fn last_ident(ty: &Type) -> Option<&syn::Ident> {
    match peel(ty) {
        Type::Path(p) if p.qself.is_none() => p.path.segments.last().map(|seg| &seg.ident),
        _ => None,
    }
}

fn is_supported_datetime(arguments: &PathArguments) -> bool {
    let PathArguments::AngleBracketed(angle) = arguments else {
        return false;
    };
    let mut args = angle.args.iter();
    match (args.next(), args.next()) {
        (Some(GenericArgument::Type(zone)), None) => last_ident(zone)
            .is_some_and(|ident| DATETIME_ZONES.iter().any(|name| ident == name)),
        _ => false,
    }
}

fn is_tracing_level(path: &TypePath) -> bool {
    let segments: Vec<_> = path.path.segments.iter().collect();
    match segments.as_slice() {
        [level] => level.ident == "Level",
        [.., krate, level] => krate.ident == "tracing" && level.ident == "Level",
        [] => false,
    }
}

/// Returns `true` when `ty` names an addressable scalar type.
pub(crate) fn is_scalar(ty: &Type) -> bool {
    let Type::Path(p) = peel(ty) else {
        return false;
    };
    if p.qself.is_some() {
        return false;
    }
    let Some(last) = p.path.segments.last() else {
        return false;
    };
    if last.ident == "DateTime" {
        return is_supported_datetime(&last.arguments);
    }
    if !last.arguments.is_empty() {
        return false;
    }
    if last.ident == "Level" {
        return is_tracing_level(p);
    }
    PLAIN_SCALARS.iter().any(|name| last.ident == name)
}
