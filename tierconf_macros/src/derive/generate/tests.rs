//! Tests for generated `TierConfig` implementations.

use crate::derive::expand;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, ImplItem, ItemImpl, parse_quote};

fn expand_impl(input: &DeriveInput) -> Result<(ItemImpl, String)> {
    let tokens = expand(input).map_err(|err| anyhow!(err))?;
    let rendered = tokens.to_string();
    let item = syn::parse2::<ItemImpl>(tokens).map_err(|err| anyhow!(err))?;
    Ok((item, rendered))
}

fn method_names(item: &ItemImpl) -> Vec<String> {
    item.items
        .iter()
        .filter_map(|member| match member {
            ImplItem::Fn(function) => Some(function.sig.ident.to_string()),
            _ => None,
        })
        .collect()
}

#[test]
fn registers_scalars_and_routes_file_keys() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[tierconf(name = "opensearch", help = "search endpoint")]
            open_search: String,
            num_workers: u32,
            #[tierconf(nested)]
            inner: Inner,
            tags: Vec<String>,
            #[tierconf(skip)]
            cache: u8,
        }
    };
    let (item, rendered) = expand_impl(&input)?;
    ensure!(method_names(&item) == ["register", "apply_file_table"]);

    ensure!(rendered.contains("scalar :: < String > (\"open_search\""), "{rendered}");
    ensure!(rendered.contains(". with_name (\"opensearch\")"), "{rendered}");
    ensure!(rendered.contains(". with_help (\"search endpoint\")"), "{rendered}");
    ensure!(rendered.contains("scalar :: < u32 > (\"num_workers\""), "{rendered}");
    ensure!(!rendered.contains("scalar :: < Inner >"), "nested records are not scalars");
    ensure!(!rendered.contains("\"cache\""), "skipped fields are ignored");

    ensure!(rendered.contains("decode_nested (& mut self . inner"), "{rendered}");
    ensure!(rendered.contains("decode_value :: < Vec < String > >"), "{rendered}");
    ensure!(rendered.contains("decode_scalar :: < u32 >"), "{rendered}");
    ensure!(rendered.contains("unknown_key (key)"), "{rendered}");
    Ok(())
}

#[rstest]
#[case::default(parse_quote! { struct Demo { a: i8 } }, "impl tierconf :: TierConfig for Demo")]
#[case::aliased(
    parse_quote! { #[tierconf(crate = "deps::conf")] struct Demo { a: i8 } },
    "impl deps :: conf :: TierConfig for Demo"
)]
#[case::generic(
    parse_quote! { struct Demo<T> where T: Clone { a: i8, extra: T } },
    "for Demo < T > where T : Clone"
)]
fn honours_crate_path_and_generics(#[case] input: DeriveInput, #[case] expected: &str) -> Result<()> {
    let (_, rendered) = expand_impl(&input)?;
    ensure!(rendered.contains(expected), "{rendered}");
    Ok(())
}

#[test]
fn empty_struct_rejects_every_key() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Empty {}
    };
    let (item, rendered) = expand_impl(&input)?;
    ensure!(method_names(&item).len() == 2);
    ensure!(rendered.contains("_fields"), "{rendered}");
    ensure!(rendered.contains("table . into_iter () . next ()"), "{rendered}");
    Ok(())
}

#[test]
fn invalid_input_is_reported() {
    let input: DeriveInput = parse_quote! {
        union Bits { a: u8 }
    };
    assert!(expand(&input).is_err());
}
