//! Explicit names apply to every source.

mod common;

use anyhow::{Result, ensure};
use common::{fixture, with_jail};
use rstest::{fixture as rstest_fixture, rstest};
use tierconf::{FieldTable, Loader, TierConfig};

#[derive(Debug, TierConfig)]
struct Search {
    #[tierconf(name = "opensearch", help = "the OpenSearch URL")]
    open_search: String,
    #[tierconf(help = "the number of workers")]
    num_workers: i32,
}

#[rstest_fixture]
fn search() -> Search {
    Search {
        open_search: "http://default".to_owned(),
        num_workers: 4,
    }
}

fn load(conf: &mut Search, args: &[&str], files: &[&str]) -> Result<()> {
    let mut loader = Loader::new(conf, "foo", "description", files.iter().map(|f| fixture(f)))
        .with_args(args.iter().copied())
        .with_output(std::io::sink());
    let _outcome = loader.load()?;
    Ok(())
}

#[rstest]
fn table_uses_explicit_name() -> Result<()> {
    let table = FieldTable::<Search>::build()?;
    ensure!(table.get("opensearch").is_some());
    ensure!(table.get("num_workers").is_some());
    ensure!(table.get("open_search").is_none());
    Ok(())
}

#[rstest]
fn flags_use_explicit_name(mut search: Search) -> Result<()> {
    with_jail(|_| {
        load(&mut search, &["--opensearch=http://localhost:9200", "--num-workers=8"], &[])?;
        ensure!(search.open_search == "http://localhost:9200");
        ensure!(search.num_workers == 8);
        Ok(())
    })
}

#[rstest]
fn environment_uses_explicit_name(mut search: Search) -> Result<()> {
    with_jail(|j| {
        j.set_env("FOO_OPENSEARCH", "http://from-env");
        j.set_env("FOO_OPEN_SEARCH", "http://ignored");
        load(&mut search, &[], &[])?;
        ensure!(search.open_search == "http://from-env");
        Ok(())
    })
}

#[rstest]
fn files_use_explicit_name(mut search: Search) -> Result<()> {
    with_jail(|j| {
        j.set_env("FOO_OPENSEARCH", "");
        load(&mut search, &[], &["conftag.toml"])?;
        ensure!(search.open_search == "http://from-toml");
        ensure!(search.num_workers == 4);
        Ok(())
    })
}

#[rstest]
fn usage_shows_help_text(mut search: Search) -> Result<()> {
    let mut out = Vec::new();
    {
        let mut loader = Loader::new(&mut search, "foo", "description", Vec::<String>::new())
            .with_args(["--help"])
            .with_output(&mut out);
        let _outcome = loader.load()?;
    }
    let usage = String::from_utf8(out)?;
    ensure!(usage.contains("FOO_OPENSEARCH - string (the OpenSearch URL)"), "{usage}");
    ensure!(usage.contains("FOO_NUM_WORKERS - int (the number of workers)"), "{usage}");
    ensure!(usage.contains("--opensearch"), "{usage}");
    ensure!(!usage.contains("--open-search"), "{usage}");
    Ok(())
}
