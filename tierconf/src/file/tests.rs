//! Unit tests for the file source.

use super::*;
use crate::{FileFault, FileValueError};
use anyhow::{Result, ensure};
use chrono::{DateTime, FixedOffset};
use rstest::{fixture, rstest};
use std::collections::BTreeMap;
use tempfile::TempDir;

#[derive(Debug, Default, PartialEq, crate::TierConfig)]
struct Inner {
    nested_int: i64,
    nested_label: String,
}

#[derive(Debug, Default, crate::TierConfig)]
struct FileConf {
    my_int: i32,
    my_uint8: u8,
    my_float: f64,
    my_bool: bool,
    #[tierconf(name = "opensearch")]
    open_search: String,
    my_datetime: DateTime<FixedOffset>,
    #[tierconf(nested)]
    inner: Inner,
    tags: Vec<String>,
    limits: BTreeMap<String, u32>,
    #[tierconf(skip)]
    scratch: u16,
}

fn write(dir: &TempDir, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().unwrap_or_else(|err| panic!("temporary directory: {err}"))
}

fn load(files: &[PathBuf], conf: &mut FileConf) -> Result<(Option<PathBuf>, String)> {
    let mut out = Vec::new();
    let applied = {
        let mut trace = DebugTrace::new(&mut out, true);
        load_first(files, None, conf, &mut trace)?
    };
    Ok((applied, String::from_utf8(out)?))
}

#[rstest]
fn decodes_every_field_role(dir: TempDir) -> Result<()> {
    let path = write(
        &dir,
        "conf.toml",
        r#"
my_int = 96
my_uint8 = 8
my_float = 3
my_bool = true
opensearch = "http://from-toml"
my_datetime = 2018-03-05T12:30:00Z
tags = ["a", "b"]

[inner]
nested_int = 7

[limits]
cpu = 2
"#,
    )?;
    let mut conf = FileConf {
        scratch: 5,
        ..FileConf::default()
    };
    let (applied, _) = load(&[path.clone()], &mut conf)?;
    ensure!(applied == Some(path));
    ensure!(conf.my_int == 96 && conf.my_uint8 == 8 && conf.my_bool);
    ensure!(conf.my_float.to_string() == "3");
    ensure!(conf.open_search == "http://from-toml");
    ensure!(conf.my_datetime.to_rfc3339() == "2018-03-05T12:30:00+00:00");
    ensure!(conf.inner == Inner { nested_int: 7, nested_label: String::new() });
    ensure!(conf.tags == ["a", "b"]);
    ensure!(conf.limits.get("cpu") == Some(&2));
    ensure!(conf.scratch == 5, "skipped fields keep their value");
    Ok(())
}

#[rstest]
fn first_existing_file_wins(dir: TempDir) -> Result<()> {
    let missing = dir.path().join("missing.toml");
    let first = write(&dir, "first.toml", "my_int = 1")?;
    let second = write(&dir, "second.toml", "my_int = 2")?;
    let mut conf = FileConf::default();
    let (applied, trace) = load(&[missing.clone(), first.clone(), second.clone()], &mut conf)?;
    ensure!(applied == Some(first.clone()));
    ensure!(conf.my_int == 1);
    let expected = format!(
        "CONF: Skipping missing file: {}\nCONF: Parsing file: {}\nCONF: Previous file found, skipping file: {}\n",
        missing.display(),
        first.display(),
        second.display()
    );
    ensure!(trace == expected, "trace:\n{trace}");
    Ok(())
}

#[rstest]
fn no_files_leave_record_untouched(dir: TempDir) -> Result<()> {
    let mut conf = FileConf {
        my_int: 16,
        ..FileConf::default()
    };
    let (applied, _) = load(&[dir.path().join("absent.toml")], &mut conf)?;
    ensure!(applied.is_none());
    ensure!(conf.my_int == 16);
    let (none_applied, trace) = load(&[], &mut conf)?;
    ensure!(none_applied.is_none() && trace.is_empty());
    Ok(())
}

#[rstest]
#[case::unknown_key("bogus = 1", "bogus")]
#[case::mismatch("my_int = \"sixteen\"", "my_int")]
#[case::overflow("my_uint8 = 256", "my_uint8")]
#[case::nested_unknown("[inner]\nbogus = 1", "inner.bogus")]
#[case::nested_not_table("inner = 5", "inner")]
#[case::bad_list("tags = [1, 2]", "tags")]
fn reports_offending_key(dir: TempDir, #[case] contents: &str, #[case] key: &str) -> Result<()> {
    let path = write(&dir, "bad.toml", contents)?;
    let mut conf = FileConf::default();
    let mut out = Vec::new();
    let mut trace = DebugTrace::new(&mut out, false);
    let Err(TierError::File { path: failed, source }) =
        load_first(&[path.clone()], None, &mut conf, &mut trace)
    else {
        anyhow::bail!("expected a file error");
    };
    ensure!(failed == path);
    let Some(value_err) = source.downcast_ref::<FileValueError>() else {
        anyhow::bail!("expected a key error, got {source}");
    };
    ensure!(value_err.key() == key, "key was {}", value_err.key());
    Ok(())
}

#[rstest]
fn unknown_key_fault_is_reported(dir: TempDir) -> Result<()> {
    let path = write(&dir, "bad.toml", "bogus = 1")?;
    let mut conf = FileConf::default();
    let mut out = Vec::new();
    let mut trace = DebugTrace::new(&mut out, false);
    let result = load_first(&[path], None, &mut conf, &mut trace);
    let Err(TierError::File { source, .. }) = result else {
        anyhow::bail!("expected a file error");
    };
    let fault = source
        .downcast_ref::<FileValueError>()
        .map(FileValueError::fault);
    ensure!(matches!(fault, Some(FileFault::UnknownKey)));
    Ok(())
}

#[rstest]
fn malformed_file_is_a_file_error(dir: TempDir) -> Result<()> {
    let path = write(&dir, "broken.toml", "my_int = ")?;
    let mut conf = FileConf::default();
    let mut out = Vec::new();
    let mut trace = DebugTrace::new(&mut out, false);
    let result = load_first(&[path], None, &mut conf, &mut trace);
    ensure!(matches!(result, Err(TierError::File { .. })));
    Ok(())
}

#[rstest]
fn unreadable_path_is_a_file_error(dir: TempDir) -> Result<()> {
    let mut conf = FileConf::default();
    let mut out = Vec::new();
    let mut trace = DebugTrace::new(&mut out, false);
    let result = load_first(&[dir.path().to_path_buf()], None, &mut conf, &mut trace);
    ensure!(matches!(result, Err(TierError::File { .. })), "directories cannot be read");
    Ok(())
}

#[rstest]
#[case("conf.json", FileFormat::Json)]
#[case("CONF.JSON", FileFormat::Json)]
#[case("conf.toml", FileFormat::Toml)]
#[case("conf", FileFormat::Toml)]
fn format_follows_extension(#[case] path: &str, #[case] expected: FileFormat) {
    assert_eq!(FileFormat::from_path(Path::new(path)), expected);
}

#[cfg(feature = "json")]
#[rstest]
fn json_files_decode_like_toml(dir: TempDir) -> Result<()> {
    let path = write(
        &dir,
        "conf.json",
        r#"{"my_int": 48, "opensearch": "http://from-json", "inner": {"nested_label": "x"}, "tags": ["c"]}"#,
    )?;
    let mut conf = FileConf::default();
    load(&[path], &mut conf)?;
    ensure!(conf.my_int == 48);
    ensure!(conf.open_search == "http://from-json");
    ensure!(conf.inner.nested_label == "x");
    ensure!(conf.tags == ["c"]);
    Ok(())
}

#[rstest]
fn format_override_beats_extension(dir: TempDir) -> Result<()> {
    let path = write(&dir, "conf.json", "my_int = 12")?;
    let mut conf = FileConf::default();
    let mut out = Vec::new();
    let mut trace = DebugTrace::new(&mut out, false);
    load_first(&[path], Some(FileFormat::Toml), &mut conf, &mut trace)?;
    ensure!(conf.my_int == 12);
    Ok(())
}

#[derive(Default)]
struct Manual {
    workers: u32,
}

impl TierConfig for Manual {
    fn register(fields: &mut crate::FieldRegistry<Self>) {
        fields.add(crate::FieldSpec::scalar::<u32>("NumWorkers", |m: &mut Self| {
            &mut m.workers
        }));
    }
}

#[rstest]
fn registered_fields_decode_by_default() -> Result<()> {
    let mut manual = Manual::default();
    let table: Table = toml::from_str("num_workers = 4")?;
    manual.apply_file_table(table)?;
    ensure!(manual.workers == 4);
    let unknown: Table = toml::from_str("workers = 4")?;
    ensure!(manual.apply_file_table(unknown).is_err());
    Ok(())
}
