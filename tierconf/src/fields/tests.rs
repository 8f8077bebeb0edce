//! Unit tests for the field model and value application.

use super::*;
use crate::SourcedValue;
use anyhow::{Result, ensure};
use rstest::{fixture, rstest};

#[derive(Debug, Default)]
struct Settings {
    my_int: i32,
    my_uint8: u8,
    my_bool: bool,
    my_float: f64,
    label: String,
    when: DateTime<FixedOffset>,
    level: Option<Level>,
}

impl TierConfig for Settings {
    fn register(fields: &mut FieldRegistry<Self>) {
        fields
            .add(FieldSpec::scalar::<i32>("MyInt", |s: &mut Self| &mut s.my_int))
            .add(FieldSpec::scalar::<u8>("my_uint8", |s: &mut Self| &mut s.my_uint8))
            .add(FieldSpec::scalar::<bool>("MyBool", |s: &mut Self| &mut s.my_bool))
            .add(FieldSpec::scalar::<f64>("MyFloat", |s: &mut Self| &mut s.my_float))
            .add(
                FieldSpec::scalar::<String>("Label", |s: &mut Self| &mut s.label)
                    .with_name("tag")
                    .with_help("free-form tag"),
            )
            .add(FieldSpec::scalar::<DateTime<FixedOffset>>("When", |s: &mut Self| {
                &mut s.when
            }));
    }
}

#[fixture]
fn table() -> FieldTable<Settings> {
    FieldTable::build().unwrap_or_else(|err| panic!("table should build: {err}"))
}

fn values(pairs: &[(&str, &str, &str)]) -> SourcedValues {
    pairs
        .iter()
        .map(|(key, raw_key, value)| ((*key).to_owned(), SourcedValue::new(*raw_key, *value)))
        .collect()
}

#[rstest]
fn keys_are_sorted_external_names(table: FieldTable<Settings>) {
    assert_eq!(
        table.keys(),
        ["my_bool", "my_float", "my_int", "my_uint8", "tag", "when"]
    );
    assert_eq!(table.len(), 6);
    let idents: Vec<_> = table.iter().map(FieldDescriptor::ident).collect();
    assert_eq!(idents, ["MyBool", "MyFloat", "MyInt", "my_uint8", "Label", "When"]);
}

#[rstest]
fn descriptors_expose_metadata(table: FieldTable<Settings>) -> Result<()> {
    let Some(tag) = table.get("tag") else {
        anyhow::bail!("tag should be registered");
    };
    ensure!(tag.ident() == "Label");
    ensure!(tag.help() == Some("free-form tag"));
    ensure!(tag.kind() == FieldKind::String);
    ensure!(table.get("label").is_none(), "explicit name replaces the derived one");
    Ok(())
}

#[rstest]
fn renders_current_values(table: FieldTable<Settings>) -> Result<()> {
    let mut settings = Settings {
        my_int: 16,
        my_bool: true,
        when: DateTime::parse_from_rfc3339("2018-03-05T12:30:00Z")?,
        ..Settings::default()
    };
    let rendered: Vec<_> = table.iter().map(|field| field.render(&mut settings)).collect();
    ensure!(
        rendered == ["true", "0", "16", "0", "", "2018-03-05T12:30:00Z"],
        "rendered: {rendered:?}"
    );
    Ok(())
}

#[rstest]
fn applies_values_by_kind(table: FieldTable<Settings>) -> Result<()> {
    let mut settings = Settings::default();
    table.set_values(
        &mut settings,
        &values(&[
            ("my_int", "FOO_MY_INT", "-16"),
            ("my_uint8", "FOO_MY_UINT8", "255"),
            ("my_bool", "FOO_MY_BOOL", "T"),
            ("my_float", "FOO_MY_FLOAT", "4.25"),
            ("tag", "FOO_TAG", "hello"),
            ("when", "FOO_WHEN", "2018-04-03"),
        ]),
    )?;
    ensure!(settings.my_int == -16);
    ensure!(settings.my_uint8 == 255);
    ensure!(settings.my_bool);
    ensure!(settings.my_float.to_string() == "4.25");
    ensure!(settings.label == "hello");
    ensure!(settings.when.to_rfc3339() == "2018-04-03T00:00:00+00:00");
    ensure!(settings.level.is_none(), "unregistered fields are untouched");
    Ok(())
}

#[rstest]
fn unknown_key_is_rejected(table: FieldTable<Settings>) {
    let mut settings = Settings::default();
    let err = table
        .set_values(&mut settings, &values(&[("unknown", "unknown", "bar")]))
        .err();
    assert!(
        matches!(err, Some(TierError::UnknownKey { ref key, ref value }) if key == "unknown" && value == "bar"),
        "unexpected result: {err:?}"
    );
}

#[rstest]
#[case("my_uint8", "256")]
#[case("my_int", "abc")]
#[case("my_bool", "yes")]
#[case("when", "notadate")]
fn invalid_value_keeps_previous(
    table: FieldTable<Settings>,
    #[case] key: &str,
    #[case] raw: &str,
) {
    let mut settings = Settings {
        my_int: 7,
        my_uint8: 8,
        ..Settings::default()
    };
    let err = table
        .set_values(&mut settings, &values(&[(key, "--flag", raw)]))
        .err();
    assert!(
        matches!(err, Some(TierError::InvalidValue { ref raw_key, ref value, .. }) if raw_key == "--flag" && value == raw),
        "unexpected result: {err:?}"
    );
    assert_eq!((settings.my_int, settings.my_uint8, settings.my_bool), (7, 8, false));
}

#[rstest]
fn stops_at_first_failure_in_key_order(table: FieldTable<Settings>) {
    let mut settings = Settings::default();
    let result = table.set_values(
        &mut settings,
        &values(&[
            ("my_bool", "B", "true"),
            ("my_int", "I", "oops"),
            ("tag", "T", "late"),
        ]),
    );
    assert!(result.is_err());
    assert!(settings.my_bool, "earlier keys are applied");
    assert!(settings.label.is_empty(), "later keys are not");
}

#[rstest]
fn collision_names_both_fields() {
    let specs = vec![
        FieldSpec::scalar::<i32>("MyInt", |s: &mut Settings| &mut s.my_int),
        FieldSpec::scalar::<String>("Label", |s: &mut Settings| &mut s.label).with_name("my_int"),
    ];
    let err = FieldTable::from_specs(specs).err();
    assert!(
        matches!(
            err,
            Some(TierError::NameCollision { ref name, first: "MyInt", second: "Label" }) if name == "my_int"
        ),
        "unexpected result: {err:?}"
    );
}

#[rstest]
fn empty_registry_builds_empty_table() -> Result<()> {
    let table = FieldTable::<Settings>::from_specs(FieldRegistry::new().into_specs())?;
    ensure!(table.is_empty());
    ensure!(table.iter().next().is_none());
    Ok(())
}

#[rstest]
fn slots_assign_file_values() -> Result<()> {
    let mut settings = Settings::default();
    let slot = FieldSpec::scalar::<i32>("MyInt", |s: &mut Settings| &mut s.my_int).slot();
    slot.assign_file(&mut settings, Value::Integer(96))?;
    ensure!(settings.my_int == 96);
    ensure!(slot.assign_file(&mut settings, Value::Boolean(true)).is_err());
    ensure!(format!("{slot:?}") == "FieldSlot(Int(W32))");
    Ok(())
}
