//! Command-line flag source built on `clap`.
//!
//! Each addressable field becomes a `--dashed-name` flag whose default is the
//! field's current value. Only flags actually present on the command line are
//! reported, so defaults never override file or environment values.

use std::ffi::OsString;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use crate::naming::flag_name;
use crate::{
    FieldDescriptor, FieldKind, FieldTable, SourcedValue, SourcedValues, TierError, TierResult,
    env_usage,
};

/// Long flag that prints usage.
pub const HELP_FLAG: &str = "help";
/// Long flag that traces every loading stage.
pub const DEBUG_FLAG: &str = "debug-conf";

const HELP_ID: &str = "help";
const DEBUG_ID: &str = "debug_conf";

/// Outcome of parsing the argument vector.
#[derive(Debug, Default)]
pub struct ParsedFlags {
    /// Field values given on the command line, keyed by external name.
    pub values: SourcedValues,
    /// Whether `--help` was given.
    pub help: bool,
    /// Whether `--debug-conf` was given.
    pub debug: bool,
}

/// Builds the flag parser for `table`, showing `record`'s current values as
/// defaults and the environment listing as after-help.
///
/// # Errors
///
/// Returns [`TierError::ReservedName`] when a field's flag would be `--help`
/// or `--debug-conf`.
pub fn build_command<R>(
    namespace: &str,
    description: &str,
    table: &FieldTable<R>,
    record: &mut R,
) -> TierResult<Command> {
    let mut command = Command::new(namespace.to_owned())
        .about(description.to_owned())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true)
        .after_help(env_usage(namespace, table));

    for field in table.iter() {
        let flag = flag_name(field.name());
        if flag == HELP_FLAG || flag == DEBUG_FLAG {
            return Err(TierError::ReservedName {
                name: field.name().to_owned(),
                field: field.ident(),
            });
        }
        command = command.arg(field_arg(field, record));
    }

    Ok(command
        .arg(
            Arg::new(HELP_ID)
                .long(HELP_FLAG)
                .short('h')
                .action(ArgAction::SetTrue)
                .help("print this usage"),
        )
        .arg(
            Arg::new(DEBUG_ID)
                .long(DEBUG_FLAG)
                .action(ArgAction::SetTrue)
                .help("print configuration values as each source is applied"),
        ))
}

fn field_arg<R>(field: &FieldDescriptor<R>, record: &mut R) -> Arg {
    let name = field.name();
    let mut arg = Arg::new(name.to_owned())
        .long(flag_name(name))
        .value_name(field.kind().label().to_uppercase())
        .value_parser(value_parser!(String))
        .action(ArgAction::Set)
        .help(format!("set value for {name}"));

    let current = field.render(record);
    if !current.is_empty() {
        arg = arg.default_value(current);
    }

    match field.kind() {
        FieldKind::Bool => arg
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true"),
        FieldKind::Int(_) | FieldKind::Uint(_) | FieldKind::Float(_) => {
            arg.allow_negative_numbers(true)
        }
        _ => arg,
    }
}

/// Parses `args` against `command`.
///
/// Long flags may also be written with a single dash, so `-my-int=56` is
/// read as `--my-int=56`. Arguments after `--` are passed through untouched.
///
/// # Errors
///
/// Returns [`TierError::CliParsing`] for unknown flags or malformed
/// arguments.
pub fn parse_flags<R, I, T>(
    command: Command,
    table: &FieldTable<R>,
    args: I,
) -> TierResult<ParsedFlags>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut passthrough = false;
    let args = args.into_iter().map(|raw| {
        let arg: OsString = raw.into();
        if passthrough {
            return arg;
        }
        passthrough = arg == "--";
        single_dash_as_long(arg)
    });
    let matches = command.try_get_matches_from(args)?;
    let values = table
        .iter()
        .filter(|field| matches.value_source(field.name()) == Some(ValueSource::CommandLine))
        .filter_map(|field| {
            let value = matches.try_get_one::<String>(field.name()).ok().flatten()?;
            Some((
                field.name().to_owned(),
                SourcedValue::new(flag_name(field.name()), value.clone()),
            ))
        })
        .collect();

    Ok(ParsedFlags {
        values,
        help: flag_set(&matches, HELP_ID),
        debug: flag_set(&matches, DEBUG_ID),
    })
}

/// Rewrites `-name[=value]` to `--name[=value]`.
///
/// Short flags such as `-h`, negative numbers and non-UTF-8 arguments are
/// returned unchanged.
fn single_dash_as_long(arg: OsString) -> OsString {
    let Some(rest) = arg.to_str().and_then(|text| text.strip_prefix('-')) else {
        return arg;
    };
    let is_long = rest.chars().nth(1).is_some()
        && !rest.starts_with(|c: char| c == '-' || c == '.' || c.is_ascii_digit());
    if is_long {
        OsString::from(format!("--{rest}"))
    } else {
        arg
    }
}

fn flag_set(matches: &ArgMatches, id: &str) -> bool {
    matches
        .try_get_one::<bool>(id)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}
