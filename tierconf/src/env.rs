//! Environment variable source.
//!
//! Every addressable field is probed under `<NAMESPACE>_<NAME>`. Variables
//! are read through the [`EnvSource`] trait so tests and embedders can supply
//! a map instead of the process environment.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::naming::env_var_name;
use crate::{FieldTable, SourcedValue, SourcedValues};

/// Read access to environment variables.
pub trait EnvSource {
    /// Returns the value of `key`, or `None` when it is unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Collects the environment values addressed to `table`'s fields.
///
/// Unset and empty variables are treated as absent. Each value keeps the
/// variable name as its raw key.
pub fn read_env<R>(
    namespace: &str,
    table: &FieldTable<R>,
    source: &dyn EnvSource,
) -> SourcedValues {
    table
        .keys()
        .iter()
        .filter_map(|name| {
            let var = env_var_name(namespace, name);
            source
                .var(&var)
                .filter(|value| !value.is_empty())
                .map(|value| (name.clone(), SourcedValue::new(var, value)))
        })
        .collect()
}

/// Renders the environment variable listing shown after flag usage.
///
/// One line per field in key order: the right-aligned variable name, its kind
/// label and any help text.
#[must_use]
pub fn env_usage<R>(namespace: &str, table: &FieldTable<R>) -> String {
    let mut usage = String::from("Environment variables:\n");
    for field in table.iter() {
        let var = env_var_name(namespace, field.name());
        let label = field.kind().label();
        let line = field.help().map_or_else(
            || format!("    {var:>40} - {label}\n"),
            |help| format!("    {var:>40} - {label} ({help})\n"),
        );
        usage.push_str(&line);
    }
    usage
}
