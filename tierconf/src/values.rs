//! Raw values collected from environment variables and flags.

use std::collections::BTreeMap;

/// A raw value together with the source-specific key it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedValue {
    raw_key: String,
    value: String,
}

impl SourcedValue {
    /// Pairs a raw value with the key it came from, such as `FOO_MY_INT` or
    /// `my-int`.
    #[must_use]
    pub fn new(raw_key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            raw_key: raw_key.into(),
            value: value.into(),
        }
    }

    /// Source-specific key.
    #[must_use]
    pub const fn raw_key(&self) -> &str {
        self.raw_key.as_str()
    }

    /// Raw text of the value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.value.as_str()
    }
}

/// Raw values keyed by external field name, iterated in key order.
pub type SourcedValues = BTreeMap<String, SourcedValue>;
