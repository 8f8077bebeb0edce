//! Leaf errors raised while converting individual values.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::FieldKind;

/// Failure converting a raw value into a field's kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CoerceError {
    /// The text is not a base-10 integer that fits the field.
    #[error("'{value}' is not a valid {kind}: {source}")]
    Integer {
        /// Offending text.
        value: String,
        /// Destination kind.
        kind: FieldKind,
        /// Parser failure.
        #[source]
        source: ParseIntError,
    },

    /// The text is not a floating point number.
    #[error("'{value}' is not a valid {kind}: {source}")]
    Float {
        /// Offending text.
        value: String,
        /// Destination kind.
        kind: FieldKind,
        /// Parser failure.
        #[source]
        source: ParseFloatError,
    },

    /// The text is not one of the accepted boolean spellings.
    #[error("'{value}' is not a valid bool")]
    Bool {
        /// Offending text.
        value: String,
    },

    /// No date, time or timestamp format matched the text.
    #[error("'{value}' is not a recognised date, time or timestamp")]
    DateTime {
        /// Offending text.
        value: String,
    },

    /// The text names no known level.
    #[error("'{value}' is not a known level; expected trace, debug, info, warn or error")]
    Level {
        /// Offending text.
        value: String,
    },

    /// A file integer does not fit the field's width.
    #[error("{value} is out of range for {kind}")]
    OutOfRange {
        /// Offending number.
        value: i64,
        /// Destination kind.
        kind: FieldKind,
    },

    /// A file value has the wrong type for the field.
    #[error("expected {expected}, found {found}")]
    Mismatch {
        /// Destination kind.
        expected: FieldKind,
        /// Type name of the value found in the file.
        found: &'static str,
    },
}

/// What went wrong with a single configuration file key.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FileFault {
    /// The key matches no field of the record.
    #[error("not a known configuration key")]
    UnknownKey,

    /// A scalar value does not fit its field.
    #[error(transparent)]
    Coerce(#[from] CoerceError),

    /// A structured value failed to deserialize.
    #[error(transparent)]
    Decode(#[from] Box<toml::de::Error>),

    /// A nested record was given something other than a table.
    #[error("expected a table, found {found}")]
    NotATable {
        /// Type name of the value found in the file.
        found: &'static str,
    },
}

/// Failure applying a decoded file to a record.
#[derive(Debug, Error)]
#[error("key '{key}': {fault}")]
pub struct FileValueError {
    key: String,
    #[source]
    fault: FileFault,
}

impl FileValueError {
    /// Creates an error for `key`.
    #[must_use]
    pub fn new(key: impl Into<String>, fault: impl Into<FileFault>) -> Self {
        Self {
            key: key.into(),
            fault: fault.into(),
        }
    }

    /// Creates an error for a key that matches no field.
    #[must_use]
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::new(key, FileFault::UnknownKey)
    }

    /// Prefixes the key with the table it was found in.
    #[must_use]
    pub fn within(mut self, parent: &str) -> Self {
        self.key = format!("{parent}.{}", self.key);
        self
    }

    /// Dotted path of the offending key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying fault.
    #[must_use]
    pub const fn fault(&self) -> &FileFault {
        &self.fault
    }
}
