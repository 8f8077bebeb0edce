//! Primary error enum for configuration loading flows.

use std::error::Error;
use std::path::PathBuf;

use thiserror::Error;

use super::CoerceError;

/// Result alias used throughout the crate.
pub type TierResult<T> = Result<T, TierError>;

/// Errors that can occur while loading configuration.
///
/// Every variant aborts the load. Values applied before the failure stay in
/// the record.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TierError {
    /// Two registered fields resolve to the same external name.
    #[error("{first} name collides with {second}: both map to '{name}'")]
    NameCollision {
        /// The shared external name.
        name: String,
        /// Identifier of the field registered first.
        first: &'static str,
        /// Identifier of the field registered second.
        second: &'static str,
    },

    /// A field resolves to a name used by a control flag.
    #[error("{field} maps to '{name}', which is reserved for a control flag")]
    ReservedName {
        /// The reserved external name.
        name: String,
        /// Identifier of the offending field.
        field: &'static str,
    },

    /// Error parsing command-line arguments.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// Error originating from a configuration file.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the configuration failure.
        path: PathBuf,
        /// Underlying read, parse or decode error.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    /// A source supplied a key that matches no registered field.
    #[error("unknown key '{key}' for value '{value}'")]
    UnknownKey {
        /// External name that was looked up.
        key: String,
        /// Raw value supplied for the key.
        value: String,
    },

    /// A raw value could not be converted to its field's kind.
    #[error("invalid value for '{key}' (from {raw_key}): {source}")]
    InvalidValue {
        /// External name of the field.
        key: String,
        /// Source-specific key, such as the environment variable name.
        raw_key: String,
        /// Raw value that failed to convert.
        value: String,
        /// Conversion failure.
        #[source]
        source: CoerceError,
    },

    /// Writing usage or trace output failed.
    #[error("failed to write configuration output: {0}")]
    Output(#[from] std::io::Error),
}
