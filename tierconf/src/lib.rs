//! Core crate for the `tierconf` layered configuration loader.
//!
//! A configuration record is populated from four sources, each overriding the
//! one before it:
//!
//! 1. the values the record already holds (its defaults),
//! 2. the first configuration file found in a candidate list,
//! 3. environment variables named `<NAMESPACE>_<FIELD>`,
//! 4. command-line flags named `--<field>`.
//!
//! Records describe their addressable fields through the [`TierConfig`]
//! trait, normally via `#[derive(TierConfig)]` from the companion
//! `tierconf_macros` crate.
//!
//! ```rust,no_run
//! use tierconf::{Loader, TierConfig};
//!
//! #[derive(Debug, Default, TierConfig)]
//! struct ServerConfig {
//!     port: u16,
//!     #[tierconf(name = "opensearch", help = "the OpenSearch URL")]
//!     open_search: String,
//! }
//!
//! let mut config = ServerConfig { port: 8080, ..ServerConfig::default() };
//! Loader::new(&mut config, "server", "Example server", ["server.toml"]).must_load();
//! ```

extern crate self as tierconf;

pub use tierconf_macros::TierConfig;

mod coerce;
mod env;
mod error;
mod fields;
pub mod file;
mod flags;
mod kind;
mod loader;
pub mod naming;
mod trace;
mod values;

pub use coerce::Scalar;
pub use env::{EnvSource, ProcessEnv, env_usage, read_env};
pub use error::{CoerceError, FileFault, FileValueError, TierError, TierResult};
pub use fields::{FieldDescriptor, FieldRegistry, FieldSlot, FieldSpec, FieldTable};
pub use file::FileFormat;
pub use flags::{DEBUG_FLAG, HELP_FLAG, ParsedFlags, build_command, parse_flags};
pub use kind::{FieldKind, FloatWidth, IntWidth};
pub use loader::{LoadOutcome, Loader};
pub use values::{SourcedValue, SourcedValues};

/// Trait implemented by configuration records.
///
/// The derive macro generates both methods. Implementing the trait by hand is
/// supported: register each scalar field with [`FieldRegistry::add`] and keep
/// the default [`TierConfig::apply_file_table`], which maps file keys onto the
/// registered scalars.
///
/// ```rust
/// use tierconf::{FieldRegistry, FieldSpec, TierConfig};
///
/// struct Manual {
///     workers: u32,
/// }
///
/// impl TierConfig for Manual {
///     fn register(fields: &mut FieldRegistry<Self>) {
///         fields.add(FieldSpec::scalar::<u32>("NumWorkers", |c: &mut Self| &mut c.workers));
///     }
/// }
/// ```
pub trait TierConfig: Sized {
    /// Registers the record's addressable scalar fields in declaration order.
    fn register(fields: &mut FieldRegistry<Self>);

    /// Applies a decoded configuration file to the record in place.
    ///
    /// Keys are external field names. Fields absent from `table` keep their
    /// current values.
    ///
    /// # Errors
    ///
    /// Returns a [`FileValueError`] naming the first key that is unknown or
    /// whose value does not fit the field.
    fn apply_file_table(&mut self, table: file::Table) -> Result<(), FileValueError> {
        file::apply_registered(self, table)
    }
}
