//! Loading session that layers every source onto a record.
//!
//! Priority, lowest first: the record's own values, the first configuration
//! file found, environment variables, command-line flags.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use crate::file::{self, FileFormat};
use crate::trace::DebugTrace;
use crate::{
    EnvSource, FieldTable, ProcessEnv, TierConfig, TierResult, build_command, parse_flags,
    read_env,
};

/// Result of a successful [`Loader::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum LoadOutcome {
    /// Every source was applied.
    Loaded,
    /// `--help` was given; usage was written and the record left untouched.
    HelpRequested,
}

/// A configuration loading session for one record.
///
/// Arguments default to the process arguments without the program name, the
/// environment to the process environment and output to stdout. Each can be
/// replaced for embedding and tests.
///
/// ```rust,no_run
/// use std::collections::HashMap;
/// use tierconf::{LoadOutcome, Loader, TierConfig};
///
/// #[derive(Default, TierConfig)]
/// struct Conf {
///     num_workers: u32,
/// }
///
/// let mut conf = Conf { num_workers: 4 };
/// let env = HashMap::from([("APP_NUM_WORKERS".to_owned(), "8".to_owned())]);
/// let outcome = Loader::new(&mut conf, "app", "Example app", ["app.toml"])
///     .with_args(["--num-workers=16"])
///     .with_env(env)
///     .load()?;
/// assert_eq!(outcome, LoadOutcome::Loaded);
/// assert_eq!(conf.num_workers, 16);
/// # Ok::<(), tierconf::TierError>(())
/// ```
pub struct Loader<'a, R> {
    record: &'a mut R,
    name: String,
    description: String,
    files: Vec<PathBuf>,
    args: Vec<OsString>,
    env: Box<dyn EnvSource + 'a>,
    output: Box<dyn Write + 'a>,
    format: Option<FileFormat>,
    usage: Option<String>,
}

impl<'a, R: TierConfig> Loader<'a, R> {
    /// Starts a session for `record`.
    ///
    /// `name` is the environment namespace and the command name in usage;
    /// `files` are the configuration file candidates in priority order.
    pub fn new<I, P>(
        record: &'a mut R,
        name: impl Into<String>,
        description: impl Into<String>,
        files: I,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            record,
            name: name.into(),
            description: description.into(),
            files: files.into_iter().map(Into::into).collect(),
            args: std::env::args_os().skip(1).collect(),
            env: Box::new(ProcessEnv),
            output: Box::new(io::stdout()),
            format: None,
            usage: None,
        }
    }

    /// Replaces the argument vector; the program name must not be included.
    #[must_use]
    pub fn with_args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the environment.
    #[must_use]
    pub fn with_env(mut self, env: impl EnvSource + 'a) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Redirects usage and `--debug-conf` output.
    #[must_use]
    pub fn with_output(mut self, output: impl Write + 'a) -> Self {
        self.output = Box::new(output);
        self
    }

    /// Forces a file format instead of choosing by extension.
    #[must_use]
    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Usage text rendered by the last [`Loader::load`], once flags were built.
    #[must_use]
    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    /// Applies every source to the record.
    ///
    /// Values applied before a failure stay in the record.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::TierError`] when the field table or flags cannot be
    /// built, arguments do not parse, a file cannot be read or decoded, a
    /// value does not fit its field, or output cannot be written.
    pub fn load(&mut self) -> TierResult<LoadOutcome> {
        let table = FieldTable::<R>::build()?;
        let mut command = build_command(&self.name, &self.description, &table, self.record)?;
        self.usage = Some(command.render_help().to_string());
        let flags = parse_flags(command, &table, self.args.iter().cloned())?;

        if flags.help {
            if let Some(usage) = &self.usage {
                self.output.write_all(usage.as_bytes())?;
                self.output.flush()?;
            }
            return Ok(LoadOutcome::HelpRequested);
        }

        let mut trace = DebugTrace::new(self.output.as_mut(), flags.debug);
        trace.fields("Default overridable values:", &table, self.record)?;

        let applied = file::load_first(&self.files, self.format, self.record, &mut trace)?;
        trace.fields("Overridable values after file parsing:", &table, self.record)?;

        let env_values = read_env(&self.name, &table, self.env.as_ref());
        table.set_values(self.record, &env_values)?;
        table.set_values(self.record, &flags.values)?;

        trace.values("Command line overrides:", &flags.values)?;
        trace.values("Environment overrides:", &env_values)?;
        trace.fields("Final top level values:", &table, self.record)?;
        self.output.flush()?;

        tracing::debug!(
            namespace = %self.name,
            file = ?applied,
            env = env_values.len(),
            flags = flags.values.len(),
            "configuration loaded"
        );
        Ok(LoadOutcome::Loaded)
    }

    /// Loads like [`Loader::load`] and exits on anything but success.
    ///
    /// On error the message and usage are written to the output and the
    /// process exits with status 1. A help request also exits with status 1
    /// after writing usage.
    pub fn must_load(mut self) {
        match self.load() {
            Ok(LoadOutcome::Loaded) => {}
            Ok(LoadOutcome::HelpRequested) => process::exit(1),
            Err(err) => {
                let usage = self.usage.as_deref().unwrap_or_default();
                let report = writeln!(
                    self.output,
                    "Error while reading configuration: {err}\n\n{usage}"
                )
                .and_then(|()| self.output.flush());
                if let Err(write_err) = report {
                    tracing::error!(error = %err, %write_err, "failed to report configuration error");
                }
                process::exit(1)
            }
        }
    }
}
