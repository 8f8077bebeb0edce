//! The `--debug-conf` trace written to the loader's output.

use std::io::{self, Write};

use crate::{FieldTable, SourcedValues};

const PREFIX: &str = "CONF: ";

/// Writes `CONF: ` lines to an output when enabled and nothing otherwise.
pub(crate) struct DebugTrace<'w, W: Write + ?Sized> {
    out: &'w mut W,
    enabled: bool,
}

impl<'w, W: Write + ?Sized> DebugTrace<'w, W> {
    pub(crate) const fn new(out: &'w mut W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    /// Writes a single prefixed line.
    pub(crate) fn note(&mut self, message: &str) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        writeln!(self.out, "{PREFIX}{message}")
    }

    /// Dumps every addressable field of `record` under `header`.
    pub(crate) fn fields<R>(
        &mut self,
        header: &str,
        table: &FieldTable<R>,
        record: &mut R,
    ) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        writeln!(self.out, "{PREFIX}{header}")?;
        for field in table.iter() {
            let value = field.render(record);
            writeln!(self.out, "{PREFIX}{:>40} = {value}", field.ident())?;
        }
        writeln!(self.out)
    }

    /// Dumps the raw values contributed by one source under `header`.
    pub(crate) fn values(&mut self, header: &str, values: &SourcedValues) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        writeln!(self.out, "{PREFIX}{header}")?;
        for sourced in values.values() {
            writeln!(self.out, "{PREFIX}{:>40} = {}", sourced.raw_key(), sourced.value())?;
        }
        writeln!(self.out)
    }
}
