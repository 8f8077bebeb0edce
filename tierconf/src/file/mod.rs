//! Configuration file source.
//!
//! The first existing file of the candidate list is parsed into a
//! [`Table`] and handed to [`TierConfig::apply_file_table`]. The helpers in
//! this module are what `#[derive(TierConfig)]` expands to.

mod decode;

use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub use decode::{apply_registered, decode_nested, decode_scalar, decode_value};
pub use toml::{Table, Value};

use crate::trace::DebugTrace;
use crate::{TierConfig, TierError, TierResult};

/// Syntax of a configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum FileFormat {
    /// TOML.
    #[default]
    Toml,
    /// JSON; needs the `json` feature.
    Json,
}

impl FileFormat {
    /// Chooses the format from a path's extension: `.json` is JSON and
    /// anything else is TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    /// Parses file contents into a table.
    ///
    /// # Errors
    ///
    /// Returns the parser's error when `data` is malformed or is not a table
    /// at the top level, or an error when JSON support is disabled.
    pub fn parse(self, data: &str) -> Result<Table, Box<dyn Error + Send + Sync>> {
        match self {
            Self::Toml => Ok(toml::from_str(data)?),
            Self::Json => {
                #[cfg(feature = "json")]
                {
                    Ok(serde_json::from_str(data)?)
                }
                #[cfg(not(feature = "json"))]
                {
                    Err(io::Error::other("json feature disabled").into())
                }
            }
        }
    }
}

/// Applies the first readable file of `files` to `record`.
///
/// Missing files are skipped; later candidates are never read once one file
/// has been applied. Returns the path that was applied, if any.
pub(crate) fn load_first<R: TierConfig, W: Write + ?Sized>(
    files: &[PathBuf],
    format: Option<FileFormat>,
    record: &mut R,
    trace: &mut DebugTrace<'_, W>,
) -> TierResult<Option<PathBuf>> {
    for (index, path) in files.iter().enumerate() {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "configuration file not found");
                trace.note(&format!("Skipping missing file: {}", path.display()))?;
                continue;
            }
            Err(err) => return Err(TierError::file(path, err)),
        };

        tracing::debug!(path = %path.display(), "loading configuration file");
        trace.note(&format!("Parsing file: {}", path.display()))?;
        let table = format
            .unwrap_or_else(|| FileFormat::from_path(path))
            .parse(&data)
            .map_err(|err| TierError::file(path, err))?;
        record
            .apply_file_table(table)
            .map_err(|err| TierError::file(path, err))?;

        for skipped in files.iter().skip(index + 1) {
            trace.note(&format!(
                "Previous file found, skipping file: {}",
                skipped.display()
            ))?;
        }
        return Ok(Some(path.clone()));
    }
    Ok(None)
}

#[cfg(test)]
mod tests;
