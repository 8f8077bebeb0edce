//! Trait-based conversions between external error types and `TierError`.

use std::path::Path;

use super::TierError;

impl From<clap::Error> for TierError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(e.into())
    }
}

impl TierError {
    /// Construct a [`TierError::File`] for a configuration path.
    pub(crate) fn file(
        path: &Path,
        err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source: err.into(),
        }
    }
}
