//! Error types produced by the configuration loader.

mod conversions;
mod leaf;
mod types;

pub use leaf::{CoerceError, FileFault, FileValueError};
pub use types::{TierError, TierResult};
