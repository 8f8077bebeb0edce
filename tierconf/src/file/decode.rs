//! Per-key decoding of file tables into records.

use serde::de::DeserializeOwned;
use toml::{Table, Value};

use crate::{FieldRegistry, FileFault, FileValueError, Scalar, TierConfig};

/// Decodes a scalar field value, checking its type and range.
///
/// # Errors
///
/// Returns a [`FileValueError`] for `key` when the value does not fit `V`.
pub fn decode_scalar<V: Scalar>(key: &str, value: Value) -> Result<V, FileValueError> {
    V::from_file(value).map_err(|err| FileValueError::new(key, err))
}

/// Deserializes a field that is not addressable, such as a list or map.
///
/// # Errors
///
/// Returns a [`FileValueError`] for `key` when deserialization fails.
pub fn decode_value<T: DeserializeOwned>(key: &str, value: Value) -> Result<T, FileValueError> {
    value
        .try_into()
        .map_err(|err| FileValueError::new(key, Box::new(err)))
}

/// Applies a nested table to a nested record in place.
///
/// # Errors
///
/// Returns a [`FileValueError`] when `value` is not a table or when one of
/// its keys fails; nested keys are reported as `key.inner`.
pub fn decode_nested<N: TierConfig>(
    target: &mut N,
    key: &str,
    value: Value,
) -> Result<(), FileValueError> {
    match value {
        Value::Table(table) => target.apply_file_table(table).map_err(|err| err.within(key)),
        other => Err(FileValueError::new(
            key,
            FileFault::NotATable {
                found: other.type_str(),
            },
        )),
    }
}

/// Applies `table` through `R`'s registered scalar fields.
///
/// This is the default [`TierConfig::apply_file_table`] for records that
/// register their fields by hand.
///
/// # Errors
///
/// Returns a [`FileValueError`] for the first key that names no registered
/// field or whose value does not fit it.
pub fn apply_registered<R: TierConfig>(record: &mut R, table: Table) -> Result<(), FileValueError> {
    let registry = FieldRegistry::<R>::of();
    for (key, value) in table {
        let Some(spec) = registry
            .specs()
            .iter()
            .find(|spec| spec.external_name() == key)
        else {
            return Err(FileValueError::unknown_key(key));
        };
        spec.slot()
            .assign_file(record, value)
            .map_err(|err| FileValueError::new(key, err))?;
    }
    Ok(())
}
