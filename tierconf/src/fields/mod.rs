//! Field model: registration, resolved descriptors and the keyed field table.
//!
//! A record registers each addressable scalar field as a [`FieldSpec`]
//! holding a projection into the record. [`FieldTable::build`] resolves the
//! external names, rejects collisions and keeps the keys sorted so usage
//! listings and debug traces are deterministic.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use toml::Value;
use tracing::Level;

use crate::naming::external_name;
use crate::{CoerceError, FieldKind, Scalar, SourcedValues, TierConfig, TierError, TierResult};

/// Typed projection from a record to one of its scalar fields.
///
/// Each variant carries a function returning a mutable reference to the field,
/// so values are read and assigned without reflection.
#[non_exhaustive]
pub enum FieldSlot<R> {
    /// `i8` field.
    I8(fn(&mut R) -> &mut i8),
    /// `i16` field.
    I16(fn(&mut R) -> &mut i16),
    /// `i32` field.
    I32(fn(&mut R) -> &mut i32),
    /// `i64` field.
    I64(fn(&mut R) -> &mut i64),
    /// `isize` field.
    Isize(fn(&mut R) -> &mut isize),
    /// `u8` field.
    U8(fn(&mut R) -> &mut u8),
    /// `u16` field.
    U16(fn(&mut R) -> &mut u16),
    /// `u32` field.
    U32(fn(&mut R) -> &mut u32),
    /// `u64` field.
    U64(fn(&mut R) -> &mut u64),
    /// `usize` field.
    Usize(fn(&mut R) -> &mut usize),
    /// `f32` field.
    F32(fn(&mut R) -> &mut f32),
    /// `f64` field.
    F64(fn(&mut R) -> &mut f64),
    /// `bool` field.
    Bool(fn(&mut R) -> &mut bool),
    /// `String` field.
    String(fn(&mut R) -> &mut String),
    /// `chrono::DateTime<FixedOffset>` field.
    DateTime(fn(&mut R) -> &mut DateTime<FixedOffset>),
    /// `chrono::DateTime<Utc>` field.
    UtcDateTime(fn(&mut R) -> &mut DateTime<Utc>),
    /// `tracing::Level` field.
    Level(fn(&mut R) -> &mut Level),
}

macro_rules! with_slot {
    ($slot:expr, $project:ident => $body:expr) => {
        match $slot {
            FieldSlot::I8($project) => $body,
            FieldSlot::I16($project) => $body,
            FieldSlot::I32($project) => $body,
            FieldSlot::I64($project) => $body,
            FieldSlot::Isize($project) => $body,
            FieldSlot::U8($project) => $body,
            FieldSlot::U16($project) => $body,
            FieldSlot::U32($project) => $body,
            FieldSlot::U64($project) => $body,
            FieldSlot::Usize($project) => $body,
            FieldSlot::F32($project) => $body,
            FieldSlot::F64($project) => $body,
            FieldSlot::Bool($project) => $body,
            FieldSlot::String($project) => $body,
            FieldSlot::DateTime($project) => $body,
            FieldSlot::UtcDateTime($project) => $body,
            FieldSlot::Level($project) => $body,
        }
    };
}

const fn kind_of<R, V: Scalar>(_project: fn(&mut R) -> &mut V) -> FieldKind {
    V::KIND
}

fn render_field<R, V: Scalar>(project: fn(&mut R) -> &mut V, record: &mut R) -> String {
    project(record).render()
}

fn assign_parsed<R, V: Scalar>(
    project: fn(&mut R) -> &mut V,
    record: &mut R,
    raw: &str,
) -> Result<(), CoerceError> {
    *project(record) = V::parse(raw)?;
    Ok(())
}

fn assign_decoded<R, V: Scalar>(
    project: fn(&mut R) -> &mut V,
    record: &mut R,
    value: Value,
) -> Result<(), CoerceError> {
    *project(record) = V::from_file(value)?;
    Ok(())
}

impl<R> FieldSlot<R> {
    /// Declared kind of the projected field.
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        with_slot!(self, project => kind_of(project))
    }

    /// Renders the field's current value.
    pub fn render(self, record: &mut R) -> String {
        with_slot!(self, project => render_field(project, record))
    }

    /// Parses `raw` and stores it in the field.
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceError`] when `raw` does not fit the field; the field
    /// keeps its previous value.
    pub fn assign(self, record: &mut R, raw: &str) -> Result<(), CoerceError> {
        with_slot!(self, project => assign_parsed(project, record, raw))
    }

    /// Stores a value decoded from a configuration file in the field.
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceError`] on a type mismatch or an out-of-range number.
    pub fn assign_file(self, record: &mut R, value: Value) -> Result<(), CoerceError> {
        with_slot!(self, project => assign_decoded(project, record, value))
    }
}

impl<R> Clone for FieldSlot<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldSlot<R> {}

impl<R> fmt::Debug for FieldSlot<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldSlot").field(&self.kind()).finish()
    }
}

/// Registration entry for one scalar field.
#[derive(Debug)]
pub struct FieldSpec<R> {
    ident: &'static str,
    name: Option<&'static str>,
    help: Option<&'static str>,
    slot: FieldSlot<R>,
}

impl<R> FieldSpec<R> {
    /// Creates a spec for the field `ident`, reached through `project`.
    #[must_use]
    pub fn scalar<V: Scalar>(ident: &'static str, project: fn(&mut R) -> &mut V) -> Self {
        Self {
            ident,
            name: None,
            help: None,
            slot: V::slot(project),
        }
    }

    /// Overrides the name derived from the identifier.
    #[must_use]
    pub const fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Attaches help text shown in the usage listing.
    #[must_use]
    pub const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    /// Source identifier of the field.
    #[must_use]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Help text, if any.
    #[must_use]
    pub const fn help(&self) -> Option<&'static str> {
        self.help
    }

    /// Typed projection.
    #[must_use]
    pub const fn slot(&self) -> FieldSlot<R> {
        self.slot
    }

    /// External name: the explicit name, else the converted identifier.
    #[must_use]
    pub fn external_name(&self) -> String {
        external_name(self.ident, self.name)
    }
}

impl<R> Clone for FieldSpec<R> {
    fn clone(&self) -> Self {
        Self {
            ident: self.ident,
            name: self.name,
            help: self.help,
            slot: self.slot,
        }
    }
}

/// Ordered collection of field specs filled by [`TierConfig::register`].
#[derive(Debug)]
pub struct FieldRegistry<R> {
    specs: Vec<FieldSpec<R>>,
}

impl<R> FieldRegistry<R> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Appends a spec; declaration order is preserved.
    pub fn add(&mut self, spec: FieldSpec<R>) -> &mut Self {
        self.specs.push(spec);
        self
    }

    /// Registered specs in declaration order.
    #[must_use]
    pub const fn specs(&self) -> &[FieldSpec<R>] {
        self.specs.as_slice()
    }

    /// Consumes the registry, yielding the specs in declaration order.
    #[must_use]
    pub fn into_specs(self) -> Vec<FieldSpec<R>> {
        self.specs
    }
}

impl<R: TierConfig> FieldRegistry<R> {
    /// Collects the specs registered by `R`.
    #[must_use]
    pub fn of() -> Self {
        let mut registry = Self::new();
        R::register(&mut registry);
        registry
    }
}

impl<R> Default for FieldRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered field with its external name resolved.
#[derive(Debug)]
pub struct FieldDescriptor<R> {
    name: String,
    spec: FieldSpec<R>,
}

impl<R> FieldDescriptor<R> {
    /// External name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Source identifier.
    #[must_use]
    pub const fn ident(&self) -> &'static str {
        self.spec.ident()
    }

    /// Help text, if any.
    #[must_use]
    pub const fn help(&self) -> Option<&'static str> {
        self.spec.help()
    }

    /// Declared kind.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.spec.slot().kind()
    }

    /// Renders the field's current value in `record`.
    pub fn render(&self, record: &mut R) -> String {
        self.spec.slot().render(record)
    }

    /// Parses `raw` into the field of `record`.
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceError`] when `raw` does not fit the field.
    pub fn assign(&self, record: &mut R, raw: &str) -> Result<(), CoerceError> {
        self.spec.slot().assign(record, raw)
    }
}

/// Addressable fields of a record keyed by external name.
#[derive(Debug)]
pub struct FieldTable<R> {
    fields: HashMap<String, FieldDescriptor<R>>,
    keys: Vec<String>,
}

impl<R: TierConfig> FieldTable<R> {
    /// Builds the table for `R` from its registered fields.
    ///
    /// # Errors
    ///
    /// Returns [`TierError::NameCollision`] when two fields resolve to the
    /// same external name.
    pub fn build() -> TierResult<Self> {
        Self::from_specs(FieldRegistry::<R>::of().into_specs())
    }
}

impl<R> FieldTable<R> {
    /// Builds a table from explicit specs.
    ///
    /// # Errors
    ///
    /// Returns [`TierError::NameCollision`] naming both identifiers when two
    /// specs resolve to the same external name.
    pub fn from_specs(specs: impl IntoIterator<Item = FieldSpec<R>>) -> TierResult<Self> {
        let mut fields = HashMap::new();
        let mut keys = Vec::new();
        for spec in specs {
            match fields.entry(spec.external_name()) {
                Entry::Occupied(existing) => {
                    let first: &FieldDescriptor<R> = existing.get();
                    return Err(TierError::NameCollision {
                        name: existing.key().clone(),
                        first: first.ident(),
                        second: spec.ident(),
                    });
                }
                Entry::Vacant(slot) => {
                    keys.push(slot.key().clone());
                    let name = slot.key().clone();
                    slot.insert(FieldDescriptor { name, spec });
                }
            }
        }
        keys.sort_unstable();
        Ok(Self { fields, keys })
    }

    /// Looks up a field by external name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor<R>> {
        self.fields.get(name)
    }

    /// External names in lexicographic order.
    #[must_use]
    pub const fn keys(&self) -> &[String] {
        self.keys.as_slice()
    }

    /// Iterates the fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor<R>> {
        self.keys.iter().filter_map(|key| self.fields.get(key))
    }

    /// Number of addressable fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the record has no addressable fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Applies raw values to `record` in ascending key order.
    ///
    /// Stops at the first failure. Values applied before it stay in place and
    /// the failing field keeps its previous value.
    ///
    /// # Errors
    ///
    /// Returns [`TierError::UnknownKey`] for a key with no field and
    /// [`TierError::InvalidValue`] for a value that does not fit its field.
    pub fn set_values(&self, record: &mut R, values: &SourcedValues) -> TierResult<()> {
        for (key, sourced) in values {
            let Some(field) = self.get(key) else {
                return Err(TierError::UnknownKey {
                    key: key.clone(),
                    value: sourced.value().to_owned(),
                });
            };
            field
                .assign(record, sourced.value())
                .map_err(|source| TierError::InvalidValue {
                    key: key.clone(),
                    raw_key: sourced.raw_key().to_owned(),
                    value: sourced.value().to_owned(),
                    source,
                })?;
            tracing::trace!(
                field = field.ident(),
                source = sourced.raw_key(),
                value = sourced.value(),
                "applied configuration value"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
