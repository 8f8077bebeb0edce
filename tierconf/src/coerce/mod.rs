//! Conversion of raw values into statically typed field values.
//!
//! Each supported scalar type implements [`Scalar`], which knows how to parse
//! the text supplied by environment variables and flags, how to accept a
//! decoded file value, and which [`FieldSlot`] variant carries it.

mod datetime;

use chrono::{DateTime, FixedOffset, Utc};
use toml::Value;
use tracing::Level;

use crate::{CoerceError, FieldKind, FieldSlot, FloatWidth, IntWidth};

mod sealed {
    pub trait Sealed {}
}

/// A field type the loader can address directly.
///
/// Implemented for `i8`–`i64`, `isize`, `u8`–`u64`, `usize`, `f32`, `f64`,
/// `bool`, `String`, `chrono::DateTime<FixedOffset>`, `chrono::DateTime<Utc>`
/// and `tracing::Level`.
/// The trait is sealed.
pub trait Scalar: sealed::Sealed + Sized {
    /// Declared kind of the type.
    const KIND: FieldKind;

    /// Parses text from an environment variable or flag.
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceError`] describing why `raw` does not fit the type.
    fn parse(raw: &str) -> Result<Self, CoerceError>;

    /// Accepts a value decoded from a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`CoerceError`] when the value has the wrong type or does not
    /// fit the type's range.
    fn from_file(value: Value) -> Result<Self, CoerceError>;

    /// Renders the value for usage text and debug traces.
    fn render(&self) -> String;

    /// Wraps a projection into the matching [`FieldSlot`] variant.
    fn slot<R>(project: fn(&mut R) -> &mut Self) -> FieldSlot<R>;
}

fn mismatch(expected: FieldKind, found: &Value) -> CoerceError {
    CoerceError::Mismatch {
        expected,
        found: found.type_str(),
    }
}

macro_rules! integer_scalar {
    ($($ty:ty => $variant:ident, $kind:expr;)*) => {$(
        impl sealed::Sealed for $ty {}

        impl Scalar for $ty {
            const KIND: FieldKind = $kind;

            fn parse(raw: &str) -> Result<Self, CoerceError> {
                raw.parse::<$ty>().map_err(|source| CoerceError::Integer {
                    value: raw.to_owned(),
                    kind: Self::KIND,
                    source,
                })
            }

            fn from_file(value: Value) -> Result<Self, CoerceError> {
                match value {
                    Value::Integer(number) => Self::try_from(number).map_err(|_| {
                        CoerceError::OutOfRange {
                            value: number,
                            kind: Self::KIND,
                        }
                    }),
                    other => Err(mismatch(Self::KIND, &other)),
                }
            }

            fn render(&self) -> String {
                self.to_string()
            }

            fn slot<R>(project: fn(&mut R) -> &mut Self) -> FieldSlot<R> {
                FieldSlot::$variant(project)
            }
        }
    )*};
}

integer_scalar! {
    i8 => I8, FieldKind::Int(IntWidth::W8);
    i16 => I16, FieldKind::Int(IntWidth::W16);
    i32 => I32, FieldKind::Int(IntWidth::W32);
    i64 => I64, FieldKind::Int(IntWidth::W64);
    isize => Isize, FieldKind::Int(IntWidth::Native);
    u8 => U8, FieldKind::Uint(IntWidth::W8);
    u16 => U16, FieldKind::Uint(IntWidth::W16);
    u32 => U32, FieldKind::Uint(IntWidth::W32);
    u64 => U64, FieldKind::Uint(IntWidth::W64);
    usize => Usize, FieldKind::Uint(IntWidth::Native);
}

impl sealed::Sealed for f32 {}

impl Scalar for f32 {
    const KIND: FieldKind = FieldKind::Float(FloatWidth::W32);

    fn parse(raw: &str) -> Result<Self, CoerceError> {
        raw.parse::<Self>().map_err(|source| CoerceError::Float {
            value: raw.to_owned(),
            kind: Self::KIND,
            source,
        })
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        reason = "file numbers are 64-bit; narrowing to the declared width is intended"
    )]
    fn from_file(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Float(number) => Ok(number as Self),
            Value::Integer(number) => Ok(number as Self),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn slot<R>(project: fn(&mut R) -> &mut Self) -> FieldSlot<R> {
        FieldSlot::F32(project)
    }
}

impl sealed::Sealed for f64 {}

impl Scalar for f64 {
    const KIND: FieldKind = FieldKind::Float(FloatWidth::W64);

    fn parse(raw: &str) -> Result<Self, CoerceError> {
        raw.parse::<Self>().map_err(|source| CoerceError::Float {
            value: raw.to_owned(),
            kind: Self::KIND,
            source,
        })
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "integers written for float fields are taken at face value"
    )]
    fn from_file(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Float(number) => Ok(number),
            Value::Integer(number) => Ok(number as Self),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn slot<R>(project: fn(&mut R) -> &mut Self) -> FieldSlot<R> {
        FieldSlot::F64(project)
    }
}

impl sealed::Sealed for bool {}

impl Scalar for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn parse(raw: &str) -> Result<Self, CoerceError> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(CoerceError::Bool {
                value: raw.to_owned(),
            }),
        }
    }

    fn from_file(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Boolean(flag) => Ok(flag),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn slot<R>(project: fn(&mut R) -> &mut Self) -> FieldSlot<R> {
        FieldSlot::Bool(project)
    }
}

impl sealed::Sealed for String {}

impl Scalar for String {
    const KIND: FieldKind = FieldKind::String;

    fn parse(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw.to_owned())
    }

    fn from_file(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::String(text) => Ok(text),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }

    fn render(&self) -> String {
        self.clone()
    }

    fn slot<R>(project: fn(&mut R) -> &mut Self) -> FieldSlot<R> {
        FieldSlot::String(project)
    }
}

impl sealed::Sealed for DateTime<FixedOffset> {}

impl Scalar for DateTime<FixedOffset> {
    const KIND: FieldKind = FieldKind::DateTime;

    fn parse(raw: &str) -> Result<Self, CoerceError> {
        datetime::parse(raw)
    }

    fn from_file(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Datetime(stamp) => datetime::parse(&stamp.to_string()),
            Value::String(text) => datetime::parse(&text),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }

    fn render(&self) -> String {
        datetime::render(self)
    }

    fn slot<R>(project: fn(&mut R) -> &mut Self) -> FieldSlot<R> {
        FieldSlot::DateTime(project)
    }
}

impl sealed::Sealed for DateTime<Utc> {}

impl Scalar for DateTime<Utc> {
    const KIND: FieldKind = FieldKind::DateTime;

    fn parse(raw: &str) -> Result<Self, CoerceError> {
        datetime::parse(raw).map(|stamp| stamp.with_timezone(&Utc))
    }

    fn from_file(value: Value) -> Result<Self, CoerceError> {
        DateTime::<FixedOffset>::from_file(value).map(|stamp| stamp.with_timezone(&Utc))
    }

    fn render(&self) -> String {
        datetime::render(&self.fixed_offset())
    }

    fn slot<R>(project: fn(&mut R) -> &mut Self) -> FieldSlot<R> {
        FieldSlot::UtcDateTime(project)
    }
}

/// Level names accepted in any letter case.
const LEVEL_NAMES: [(&str, Level); 5] = [
    ("trace", Level::TRACE),
    ("debug", Level::DEBUG),
    ("info", Level::INFO),
    ("warn", Level::WARN),
    ("error", Level::ERROR),
];

impl sealed::Sealed for Level {}

impl Scalar for Level {
    const KIND: FieldKind = FieldKind::Level;

    fn parse(raw: &str) -> Result<Self, CoerceError> {
        LEVEL_NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(raw))
            .map(|&(_, level)| level)
            .ok_or_else(|| CoerceError::Level {
                value: raw.to_owned(),
            })
    }

    fn from_file(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::String(text) => Self::parse(&text),
            other => Err(mismatch(Self::KIND, &other)),
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn slot<R>(project: fn(&mut R) -> &mut Self) -> FieldSlot<R> {
        FieldSlot::Level(project)
    }
}
