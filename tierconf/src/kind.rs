//! Static kinds of addressable configuration fields.

use std::fmt;

/// Bit width of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    /// 8-bit.
    W8,
    /// 16-bit.
    W16,
    /// 32-bit.
    W32,
    /// 64-bit.
    W64,
    /// Pointer-sized (`isize`/`usize`).
    Native,
}

/// Bit width of a floating point field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    /// `f32`.
    W32,
    /// `f64`.
    W64,
}

/// The declared kind of an addressable field.
///
/// `Display` renders the Rust type name; [`FieldKind::label`] gives the
/// coarse label used in usage listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Signed integer.
    Int(IntWidth),
    /// Unsigned integer.
    Uint(IntWidth),
    /// Floating point number.
    Float(FloatWidth),
    /// Boolean.
    Bool,
    /// UTF-8 string.
    String,
    /// Date-time with a fixed UTC offset.
    DateTime,
    /// Leveled severity (`trace` through `error`).
    Level,
}

impl FieldKind {
    /// Coarse label shown in the environment variable listing.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float",
            Self::Bool => "bool",
            Self::String => "string",
            Self::DateTime => "datetime",
            Self::Level => "level",
        }
    }

    const fn type_name(self) -> &'static str {
        match self {
            Self::Int(IntWidth::W8) => "i8",
            Self::Int(IntWidth::W16) => "i16",
            Self::Int(IntWidth::W32) => "i32",
            Self::Int(IntWidth::W64) => "i64",
            Self::Int(IntWidth::Native) => "isize",
            Self::Uint(IntWidth::W8) => "u8",
            Self::Uint(IntWidth::W16) => "u16",
            Self::Uint(IntWidth::W32) => "u32",
            Self::Uint(IntWidth::W64) => "u64",
            Self::Uint(IntWidth::Native) => "usize",
            Self::Float(FloatWidth::W32) => "f32",
            Self::Float(FloatWidth::W64) => "f64",
            Self::Bool => "bool",
            Self::String => "string",
            Self::DateTime => "datetime",
            Self::Level => "level",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
