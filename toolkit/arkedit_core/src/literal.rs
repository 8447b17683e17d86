//! Literals — tagged constants stored in a file's literal pool.
//!
//! A literal's tag selects which typed accessor is valid; calling any
//! other accessor is an [`UnsupportedOperation`](crate::Status) error, not
//! a reinterpretation of the payload. Method literals carry the function
//! name as an interned string; nested literal arrays are referenced by id.

use crate::ids::{LiteralArrayId, StringId};
use crate::status::{Error, Result};

/// Discriminant of a [`Literal`] payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LiteralTag {
    Bool,
    U8,
    U16,
    U32,
    U64,
    Float,
    Double,
    String,
    Method,
    LiteralArray,
}

/// A single tagged constant.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Float(f32),
    Double(f64),
    String(StringId),
    Method(StringId),
    LiteralArray(LiteralArrayId),
}

impl Literal {
    /// The tag selecting which accessor is valid.
    pub fn tag(&self) -> LiteralTag {
        match self {
            Literal::Bool(_) => LiteralTag::Bool,
            Literal::U8(_) => LiteralTag::U8,
            Literal::U16(_) => LiteralTag::U16,
            Literal::U32(_) => LiteralTag::U32,
            Literal::U64(_) => LiteralTag::U64,
            Literal::Float(_) => LiteralTag::Float,
            Literal::Double(_) => LiteralTag::Double,
            Literal::String(_) => LiteralTag::String,
            Literal::Method(_) => LiteralTag::Method,
            Literal::LiteralArray(_) => LiteralTag::LiteralArray,
        }
    }

    fn mismatch<T>(&self, wanted: LiteralTag) -> Result<T> {
        Err(Error::Unsupported(format!(
            "literal accessor for {wanted:?} called on a {:?} literal",
            self.tag()
        )))
    }

    /// The boolean payload of a `Bool` literal.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Literal::Bool(v) => Ok(*v),
            _ => self.mismatch(LiteralTag::Bool),
        }
    }

    /// The payload of a `U8` literal.
    pub fn as_u8(&self) -> Result<u8> {
        match self {
            Literal::U8(v) => Ok(*v),
            _ => self.mismatch(LiteralTag::U8),
        }
    }

    /// The payload of a `U16` literal.
    pub fn as_u16(&self) -> Result<u16> {
        match self {
            Literal::U16(v) => Ok(*v),
            _ => self.mismatch(LiteralTag::U16),
        }
    }

    /// The payload of a `U32` literal.
    pub fn as_u32(&self) -> Result<u32> {
        match self {
            Literal::U32(v) => Ok(*v),
            _ => self.mismatch(LiteralTag::U32),
        }
    }

    /// The payload of a `U64` literal.
    pub fn as_u64(&self) -> Result<u64> {
        match self {
            Literal::U64(v) => Ok(*v),
            _ => self.mismatch(LiteralTag::U64),
        }
    }

    /// The payload of a `Float` literal.
    pub fn as_float(&self) -> Result<f32> {
        match self {
            Literal::Float(v) => Ok(*v),
            _ => self.mismatch(LiteralTag::Float),
        }
    }

    /// The payload of a `Double` literal.
    pub fn as_double(&self) -> Result<f64> {
        match self {
            Literal::Double(v) => Ok(*v),
            _ => self.mismatch(LiteralTag::Double),
        }
    }

    /// The interned text of a `String` literal.
    pub fn as_string(&self) -> Result<StringId> {
        match self {
            Literal::String(v) => Ok(*v),
            _ => self.mismatch(LiteralTag::String),
        }
    }

    /// The interned function name of a `Method` literal.
    pub fn as_method(&self) -> Result<StringId> {
        match self {
            Literal::Method(v) => Ok(*v),
            _ => self.mismatch(LiteralTag::Method),
        }
    }

    /// The nested array of a `LiteralArray` literal.
    pub fn as_literal_array(&self) -> Result<LiteralArrayId> {
        match self {
            Literal::LiteralArray(v) => Ok(*v),
            _ => self.mismatch(LiteralTag::LiteralArray),
        }
    }
}
