//! Values — tagged entries in a file's value pool.
//!
//! Values back annotation elements and field initializers. The accessor
//! discipline matches [`Literal`](crate::Literal): a typed accessor on the
//! wrong kind fails instead of reinterpreting.

use crate::ids::{LiteralArrayId, StringId};
use crate::status::{Error, Result};

/// Discriminant of a [`Value`] payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    U1,
    Double,
    String,
    LiteralArray,
}

/// A single tagged value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    U1(bool),
    Double(f64),
    String(StringId),
    LiteralArray(LiteralArrayId),
}

impl Value {
    /// The kind selecting which accessor is valid.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::U1(_) => ValueKind::U1,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::LiteralArray(_) => ValueKind::LiteralArray,
        }
    }

    fn mismatch<T>(&self, wanted: ValueKind) -> Result<T> {
        Err(Error::Unsupported(format!(
            "value accessor for {wanted:?} called on a {:?} value",
            self.kind()
        )))
    }

    /// The boolean payload of a `U1` value.
    pub fn as_u1(&self) -> Result<bool> {
        match self {
            Value::U1(v) => Ok(*v),
            _ => self.mismatch(ValueKind::U1),
        }
    }

    /// The payload of a `Double` value.
    pub fn as_double(&self) -> Result<f64> {
        match self {
            Value::Double(v) => Ok(*v),
            _ => self.mismatch(ValueKind::Double),
        }
    }

    /// The interned text of a `String` value.
    pub fn as_string(&self) -> Result<StringId> {
        match self {
            Value::String(v) => Ok(*v),
            _ => self.mismatch(ValueKind::String),
        }
    }

    /// The array payload of a `LiteralArray` value.
    pub fn as_literal_array(&self) -> Result<LiteralArrayId> {
        match self {
            Value::LiteralArray(v) => Ok(*v),
            _ => self.mismatch(ValueKind::LiteralArray),
        }
    }
}
