//! Constant pools: values, literals and literal arrays.
//!
//! Pool entries are append-only and addressed by id; a literal array is
//! an ordered sequence of literal ids whose enumeration preserves
//! insertion order.

use std::sync::Arc;

use arkedit_core::{Error, Literal, LiteralArrayId, LiteralId, LiteralTag, Result, Value, ValueId};

use crate::file::File;

impl File {
    // ── Values ──────────────────────────────────────────────────────

    fn push_value(&mut self, value: Value) -> ValueId {
        let id = ValueId::new(
            u32::try_from(self.values.len()).unwrap_or_else(|_| panic!("value id overflow")),
        );
        self.values.push(value);
        id
    }

    /// Create a boolean value.
    pub fn create_value_u1(&mut self, value: bool) -> ValueId {
        self.push_value(Value::U1(value))
    }

    /// Create a floating-point value.
    pub fn create_value_double(&mut self, value: f64) -> ValueId {
        self.push_value(Value::Double(value))
    }

    /// Create a string value (interning the text).
    pub fn create_value_string(&mut self, text: &str) -> ValueId {
        let id = self.strings.intern(text);
        self.push_value(Value::String(id))
    }

    /// Create a value referencing a literal array.
    pub fn create_value_literal_array(&mut self, array: LiteralArrayId) -> Result<ValueId> {
        self.literal_array_record(array)?;
        Ok(self.push_value(Value::LiteralArray(array)))
    }

    /// Look up a value by id.
    pub fn value(&self, id: ValueId) -> Result<Value> {
        match self.values.get(id.index()) {
            Some(&value) => Ok(value),
            None => self.fail(Error::bad_argument(format!(
                "stale or foreign value handle {}",
                id.raw()
            ))),
        }
    }

    // ── Literals ────────────────────────────────────────────────────

    fn push_literal(&mut self, literal: Literal) -> LiteralId {
        let id = LiteralId::new(
            u32::try_from(self.literals.len()).unwrap_or_else(|_| panic!("literal id overflow")),
        );
        self.literals.push(literal);
        id
    }

    pub fn create_literal_bool(&mut self, value: bool) -> LiteralId {
        self.push_literal(Literal::Bool(value))
    }

    pub fn create_literal_u8(&mut self, value: u8) -> LiteralId {
        self.push_literal(Literal::U8(value))
    }

    pub fn create_literal_u16(&mut self, value: u16) -> LiteralId {
        self.push_literal(Literal::U16(value))
    }

    pub fn create_literal_u32(&mut self, value: u32) -> LiteralId {
        self.push_literal(Literal::U32(value))
    }

    pub fn create_literal_u64(&mut self, value: u64) -> LiteralId {
        self.push_literal(Literal::U64(value))
    }

    pub fn create_literal_float(&mut self, value: f32) -> LiteralId {
        self.push_literal(Literal::Float(value))
    }

    pub fn create_literal_double(&mut self, value: f64) -> LiteralId {
        self.push_literal(Literal::Double(value))
    }

    /// Create a string literal (interning the text).
    pub fn create_literal_string(&mut self, text: &str) -> LiteralId {
        let id = self.strings.intern(text);
        self.push_literal(Literal::String(id))
    }

    /// Create a method literal from the function's name.
    pub fn create_literal_method(&mut self, function: arkedit_core::FunctionId) -> Result<LiteralId> {
        let name = self.function_record(function)?.name;
        Ok(self.push_literal(Literal::Method(name)))
    }

    /// Create a literal referencing a (nested) literal array.
    pub fn create_literal_literal_array(&mut self, array: LiteralArrayId) -> Result<LiteralId> {
        self.literal_array_record(array)?;
        Ok(self.push_literal(Literal::LiteralArray(array)))
    }

    /// Look up a literal by id.
    pub fn literal(&self, id: LiteralId) -> Result<Literal> {
        match self.literals.get(id.index()) {
            Some(&literal) => Ok(literal),
            None => self.fail(Error::bad_argument(format!(
                "stale or foreign literal handle {}",
                id.raw()
            ))),
        }
    }

    /// The tag of a literal.
    pub fn literal_tag(&self, id: LiteralId) -> Result<LiteralTag> {
        Ok(self.literal(id)?.tag())
    }

    /// The text of a string literal.
    pub fn literal_string(&self, id: LiteralId) -> Result<Arc<str>> {
        let string = self.literal(id)?.as_string()?;
        self.string(string)
    }

    // ── Literal arrays ──────────────────────────────────────────────

    pub(crate) fn literal_array_record(&self, array: LiteralArrayId) -> Result<&Vec<LiteralId>> {
        match self.literal_arrays.get(array.index()) {
            Some(record) => Ok(record),
            None => self.fail(Error::bad_argument(format!(
                "stale or foreign literal array handle {}",
                array.raw()
            ))),
        }
    }

    /// Create a literal array from an ordered element sequence.
    pub fn create_literal_array(&mut self, elements: &[LiteralId]) -> Result<LiteralArrayId> {
        for &element in elements {
            self.literal(element)?;
        }
        let id = LiteralArrayId::new(
            u32::try_from(self.literal_arrays.len())
                .unwrap_or_else(|_| panic!("literal array id overflow")),
        );
        self.literal_arrays.push(elements.to_vec());
        Ok(id)
    }

    /// The elements of a literal array, in insertion order.
    pub fn literal_array_elements(&self, array: LiteralArrayId) -> Result<Vec<LiteralId>> {
        Ok(self.literal_array_record(array)?.clone())
    }

    /// Visit literal-array elements in insertion order, stopping early
    /// when the callback returns `false`. Returns `false` iff a callback
    /// did.
    pub fn enumerate_literal_array(
        &self,
        array: LiteralArrayId,
        mut callback: impl FnMut(LiteralId) -> bool,
    ) -> Result<bool> {
        for &element in self.literal_array_record(array)? {
            if !callback(element) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests;
