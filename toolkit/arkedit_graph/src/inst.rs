//! Instructions: opcodes, def/use edges, immediates and payloads.
//!
//! Instructions are arena records addressed by [`InstId`]. Factories
//! (`DynamicIsa`/`StaticIsa`, phi creation, constant interning) allocate
//! instructions; the def/use edges between an instruction and its inputs
//! are maintained by every input mutator, so `users` never needs a rebuild
//! pass.

use smallvec::SmallVec;

use arkedit_core::{
    BlockId, Error, ExportId, FunctionId, ImportId, InstId, LiteralArrayId, ModuleId, Result,
    StringId,
};

use crate::graph::Graph;
use crate::opcode::{ConditionCode, Opcode};

/// The operand payload carried by an instruction beyond its inputs and
/// immediates. At most one payload per instruction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) enum Payload {
    None,
    ConstI32(i32),
    ConstI64(i64),
    ConstU64(u64),
    ConstF64(f64),
    String(StringId),
    LiteralArray(LiteralArrayId),
    Function(FunctionId),
    Module(ModuleId),
    Import(ImportId),
    Export(ExportId),
    Condition(ConditionCode),
    ParameterIndex(u32),
}

/// Arena record for one instruction.
#[derive(Debug)]
pub(crate) struct InstData {
    pub(crate) opcode: Opcode,
    pub(crate) inputs: SmallVec<[InstId; 2]>,
    /// One entry per use; an instruction used twice by the same user
    /// appears twice.
    pub(crate) users: SmallVec<[InstId; 2]>,
    pub(crate) imms: SmallVec<[u64; 2]>,
    pub(crate) payload: Payload,
    pub(crate) block: Option<BlockId>,
    pub(crate) prev: Option<InstId>,
    pub(crate) next: Option<InstId>,
}

impl InstData {
    pub(crate) fn new(opcode: Opcode, payload: Payload) -> Self {
        InstData {
            opcode,
            inputs: SmallVec::new(),
            users: SmallVec::new(),
            imms: SmallVec::new(),
            payload,
            block: None,
            prev: None,
            next: None,
        }
    }
}

impl Graph {
    // ── Introspection ───────────────────────────────────────────────

    /// The opcode of `inst`.
    pub fn opcode(&self, inst: InstId) -> Result<Opcode> {
        Ok(self.inst_data(inst)?.opcode)
    }

    /// The block `inst` is attached to, if any.
    pub fn inst_block(&self, inst: InstId) -> Result<Option<BlockId>> {
        Ok(self.inst_data(inst)?.block)
    }

    /// The instruction after `inst` in its block, if any.
    pub fn next_inst(&self, inst: InstId) -> Result<Option<InstId>> {
        Ok(self.inst_data(inst)?.next)
    }

    /// The instruction before `inst` in its block, if any.
    pub fn prev_inst(&self, inst: InstId) -> Result<Option<InstId>> {
        Ok(self.inst_data(inst)?.prev)
    }

    // ── Inputs and users ────────────────────────────────────────────

    /// The inputs of `inst`, in operand order.
    pub fn inputs(&self, inst: InstId) -> Result<Vec<InstId>> {
        Ok(self.inst_data(inst)?.inputs.to_vec())
    }

    /// The input of `inst` at `index`.
    pub fn input(&self, inst: InstId, index: usize) -> Result<InstId> {
        let data = self.inst_data(inst)?;
        match data.inputs.get(index) {
            Some(&input) => Ok(input),
            None => self.fail(Error::OutOfRange {
                index,
                len: data.inputs.len(),
            }),
        }
    }

    /// Number of inputs of `inst`.
    pub fn input_count(&self, inst: InstId) -> Result<usize> {
        Ok(self.inst_data(inst)?.inputs.len())
    }

    /// Replace the input of `inst` at `index` with `value`, keeping user
    /// lists on both the old and the new input consistent.
    pub fn set_input(&mut self, inst: InstId, index: usize, value: InstId) -> Result<()> {
        self.inst_data(value)?;
        let len = self.inst_data(inst)?.inputs.len();
        if index >= len {
            return self.fail(Error::OutOfRange { index, len });
        }
        let old = self.inst_data(inst)?.inputs[index];
        let old_users = &mut self.inst_data_mut(old)?.users;
        if let Some(position) = old_users.iter().position(|&user| user == inst) {
            old_users.remove(position);
        }
        self.inst_data_mut(inst)?.inputs[index] = value;
        self.inst_data_mut(value)?.users.push(inst);
        Ok(())
    }

    /// Replace all inputs of `inst` with `values`.
    pub fn set_inputs(&mut self, inst: InstId, values: &[InstId]) -> Result<()> {
        for &value in values {
            self.inst_data(value)?;
        }
        let old: Vec<InstId> = self.inst_data(inst)?.inputs.to_vec();
        for input in old {
            let users = &mut self.inst_data_mut(input)?.users;
            if let Some(position) = users.iter().position(|&user| user == inst) {
                users.remove(position);
            }
        }
        self.inst_data_mut(inst)?.inputs = values.iter().copied().collect();
        for &value in values {
            self.inst_data_mut(value)?.users.push(inst);
        }
        Ok(())
    }

    /// Append `value` to the inputs of `inst`.
    pub fn append_input(&mut self, inst: InstId, value: InstId) -> Result<()> {
        self.inst_data(value)?;
        self.inst_data(inst)?;
        self.inst_data_mut(inst)?.inputs.push(value);
        self.inst_data_mut(value)?.users.push(inst);
        Ok(())
    }

    /// The users of `inst` (one entry per use), in registration order.
    pub fn users(&self, inst: InstId) -> Result<Vec<InstId>> {
        Ok(self.inst_data(inst)?.users.to_vec())
    }

    /// Number of uses of `inst`.
    pub fn user_count(&self, inst: InstId) -> Result<usize> {
        Ok(self.inst_data(inst)?.users.len())
    }

    /// Visit the users of `inst`, stopping early when the callback returns
    /// `false`. Returns `false` iff a callback did.
    pub fn visit_users(
        &self,
        inst: InstId,
        mut callback: impl FnMut(InstId) -> bool,
    ) -> Result<bool> {
        for &user in &self.inst_data(inst)?.users {
            if !callback(user) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // ── Immediates ──────────────────────────────────────────────────

    /// The immediate of `inst` at `index`.
    pub fn immediate(&self, inst: InstId, index: usize) -> Result<u64> {
        let data = self.inst_data(inst)?;
        match data.imms.get(index) {
            Some(&imm) => Ok(imm),
            None => self.fail(Error::OutOfRange {
                index,
                len: data.imms.len(),
            }),
        }
    }

    /// Overwrite the immediate of `inst` at `index`.
    pub fn set_immediate(&mut self, inst: InstId, index: usize, value: u64) -> Result<()> {
        let len = self.inst_data(inst)?.imms.len();
        if index >= len {
            return self.fail(Error::OutOfRange { index, len });
        }
        self.inst_data_mut(inst)?.imms[index] = value;
        Ok(())
    }

    /// Number of immediates of `inst`.
    pub fn immediate_count(&self, inst: InstId) -> Result<usize> {
        Ok(self.inst_data(inst)?.imms.len())
    }

    // ── Payload accessors ───────────────────────────────────────────

    fn payload_mismatch<T>(&self, inst: InstId, wanted: &str) -> Result<T> {
        let payload = self.inst_data(inst)?.payload;
        self.fail(Error::Unsupported(format!(
            "instruction {} has no {wanted} payload (found {payload:?})",
            inst.raw()
        )))
    }

    /// The `i32` payload of a constant.
    pub fn constant_i32(&self, inst: InstId) -> Result<i32> {
        match self.inst_data(inst)?.payload {
            Payload::ConstI32(value) => Ok(value),
            _ => self.payload_mismatch(inst, "i32 constant"),
        }
    }

    /// The `i64` payload of a constant.
    pub fn constant_i64(&self, inst: InstId) -> Result<i64> {
        match self.inst_data(inst)?.payload {
            Payload::ConstI64(value) => Ok(value),
            _ => self.payload_mismatch(inst, "i64 constant"),
        }
    }

    /// The `u64` payload of a constant.
    pub fn constant_u64(&self, inst: InstId) -> Result<u64> {
        match self.inst_data(inst)?.payload {
            Payload::ConstU64(value) => Ok(value),
            _ => self.payload_mismatch(inst, "u64 constant"),
        }
    }

    /// The `f64` payload of a constant.
    pub fn constant_f64(&self, inst: InstId) -> Result<f64> {
        match self.inst_data(inst)?.payload {
            Payload::ConstF64(value) => Ok(value),
            _ => self.payload_mismatch(inst, "f64 constant"),
        }
    }

    /// The interned string operand of `inst`.
    pub fn inst_string(&self, inst: InstId) -> Result<StringId> {
        match self.inst_data(inst)?.payload {
            Payload::String(id) => Ok(id),
            _ => self.payload_mismatch(inst, "string"),
        }
    }

    /// The literal-array operand of `inst`.
    pub fn inst_literal_array(&self, inst: InstId) -> Result<LiteralArrayId> {
        match self.inst_data(inst)?.payload {
            Payload::LiteralArray(id) => Ok(id),
            _ => self.payload_mismatch(inst, "literal array"),
        }
    }

    /// The function operand of `inst` (e.g. of a `definefunc`).
    pub fn inst_function(&self, inst: InstId) -> Result<FunctionId> {
        match self.inst_data(inst)?.payload {
            Payload::Function(id) => Ok(id),
            _ => self.payload_mismatch(inst, "function"),
        }
    }

    /// The parameter index of a parameter pseudo-instruction.
    pub fn parameter_index(&self, inst: InstId) -> Result<u32> {
        match self.inst_data(inst)?.payload {
            Payload::ParameterIndex(index) => Ok(index),
            _ => self.payload_mismatch(inst, "parameter index"),
        }
    }

    // ── Placement ───────────────────────────────────────────────────

    /// Insert unattached `inst` directly after `anchor` in its block.
    pub fn insert_after(&mut self, inst: InstId, anchor: InstId) -> Result<()> {
        let Some(bb) = self.inst_data(anchor)?.block else {
            return self.fail(Error::bad_argument(format!(
                "anchor instruction {} is not attached to a block",
                anchor.raw()
            )));
        };
        if let Some(block) = self.inst_data(inst)?.block {
            return self.fail(Error::InconsistentState(format!(
                "instruction {} is already attached to block {}",
                inst.raw(),
                block.raw()
            )));
        }
        let after = self.inst_data(anchor)?.next;
        {
            let data = self.inst_data_mut(inst)?;
            data.block = Some(bb);
            data.prev = Some(anchor);
            data.next = after;
        }
        self.inst_data_mut(anchor)?.next = Some(inst);
        match after {
            Some(following) => self.inst_data_mut(following)?.prev = Some(inst),
            None => self.block_data_mut(bb)?.last_inst = Some(inst),
        }
        Ok(())
    }

    /// Insert unattached `inst` directly before `anchor` in its block.
    pub fn insert_before(&mut self, inst: InstId, anchor: InstId) -> Result<()> {
        let Some(bb) = self.inst_data(anchor)?.block else {
            return self.fail(Error::bad_argument(format!(
                "anchor instruction {} is not attached to a block",
                anchor.raw()
            )));
        };
        if let Some(block) = self.inst_data(inst)?.block {
            return self.fail(Error::InconsistentState(format!(
                "instruction {} is already attached to block {}",
                inst.raw(),
                block.raw()
            )));
        }
        let before = self.inst_data(anchor)?.prev;
        {
            let data = self.inst_data_mut(inst)?;
            data.block = Some(bb);
            data.prev = before;
            data.next = Some(anchor);
        }
        self.inst_data_mut(anchor)?.prev = Some(inst);
        match before {
            Some(preceding) => self.inst_data_mut(preceding)?.next = Some(inst),
            None => self.block_data_mut(bb)?.first_inst = Some(inst),
        }
        Ok(())
    }

    /// Detach and tombstone `inst`.
    ///
    /// Fails with an inconsistent-state error while the instruction still
    /// has users — callers must rewire uses first.
    pub fn remove_inst(&mut self, inst: InstId) -> Result<()> {
        let remaining = self.inst_data(inst)?.users.len();
        if remaining > 0 {
            return self.fail(Error::InconsistentState(format!(
                "instruction {} still has {remaining} use(s)",
                inst.raw()
            )));
        }
        self.unlink_inst(inst)?;
        self.drop_inst_edges(inst)?;
        self.insts[inst.index()] = None;
        // A removed constant must not keep satisfying interning lookups.
        self.constants.retain(|_, id| *id != inst);
        Ok(())
    }

    /// Unlink `inst` from its block chain without tombstoning it.
    fn unlink_inst(&mut self, inst: InstId) -> Result<()> {
        let (block, prev, next) = {
            let data = self.inst_data(inst)?;
            (data.block, data.prev, data.next)
        };
        if let Some(bb) = block {
            match prev {
                Some(preceding) => self.inst_data_mut(preceding)?.next = next,
                None => self.block_data_mut(bb)?.first_inst = next,
            }
            match next {
                Some(following) => self.inst_data_mut(following)?.prev = prev,
                None => self.block_data_mut(bb)?.last_inst = prev,
            }
        }
        let data = self.inst_data_mut(inst)?;
        data.block = None;
        data.prev = None;
        data.next = None;
        Ok(())
    }

    /// Clear the def/use edges of `inst` in both directions.
    ///
    /// Used by bulk removal, where whole regions disappear together and
    /// the has-users precondition of [`remove_inst`](Self::remove_inst)
    /// would get in the way.
    pub(crate) fn drop_inst_edges(&mut self, inst: InstId) -> Result<()> {
        let inputs: Vec<InstId> = self.inst_data(inst)?.inputs.to_vec();
        for input in inputs {
            if let Ok(data) = self.inst_data_mut(input) {
                if let Some(position) = data.users.iter().position(|&user| user == inst) {
                    data.users.remove(position);
                }
            }
        }
        let users: Vec<InstId> = self.inst_data(inst)?.users.to_vec();
        for user in users {
            if let Ok(data) = self.inst_data_mut(user) {
                data.inputs.retain(|input| *input != inst);
            }
        }
        let data = self.inst_data_mut(inst)?;
        data.inputs.clear();
        data.users.clear();
        Ok(())
    }

    // ── Condition codes ─────────────────────────────────────────────

    /// The condition code of an `If` instruction.
    pub fn condition_code(&self, inst: InstId) -> Result<ConditionCode> {
        let data = self.inst_data(inst)?;
        if !data.opcode.is_if() {
            return self.fail(Error::Unsupported(format!(
                "condition code queried on non-If opcode {:?}",
                data.opcode
            )));
        }
        match data.payload {
            Payload::Condition(cc) => Ok(cc),
            _ => self.payload_mismatch(inst, "condition code"),
        }
    }

    /// Set the condition code of an `If` instruction.
    ///
    /// The dynamic dialect only materializes `Ne`/`Eq`; anything else is a
    /// bad argument there. `None` is never settable.
    pub fn set_condition_code(&mut self, inst: InstId, cc: ConditionCode) -> Result<()> {
        let data = self.inst_data(inst)?;
        if !data.opcode.is_if() {
            return self.fail(Error::Unsupported(format!(
                "condition code set on non-If opcode {:?}",
                data.opcode
            )));
        }
        if cc == ConditionCode::None {
            return self.fail(Error::bad_argument("cannot set condition code None"));
        }
        if matches!(data.opcode, Opcode::Dynamic(_))
            && !matches!(cc, ConditionCode::Ne | ConditionCode::Eq)
        {
            return self.fail(Error::bad_argument(format!(
                "dynamic If supports only Ne/Eq, got {cc:?}"
            )));
        }
        self.inst_data_mut(inst)?.payload = Payload::Condition(cc);
        Ok(())
    }

    // ── Dominance between instructions ──────────────────────────────

    /// Whether `a` dominates `b`.
    ///
    /// Within one block this is chain order (an instruction dominates
    /// itself); across blocks it is block dominance.
    pub fn inst_dominates(&self, a: InstId, b: InstId) -> Result<bool> {
        let block_a = self.inst_data(a)?.block;
        let block_b = self.inst_data(b)?.block;
        let (Some(block_a), Some(block_b)) = (block_a, block_b) else {
            return self.fail(Error::InconsistentState(
                "dominance query on unattached instruction".into(),
            ));
        };
        if block_a == block_b {
            if a == b {
                return Ok(true);
            }
            let mut cursor = self.inst_data(a)?.next;
            while let Some(inst) = cursor {
                if inst == b {
                    return Ok(true);
                }
                cursor = self.inst_data(inst)?.next;
            }
            return Ok(false);
        }
        self.dominates(block_a, block_b)
    }
}

#[cfg(test)]
mod tests;
