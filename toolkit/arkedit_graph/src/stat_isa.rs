//! Instruction factories for the static dialect.
//!
//! Same discipline as [`DynamicIsa`](crate::DynamicIsa): the builder is
//! transient, every factory consumes it, and created instructions start
//! unattached. Immediate-operand forms (`*_i`) carry their constant as an
//! immediate rather than an input.

use arkedit_core::{Error, FunctionId, InstId, Result};

use crate::graph::Graph;
use crate::inst::Payload;
use crate::opcode::{ConditionCode, IsaKind, Opcode, StatOpcode};

/// Transient builder for static-dialect instructions.
pub struct StaticIsa<'a> {
    graph: &'a mut Graph,
}

impl<'a> StaticIsa<'a> {
    pub(crate) fn new(graph: &'a mut Graph) -> Self {
        StaticIsa { graph }
    }

    fn make(
        self,
        opcode: StatOpcode,
        inputs: &[InstId],
        imms: &[u64],
        payload: Payload,
    ) -> Result<InstId> {
        self.graph
            .build_inst(IsaKind::Static, Opcode::Static(opcode), inputs, imms, payload)
    }

    /// The static opcode of `inst`.
    pub fn get_opcode(self, inst: InstId) -> Result<StatOpcode> {
        match self.graph.opcode(inst)? {
            Opcode::Static(opcode) => Ok(opcode),
            other @ Opcode::Dynamic(_) => self.graph.fail(Error::WrongIsa(format!(
                "instruction {} carries dynamic opcode {other:?}",
                inst.raw()
            ))),
        }
    }

    /// The condition code of a static `If`.
    pub fn get_condition_code(self, inst: InstId) -> Result<ConditionCode> {
        self.graph.condition_code(inst)
    }

    /// Set the condition code of a static `If` (any code except `None`).
    pub fn set_condition_code(self, inst: InstId, cc: ConditionCode) -> Result<()> {
        self.graph.set_condition_code(inst, cc)
    }

    // ── Arithmetic ──────────────────────────────────────────────────

    pub fn create_add(self, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(StatOpcode::Add, &[input0, input1], &[], Payload::None)
    }

    pub fn create_sub(self, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(StatOpcode::Sub, &[input0, input1], &[], Payload::None)
    }

    pub fn create_mul(self, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(StatOpcode::Mul, &[input0, input1], &[], Payload::None)
    }

    pub fn create_div(self, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(StatOpcode::Div, &[input0, input1], &[], Payload::None)
    }

    pub fn create_mod(self, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(StatOpcode::Mod, &[input0, input1], &[], Payload::None)
    }

    pub fn create_add_i(self, input0: InstId, imm: u64) -> Result<InstId> {
        self.make(StatOpcode::AddI, &[input0], &[imm], Payload::None)
    }

    pub fn create_sub_i(self, input0: InstId, imm: u64) -> Result<InstId> {
        self.make(StatOpcode::SubI, &[input0], &[imm], Payload::None)
    }

    pub fn create_mul_i(self, input0: InstId, imm: u64) -> Result<InstId> {
        self.make(StatOpcode::MulI, &[input0], &[imm], Payload::None)
    }

    pub fn create_div_i(self, input0: InstId, imm: u64) -> Result<InstId> {
        self.make(StatOpcode::DivI, &[input0], &[imm], Payload::None)
    }

    pub fn create_mod_i(self, input0: InstId, imm: u64) -> Result<InstId> {
        self.make(StatOpcode::ModI, &[input0], &[imm], Payload::None)
    }

    // ── Bitwise ─────────────────────────────────────────────────────

    pub fn create_and(self, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(StatOpcode::And, &[input0, input1], &[], Payload::None)
    }

    pub fn create_or(self, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(StatOpcode::Or, &[input0, input1], &[], Payload::None)
    }

    pub fn create_xor(self, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(StatOpcode::Xor, &[input0, input1], &[], Payload::None)
    }

    pub fn create_and_i(self, input0: InstId, imm: u64) -> Result<InstId> {
        self.make(StatOpcode::AndI, &[input0], &[imm], Payload::None)
    }

    pub fn create_or_i(self, input0: InstId, imm: u64) -> Result<InstId> {
        self.make(StatOpcode::OrI, &[input0], &[imm], Payload::None)
    }

    pub fn create_xor_i(self, input0: InstId, imm: u64) -> Result<InstId> {
        self.make(StatOpcode::XorI, &[input0], &[imm], Payload::None)
    }

    pub fn create_shl(self, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(StatOpcode::Shl, &[input0, input1], &[], Payload::None)
    }

    pub fn create_shr(self, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(StatOpcode::Shr, &[input0, input1], &[], Payload::None)
    }

    pub fn create_ashr(self, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(StatOpcode::AShr, &[input0, input1], &[], Payload::None)
    }

    pub fn create_shl_i(self, input0: InstId, imm: u64) -> Result<InstId> {
        self.make(StatOpcode::ShlI, &[input0], &[imm], Payload::None)
    }

    pub fn create_shr_i(self, input0: InstId, imm: u64) -> Result<InstId> {
        self.make(StatOpcode::ShrI, &[input0], &[imm], Payload::None)
    }

    pub fn create_ashr_i(self, input0: InstId, imm: u64) -> Result<InstId> {
        self.make(StatOpcode::AShrI, &[input0], &[imm], Payload::None)
    }

    pub fn create_neg(self, input0: InstId) -> Result<InstId> {
        self.make(StatOpcode::Neg, &[input0], &[], Payload::None)
    }

    pub fn create_not(self, input0: InstId) -> Result<InstId> {
        self.make(StatOpcode::Not, &[input0], &[], Payload::None)
    }

    // ── Conversion and comparison ───────────────────────────────────

    pub fn create_cast(self, input0: InstId) -> Result<InstId> {
        self.make(StatOpcode::Cast, &[input0], &[], Payload::None)
    }

    pub fn create_cmp(self, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(StatOpcode::Cmp, &[input0, input1], &[], Payload::None)
    }

    /// Conditional jump comparing `input0` and `input1` under `cc`.
    pub fn create_if(
        self,
        input0: InstId,
        input1: InstId,
        cc: ConditionCode,
    ) -> Result<InstId> {
        if cc == ConditionCode::None {
            return self
                .graph
                .fail(Error::bad_argument("cannot create If with condition None"));
        }
        self.make(StatOpcode::If, &[input0, input1], &[], Payload::Condition(cc))
    }

    // ── Calls and returns ───────────────────────────────────────────

    pub fn create_call_static(self, function: FunctionId, args: &[InstId]) -> Result<InstId> {
        self.make(StatOpcode::CallStatic, args, &[], Payload::Function(function))
    }

    pub fn create_call_virtual(
        self,
        receiver: InstId,
        function: FunctionId,
        args: &[InstId],
    ) -> Result<InstId> {
        let mut inputs = Vec::with_capacity(1 + args.len());
        inputs.push(receiver);
        inputs.extend_from_slice(args);
        self.make(
            StatOpcode::CallVirtual,
            &inputs,
            &[],
            Payload::Function(function),
        )
    }

    pub fn create_return(self, input0: InstId) -> Result<InstId> {
        self.make(StatOpcode::Return, &[input0], &[], Payload::None)
    }

    pub fn create_return_void(self) -> Result<InstId> {
        self.make(StatOpcode::ReturnVoid, &[], &[], Payload::None)
    }

    // ── Loads and object operations ─────────────────────────────────

    /// Load an interned string.
    pub fn create_load_string(self, text: &str) -> Result<InstId> {
        let id = self.graph.strings().intern(text);
        self.make(StatOpcode::LoadString, &[], &[], Payload::String(id))
    }

    pub fn create_load_undefined(self) -> Result<InstId> {
        self.make(StatOpcode::LoadUndefined, &[], &[], Payload::None)
    }

    pub fn create_null_ptr(self) -> Result<InstId> {
        self.make(StatOpcode::NullPtr, &[], &[], Payload::None)
    }

    pub fn create_len_array(self, array: InstId) -> Result<InstId> {
        self.make(StatOpcode::LenArray, &[array], &[], Payload::None)
    }

    pub fn create_new_array(self, length: InstId) -> Result<InstId> {
        self.make(StatOpcode::NewArray, &[length], &[], Payload::None)
    }

    pub fn create_new_object(self, class_ctor: FunctionId) -> Result<InstId> {
        self.make(
            StatOpcode::NewObject,
            &[],
            &[],
            Payload::Function(class_ctor),
        )
    }

    pub fn create_is_instance(self, input0: InstId) -> Result<InstId> {
        self.make(StatOpcode::IsInstance, &[input0], &[], Payload::None)
    }

    /// Try-region marker instruction.
    pub fn create_try(self) -> Result<InstId> {
        self.make(StatOpcode::Try, &[], &[], Payload::None)
    }
}

#[cfg(test)]
mod tests;
