//! Instruction factories for the dynamic dialect.
//!
//! [`DynamicIsa`] is a transient builder borrowed out of a graph with
//! [`Graph::dyn_isa`]. Every factory consumes the builder, so call sites
//! read `graph.dyn_isa().create_add2(a, b)?` and a builder can never be
//! held across statements — the borrow it carries must not outlive the
//! expression that produced it.
//!
//! Created instructions start **unattached**: wire them into a block with
//! [`Graph::add_inst_front`] / [`Graph::add_inst_back`] /
//! [`Graph::insert_after`]. String-taking factories intern their operand
//! into the graph's string table (the owning file's table for graphs
//! checked out of a function) before allocating the instruction.

use arkedit_core::{
    Error, ExportId, FunctionId, ImportId, InstId, LiteralArrayId, ModuleId, Result,
};

use crate::graph::Graph;
use crate::inst::Payload;
use crate::opcode::{ConditionCode, DynOpcode, IsaKind, Opcode};

impl Graph {
    /// Allocate an unattached instruction after dialect and operand
    /// validation. Shared by both ISA builders.
    pub(crate) fn build_inst(
        &mut self,
        required: IsaKind,
        opcode: Opcode,
        inputs: &[InstId],
        imms: &[u64],
        payload: Payload,
    ) -> Result<InstId> {
        if self.isa() != required {
            return self.fail(Error::WrongIsa(format!(
                "{opcode:?} requires a {required:?} graph, this graph is {:?}",
                self.isa()
            )));
        }
        for &input in inputs {
            self.inst_data(input)?;
        }
        let inst = self.alloc_inst(opcode, payload);
        for &input in inputs {
            self.inst_data_mut(inst)?.inputs.push(input);
            self.inst_data_mut(input)?.users.push(inst);
        }
        self.inst_data_mut(inst)?.imms = imms.iter().copied().collect();
        Ok(inst)
    }
}

/// Transient builder for dynamic-dialect instructions.
pub struct DynamicIsa<'a> {
    graph: &'a mut Graph,
}

impl<'a> DynamicIsa<'a> {
    pub(crate) fn new(graph: &'a mut Graph) -> Self {
        DynamicIsa { graph }
    }

    fn make(
        self,
        opcode: DynOpcode,
        inputs: &[InstId],
        imms: &[u64],
        payload: Payload,
    ) -> Result<InstId> {
        self.graph
            .build_inst(IsaKind::Dynamic, Opcode::Dynamic(opcode), inputs, imms, payload)
    }

    fn make_str(
        self,
        opcode: DynOpcode,
        text: &str,
        inputs: &[InstId],
        imms: &[u64],
    ) -> Result<InstId> {
        let id = self.graph.strings().intern(text);
        self.make(opcode, inputs, imms, Payload::String(id))
    }

    // ── Introspection / mutation ────────────────────────────────────

    /// The dynamic opcode of `inst`.
    pub fn get_opcode(self, inst: InstId) -> Result<DynOpcode> {
        match self.graph.opcode(inst)? {
            Opcode::Dynamic(opcode) => Ok(opcode),
            other @ Opcode::Static(_) => self.graph.fail(Error::WrongIsa(format!(
                "instruction {} carries static opcode {other:?}",
                inst.raw()
            ))),
        }
    }

    /// The condition code of a dynamic `If`.
    pub fn get_condition_code(self, inst: InstId) -> Result<ConditionCode> {
        self.graph.condition_code(inst)
    }

    /// Set the condition code of a dynamic `If` (`Ne`/`Eq` only).
    pub fn set_condition_code(self, inst: InstId, cc: ConditionCode) -> Result<()> {
        self.graph.set_condition_code(inst, cc)
    }

    /// The module operand of a `getmodulenamespace` instruction.
    pub fn get_module(self, inst: InstId) -> Result<ModuleId> {
        self.expect_opcode(
            inst,
            &[DynOpcode::Getmodulenamespace, DynOpcode::WideGetmodulenamespace],
        )?;
        match self.graph.inst_data(inst)?.payload {
            Payload::Module(id) => Ok(id),
            _ => self.graph.fail(Error::Unsupported(format!(
                "instruction {} carries no module operand",
                inst.raw()
            ))),
        }
    }

    /// Replace the module operand of a `getmodulenamespace` instruction.
    pub fn set_module(self, inst: InstId, module: ModuleId) -> Result<()> {
        self.expect_opcode(
            inst,
            &[DynOpcode::Getmodulenamespace, DynOpcode::WideGetmodulenamespace],
        )?;
        self.graph.inst_data_mut(inst)?.payload = Payload::Module(module);
        Ok(())
    }

    /// The import operand of an `ldexternalmodulevar` instruction.
    pub fn get_import_descriptor(self, inst: InstId) -> Result<ImportId> {
        self.expect_opcode(
            inst,
            &[DynOpcode::Ldexternalmodulevar, DynOpcode::WideLdexternalmodulevar],
        )?;
        match self.graph.inst_data(inst)?.payload {
            Payload::Import(id) => Ok(id),
            _ => self.graph.fail(Error::Unsupported(format!(
                "instruction {} carries no import operand",
                inst.raw()
            ))),
        }
    }

    /// Replace the import operand of an `ldexternalmodulevar` instruction.
    pub fn set_import_descriptor(self, inst: InstId, import: ImportId) -> Result<()> {
        self.expect_opcode(
            inst,
            &[DynOpcode::Ldexternalmodulevar, DynOpcode::WideLdexternalmodulevar],
        )?;
        self.graph.inst_data_mut(inst)?.payload = Payload::Import(import);
        Ok(())
    }

    /// The export operand of a module-variable access instruction.
    pub fn get_export_descriptor(self, inst: InstId) -> Result<ExportId> {
        self.expect_opcode(
            inst,
            &[
                DynOpcode::Stmodulevar,
                DynOpcode::WideStmodulevar,
                DynOpcode::Ldlocalmodulevar,
                DynOpcode::WideLdlocalmodulevar,
            ],
        )?;
        match self.graph.inst_data(inst)?.payload {
            Payload::Export(id) => Ok(id),
            _ => self.graph.fail(Error::Unsupported(format!(
                "instruction {} carries no export operand",
                inst.raw()
            ))),
        }
    }

    /// Replace the export operand of a module-variable access instruction.
    pub fn set_export_descriptor(self, inst: InstId, export: ExportId) -> Result<()> {
        self.expect_opcode(
            inst,
            &[
                DynOpcode::Stmodulevar,
                DynOpcode::WideStmodulevar,
                DynOpcode::Ldlocalmodulevar,
                DynOpcode::WideLdlocalmodulevar,
            ],
        )?;
        self.graph.inst_data_mut(inst)?.payload = Payload::Export(export);
        Ok(())
    }

    fn expect_opcode(&self, inst: InstId, allowed: &[DynOpcode]) -> Result<()> {
        match self.graph.opcode(inst)? {
            Opcode::Dynamic(opcode) if allowed.contains(&opcode) => Ok(()),
            other => self.graph.fail(Error::bad_argument(format!(
                "opcode {other:?} not valid here, expected one of {allowed:?}"
            ))),
        }
    }

    // ── Loads without operands ──────────────────────────────────────

    /// Load an interned string.
    pub fn create_load_string(self, text: &str) -> Result<InstId> {
        self.make_str(DynOpcode::LoadString, text, &[], &[])
    }

    pub fn create_ldnan(self) -> Result<InstId> {
        self.make(DynOpcode::Ldnan, &[], &[], Payload::None)
    }

    pub fn create_ldinfinity(self) -> Result<InstId> {
        self.make(DynOpcode::Ldinfinity, &[], &[], Payload::None)
    }

    pub fn create_ldundefined(self) -> Result<InstId> {
        self.make(DynOpcode::Ldundefined, &[], &[], Payload::None)
    }

    pub fn create_ldnull(self) -> Result<InstId> {
        self.make(DynOpcode::Ldnull, &[], &[], Payload::None)
    }

    pub fn create_ldsymbol(self) -> Result<InstId> {
        self.make(DynOpcode::Ldsymbol, &[], &[], Payload::None)
    }

    pub fn create_ldglobal(self) -> Result<InstId> {
        self.make(DynOpcode::Ldglobal, &[], &[], Payload::None)
    }

    pub fn create_ldtrue(self) -> Result<InstId> {
        self.make(DynOpcode::Ldtrue, &[], &[], Payload::None)
    }

    pub fn create_ldfalse(self) -> Result<InstId> {
        self.make(DynOpcode::Ldfalse, &[], &[], Payload::None)
    }

    pub fn create_ldhole(self) -> Result<InstId> {
        self.make(DynOpcode::Ldhole, &[], &[], Payload::None)
    }

    pub fn create_ldnewtarget(self) -> Result<InstId> {
        self.make(DynOpcode::Ldnewtarget, &[], &[], Payload::None)
    }

    pub fn create_ldthis(self) -> Result<InstId> {
        self.make(DynOpcode::Ldthis, &[], &[], Payload::None)
    }

    pub fn create_ldfunction(self) -> Result<InstId> {
        self.make(DynOpcode::Ldfunction, &[], &[], Payload::None)
    }

    /// Load a big integer from its decimal text.
    pub fn create_ldbigint(self, text: &str) -> Result<InstId> {
        self.make_str(DynOpcode::Ldbigint, text, &[], &[])
    }

    // ── Environment / bookkeeping ───────────────────────────────────

    pub fn create_poplexenv(self) -> Result<InstId> {
        self.make(DynOpcode::Poplexenv, &[], &[], Payload::None)
    }

    pub fn create_getunmappedargs(self) -> Result<InstId> {
        self.make(DynOpcode::Getunmappedargs, &[], &[], Payload::None)
    }

    pub fn create_asyncfunctionenter(self) -> Result<InstId> {
        self.make(DynOpcode::Asyncfunctionenter, &[], &[], Payload::None)
    }

    pub fn create_debugger(self) -> Result<InstId> {
        self.make(DynOpcode::Debugger, &[], &[], Payload::None)
    }

    pub fn create_newlexenv(self, slots: u64) -> Result<InstId> {
        self.make(DynOpcode::Newlexenv, &[], &[slots], Payload::None)
    }

    pub fn create_wide_newlexenv(self, slots: u64) -> Result<InstId> {
        self.make(DynOpcode::WideNewlexenv, &[], &[slots], Payload::None)
    }

    pub fn create_newlexenvwithname(
        self,
        slots: u64,
        names: LiteralArrayId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::Newlexenvwithname,
            &[],
            &[slots],
            Payload::LiteralArray(names),
        )
    }

    pub fn create_wide_newlexenvwithname(
        self,
        slots: u64,
        names: LiteralArrayId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::WideNewlexenvwithname,
            &[],
            &[slots],
            Payload::LiteralArray(names),
        )
    }

    pub fn create_ldlexvar(self, level: u64, slot: u64) -> Result<InstId> {
        self.make(DynOpcode::Ldlexvar, &[], &[level, slot], Payload::None)
    }

    pub fn create_wide_ldlexvar(self, level: u64, slot: u64) -> Result<InstId> {
        self.make(DynOpcode::WideLdlexvar, &[], &[level, slot], Payload::None)
    }

    pub fn create_stlexvar(self, acc: InstId, level: u64, slot: u64) -> Result<InstId> {
        self.make(DynOpcode::Stlexvar, &[acc], &[level, slot], Payload::None)
    }

    pub fn create_wide_stlexvar(self, acc: InstId, level: u64, slot: u64) -> Result<InstId> {
        self.make(DynOpcode::WideStlexvar, &[acc], &[level, slot], Payload::None)
    }

    pub fn create_copyrestargs(self, index: u64) -> Result<InstId> {
        self.make(DynOpcode::Copyrestargs, &[], &[index], Payload::None)
    }

    pub fn create_wide_copyrestargs(self, index: u64) -> Result<InstId> {
        self.make(DynOpcode::WideCopyrestargs, &[], &[index], Payload::None)
    }

    pub fn create_wide_ldpatchvar(self, index: u64) -> Result<InstId> {
        self.make(DynOpcode::WideLdpatchvar, &[], &[index], Payload::None)
    }

    pub fn create_wide_stpatchvar(self, acc: InstId, index: u64) -> Result<InstId> {
        self.make(DynOpcode::WideStpatchvar, &[acc], &[index], Payload::None)
    }

    // ── Unary operations on the accumulator ─────────────────────────

    pub fn create_neg(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Neg, &[acc], &[], Payload::None)
    }

    pub fn create_not(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Not, &[acc], &[], Payload::None)
    }

    pub fn create_inc(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Inc, &[acc], &[], Payload::None)
    }

    pub fn create_dec(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Dec, &[acc], &[], Payload::None)
    }

    pub fn create_typeof(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Typeof, &[acc], &[], Payload::None)
    }

    pub fn create_tonumber(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Tonumber, &[acc], &[], Payload::None)
    }

    pub fn create_tonumeric(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Tonumeric, &[acc], &[], Payload::None)
    }

    pub fn create_istrue(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Istrue, &[acc], &[], Payload::None)
    }

    pub fn create_isfalse(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Isfalse, &[acc], &[], Payload::None)
    }

    // ── Binary operations (accumulator + one operand) ───────────────

    pub fn create_add2(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Add2, &[acc, input0], &[], Payload::None)
    }

    pub fn create_sub2(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Sub2, &[acc, input0], &[], Payload::None)
    }

    pub fn create_mul2(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Mul2, &[acc, input0], &[], Payload::None)
    }

    pub fn create_div2(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Div2, &[acc, input0], &[], Payload::None)
    }

    pub fn create_mod2(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Mod2, &[acc, input0], &[], Payload::None)
    }

    pub fn create_exp(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Exp, &[acc, input0], &[], Payload::None)
    }

    pub fn create_and2(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::And2, &[acc, input0], &[], Payload::None)
    }

    pub fn create_or2(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Or2, &[acc, input0], &[], Payload::None)
    }

    pub fn create_xor2(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Xor2, &[acc, input0], &[], Payload::None)
    }

    pub fn create_shl2(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Shl2, &[acc, input0], &[], Payload::None)
    }

    pub fn create_shr2(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Shr2, &[acc, input0], &[], Payload::None)
    }

    pub fn create_ashr2(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Ashr2, &[acc, input0], &[], Payload::None)
    }

    // ── Comparisons ─────────────────────────────────────────────────

    pub fn create_eq(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Eq, &[acc, input0], &[], Payload::None)
    }

    pub fn create_noteq(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Noteq, &[acc, input0], &[], Payload::None)
    }

    pub fn create_less(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Less, &[acc, input0], &[], Payload::None)
    }

    pub fn create_lesseq(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Lesseq, &[acc, input0], &[], Payload::None)
    }

    pub fn create_greater(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Greater, &[acc, input0], &[], Payload::None)
    }

    pub fn create_greatereq(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Greatereq, &[acc, input0], &[], Payload::None)
    }

    pub fn create_stricteq(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Stricteq, &[acc, input0], &[], Payload::None)
    }

    pub fn create_strictnoteq(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Strictnoteq, &[acc, input0], &[], Payload::None)
    }

    pub fn create_isin(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Isin, &[acc, input0], &[], Payload::None)
    }

    pub fn create_instanceof(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Instanceof, &[acc, input0], &[], Payload::None)
    }

    // ── Control flow ────────────────────────────────────────────────

    /// Conditional jump comparing `input` under `cc` (`Ne`/`Eq` only).
    pub fn create_if(self, input: InstId, cc: ConditionCode) -> Result<InstId> {
        if !matches!(cc, ConditionCode::Ne | ConditionCode::Eq) {
            return self.graph.fail(Error::bad_argument(format!(
                "dynamic If supports only Ne/Eq, got {cc:?}"
            )));
        }
        self.make(DynOpcode::If, &[input], &[], Payload::Condition(cc))
    }

    pub fn create_return(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Return, &[acc], &[], Payload::None)
    }

    pub fn create_returnundefined(self) -> Result<InstId> {
        self.make(DynOpcode::Returnundefined, &[], &[], Payload::None)
    }

    pub fn create_throw(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Throw, &[acc], &[], Payload::None)
    }

    pub fn create_throw_notexists(self) -> Result<InstId> {
        self.make(DynOpcode::ThrowNotexists, &[], &[], Payload::None)
    }

    pub fn create_throw_patternnoncoercible(self) -> Result<InstId> {
        self.make(DynOpcode::ThrowPatternnoncoercible, &[], &[], Payload::None)
    }

    pub fn create_throw_deletesuperproperty(self) -> Result<InstId> {
        self.make(DynOpcode::ThrowDeletesuperproperty, &[], &[], Payload::None)
    }

    pub fn create_throw_constassignment(self, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::ThrowConstassignment, &[input0], &[], Payload::None)
    }

    pub fn create_throw_ifnotobject(self, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::ThrowIfnotobject, &[input0], &[], Payload::None)
    }

    pub fn create_throw_undefinedifhole(
        self,
        input0: InstId,
        input1: InstId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::ThrowUndefinedifhole,
            &[input0, input1],
            &[],
            Payload::None,
        )
    }

    pub fn create_throw_ifsupernotcorrectcall(self, acc: InstId, kind: u64) -> Result<InstId> {
        self.make(
            DynOpcode::ThrowIfsupernotcorrectcall,
            &[acc],
            &[kind],
            Payload::None,
        )
    }

    pub fn create_throw_undefinedifholewithname(
        self,
        acc: InstId,
        name: &str,
    ) -> Result<InstId> {
        self.make_str(DynOpcode::ThrowUndefinedifholewithname, name, &[acc], &[])
    }

    // ── Calls ───────────────────────────────────────────────────────

    pub fn create_callarg0(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Callarg0, &[acc], &[], Payload::None)
    }

    pub fn create_callarg1(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Callarg1, &[acc, input0], &[], Payload::None)
    }

    pub fn create_callargs2(self, acc: InstId, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(DynOpcode::Callargs2, &[acc, input0, input1], &[], Payload::None)
    }

    pub fn create_callargs3(
        self,
        acc: InstId,
        input0: InstId,
        input1: InstId,
        input2: InstId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::Callargs3,
            &[acc, input0, input1, input2],
            &[],
            Payload::None,
        )
    }

    pub fn create_callthis0(self, acc: InstId, this: InstId) -> Result<InstId> {
        self.make(DynOpcode::Callthis0, &[acc, this], &[], Payload::None)
    }

    pub fn create_callthis1(self, acc: InstId, this: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Callthis1, &[acc, this, input0], &[], Payload::None)
    }

    pub fn create_callthis2(
        self,
        acc: InstId,
        this: InstId,
        input0: InstId,
        input1: InstId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::Callthis2,
            &[acc, this, input0, input1],
            &[],
            Payload::None,
        )
    }

    pub fn create_callthis3(
        self,
        acc: InstId,
        this: InstId,
        input0: InstId,
        input1: InstId,
        input2: InstId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::Callthis3,
            &[acc, this, input0, input1, input2],
            &[],
            Payload::None,
        )
    }

    fn make_range(self, opcode: DynOpcode, head: &[InstId], args: &[InstId]) -> Result<InstId> {
        let mut inputs = Vec::with_capacity(head.len() + args.len());
        inputs.extend_from_slice(head);
        inputs.extend_from_slice(args);
        self.make(opcode, &inputs, &[], Payload::None)
    }

    /// Call with an arbitrary argument list.
    pub fn create_callrange(self, acc: InstId, args: &[InstId]) -> Result<InstId> {
        self.make_range(DynOpcode::Callrange, &[acc], args)
    }

    pub fn create_wide_callrange(self, acc: InstId, args: &[InstId]) -> Result<InstId> {
        self.make_range(DynOpcode::WideCallrange, &[acc], args)
    }

    pub fn create_callthisrange(self, acc: InstId, args: &[InstId]) -> Result<InstId> {
        self.make_range(DynOpcode::Callthisrange, &[acc], args)
    }

    pub fn create_wide_callthisrange(self, acc: InstId, args: &[InstId]) -> Result<InstId> {
        self.make_range(DynOpcode::WideCallthisrange, &[acc], args)
    }

    pub fn create_supercallthisrange(self, args: &[InstId]) -> Result<InstId> {
        self.make_range(DynOpcode::Supercallthisrange, &[], args)
    }

    pub fn create_wide_supercallthisrange(self, args: &[InstId]) -> Result<InstId> {
        self.make_range(DynOpcode::WideSupercallthisrange, &[], args)
    }

    pub fn create_supercallarrowrange(self, acc: InstId, args: &[InstId]) -> Result<InstId> {
        self.make_range(DynOpcode::Supercallarrowrange, &[acc], args)
    }

    pub fn create_wide_supercallarrowrange(self, acc: InstId, args: &[InstId]) -> Result<InstId> {
        self.make_range(DynOpcode::WideSupercallarrowrange, &[acc], args)
    }

    pub fn create_supercallspread(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Supercallspread, &[acc, input0], &[], Payload::None)
    }

    pub fn create_apply(self, acc: InstId, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(DynOpcode::Apply, &[acc, input0, input1], &[], Payload::None)
    }

    // ── Object and array creation ───────────────────────────────────

    pub fn create_createemptyobject(self) -> Result<InstId> {
        self.make(DynOpcode::Createemptyobject, &[], &[], Payload::None)
    }

    pub fn create_createemptyarray(self) -> Result<InstId> {
        self.make(DynOpcode::Createemptyarray, &[], &[], Payload::None)
    }

    pub fn create_createarraywithbuffer(self, buffer: LiteralArrayId) -> Result<InstId> {
        self.make(
            DynOpcode::Createarraywithbuffer,
            &[],
            &[],
            Payload::LiteralArray(buffer),
        )
    }

    pub fn create_createobjectwithbuffer(self, buffer: LiteralArrayId) -> Result<InstId> {
        self.make(
            DynOpcode::Createobjectwithbuffer,
            &[],
            &[],
            Payload::LiteralArray(buffer),
        )
    }

    pub fn create_createobjectwithexcludedkeys(
        self,
        input0: InstId,
        input1: InstId,
        count: u64,
        rest: &[InstId],
    ) -> Result<InstId> {
        let mut inputs = Vec::with_capacity(2 + rest.len());
        inputs.push(input0);
        inputs.push(input1);
        inputs.extend_from_slice(rest);
        self.make(
            DynOpcode::Createobjectwithexcludedkeys,
            &inputs,
            &[count],
            Payload::None,
        )
    }

    pub fn create_wide_createobjectwithexcludedkeys(
        self,
        input0: InstId,
        input1: InstId,
        count: u64,
        rest: &[InstId],
    ) -> Result<InstId> {
        let mut inputs = Vec::with_capacity(2 + rest.len());
        inputs.push(input0);
        inputs.push(input1);
        inputs.extend_from_slice(rest);
        self.make(
            DynOpcode::WideCreateobjectwithexcludedkeys,
            &inputs,
            &[count],
            Payload::None,
        )
    }

    pub fn create_newobjapply(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Newobjapply, &[acc, input0], &[], Payload::None)
    }

    pub fn create_newobjrange(self, args: &[InstId]) -> Result<InstId> {
        self.make_range(DynOpcode::Newobjrange, &[], args)
    }

    pub fn create_wide_newobjrange(self, args: &[InstId]) -> Result<InstId> {
        self.make_range(DynOpcode::WideNewobjrange, &[], args)
    }

    pub fn create_copydataproperties(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Copydataproperties, &[acc, input0], &[], Payload::None)
    }

    pub fn create_setobjectwithproto(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Setobjectwithproto, &[acc, input0], &[], Payload::None)
    }

    pub fn create_starrayspread(
        self,
        acc: InstId,
        input0: InstId,
        input1: InstId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::Starrayspread,
            &[acc, input0, input1],
            &[],
            Payload::None,
        )
    }

    // ── Iterators and generators ────────────────────────────────────

    pub fn create_getpropiterator(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Getpropiterator, &[acc], &[], Payload::None)
    }

    pub fn create_getiterator(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Getiterator, &[acc], &[], Payload::None)
    }

    pub fn create_getasynciterator(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Getasynciterator, &[acc], &[], Payload::None)
    }

    pub fn create_getnextpropname(self, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Getnextpropname, &[input0], &[], Payload::None)
    }

    pub fn create_creategeneratorobj(self, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Creategeneratorobj, &[input0], &[], Payload::None)
    }

    pub fn create_createasyncgeneratorobj(self, input0: InstId) -> Result<InstId> {
        self.make(
            DynOpcode::Createasyncgeneratorobj,
            &[input0],
            &[],
            Payload::None,
        )
    }

    pub fn create_createiterresultobj(self, input0: InstId, input1: InstId) -> Result<InstId> {
        self.make(
            DynOpcode::Createiterresultobj,
            &[input0, input1],
            &[],
            Payload::None,
        )
    }

    pub fn create_asyncgeneratorresolve(
        self,
        input0: InstId,
        input1: InstId,
        input2: InstId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::Asyncgeneratorresolve,
            &[input0, input1, input2],
            &[],
            Payload::None,
        )
    }

    pub fn create_asyncgeneratorreject(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(
            DynOpcode::Asyncgeneratorreject,
            &[acc, input0],
            &[],
            Payload::None,
        )
    }

    pub fn create_asyncfunctionresolve(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(
            DynOpcode::Asyncfunctionresolve,
            &[acc, input0],
            &[],
            Payload::None,
        )
    }

    pub fn create_asyncfunctionreject(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(
            DynOpcode::Asyncfunctionreject,
            &[acc, input0],
            &[],
            Payload::None,
        )
    }

    pub fn create_asyncfunctionawaituncaught(
        self,
        acc: InstId,
        input0: InstId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::Asyncfunctionawaituncaught,
            &[acc, input0],
            &[],
            Payload::None,
        )
    }

    pub fn create_resumegenerator(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Resumegenerator, &[acc], &[], Payload::None)
    }

    pub fn create_getresumemode(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Getresumemode, &[acc], &[], Payload::None)
    }

    pub fn create_gettemplateobject(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Gettemplateobject, &[acc], &[], Payload::None)
    }

    pub fn create_suspendgenerator(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(
            DynOpcode::Suspendgenerator,
            &[acc, input0],
            &[],
            Payload::None,
        )
    }

    pub fn create_setgeneratorstate(self, acc: InstId, state: u64) -> Result<InstId> {
        self.make(DynOpcode::Setgeneratorstate, &[acc], &[state], Payload::None)
    }

    // ── Property access ─────────────────────────────────────────────

    pub fn create_ldobjbyname(self, acc: InstId, name: &str) -> Result<InstId> {
        self.make_str(DynOpcode::Ldobjbyname, name, &[acc], &[])
    }

    pub fn create_stobjbyname(self, acc: InstId, name: &str, input0: InstId) -> Result<InstId> {
        self.make_str(DynOpcode::Stobjbyname, name, &[acc, input0], &[])
    }

    pub fn create_stownbyname(self, acc: InstId, name: &str, input0: InstId) -> Result<InstId> {
        self.make_str(DynOpcode::Stownbyname, name, &[acc, input0], &[])
    }

    pub fn create_stownbynamewithnameset(
        self,
        acc: InstId,
        name: &str,
        input0: InstId,
    ) -> Result<InstId> {
        self.make_str(DynOpcode::Stownbynamewithnameset, name, &[acc, input0], &[])
    }

    pub fn create_ldsuperbyname(self, acc: InstId, name: &str) -> Result<InstId> {
        self.make_str(DynOpcode::Ldsuperbyname, name, &[acc], &[])
    }

    pub fn create_stsuperbyname(self, acc: InstId, name: &str, input0: InstId) -> Result<InstId> {
        self.make_str(DynOpcode::Stsuperbyname, name, &[acc, input0], &[])
    }

    pub fn create_ldobjbyvalue(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Ldobjbyvalue, &[acc, input0], &[], Payload::None)
    }

    pub fn create_stobjbyvalue(
        self,
        acc: InstId,
        input0: InstId,
        input1: InstId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::Stobjbyvalue,
            &[acc, input0, input1],
            &[],
            Payload::None,
        )
    }

    pub fn create_stownbyvalue(
        self,
        acc: InstId,
        input0: InstId,
        input1: InstId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::Stownbyvalue,
            &[acc, input0, input1],
            &[],
            Payload::None,
        )
    }

    pub fn create_ldsuperbyvalue(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Ldsuperbyvalue, &[acc, input0], &[], Payload::None)
    }

    pub fn create_stsuperbyvalue(
        self,
        acc: InstId,
        input0: InstId,
        input1: InstId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::Stsuperbyvalue,
            &[acc, input0, input1],
            &[],
            Payload::None,
        )
    }

    pub fn create_ldobjbyindex(self, acc: InstId, index: u64) -> Result<InstId> {
        self.make(DynOpcode::Ldobjbyindex, &[acc], &[index], Payload::None)
    }

    pub fn create_wide_ldobjbyindex(self, acc: InstId, index: u64) -> Result<InstId> {
        self.make(DynOpcode::WideLdobjbyindex, &[acc], &[index], Payload::None)
    }

    pub fn create_stobjbyindex(self, acc: InstId, input0: InstId, index: u64) -> Result<InstId> {
        self.make(DynOpcode::Stobjbyindex, &[acc, input0], &[index], Payload::None)
    }

    pub fn create_wide_stobjbyindex(
        self,
        acc: InstId,
        input0: InstId,
        index: u64,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::WideStobjbyindex,
            &[acc, input0],
            &[index],
            Payload::None,
        )
    }

    pub fn create_stownbyindex(self, acc: InstId, input0: InstId, index: u64) -> Result<InstId> {
        self.make(DynOpcode::Stownbyindex, &[acc, input0], &[index], Payload::None)
    }

    pub fn create_wide_stownbyindex(
        self,
        acc: InstId,
        input0: InstId,
        index: u64,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::WideStownbyindex,
            &[acc, input0],
            &[index],
            Payload::None,
        )
    }

    pub fn create_ldprivateproperty(self, acc: InstId, level: u64, slot: u64) -> Result<InstId> {
        self.make(
            DynOpcode::Ldprivateproperty,
            &[acc],
            &[level, slot],
            Payload::None,
        )
    }

    pub fn create_stprivateproperty(
        self,
        acc: InstId,
        level: u64,
        slot: u64,
        input0: InstId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::Stprivateproperty,
            &[acc, input0],
            &[level, slot],
            Payload::None,
        )
    }

    pub fn create_testin(self, acc: InstId, level: u64, slot: u64) -> Result<InstId> {
        self.make(DynOpcode::Testin, &[acc], &[level, slot], Payload::None)
    }

    pub fn create_definefieldbyname(
        self,
        acc: InstId,
        name: &str,
        input0: InstId,
    ) -> Result<InstId> {
        self.make_str(DynOpcode::Definefieldbyname, name, &[acc, input0], &[])
    }

    pub fn create_definepropertybyname(
        self,
        acc: InstId,
        name: &str,
        input0: InstId,
    ) -> Result<InstId> {
        self.make_str(DynOpcode::Definepropertybyname, name, &[acc, input0], &[])
    }

    pub fn create_delobjprop(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Delobjprop, &[acc, input0], &[], Payload::None)
    }

    // ── Globals ─────────────────────────────────────────────────────

    pub fn create_tryldglobalbyname(self, name: &str) -> Result<InstId> {
        self.make_str(DynOpcode::Tryldglobalbyname, name, &[], &[])
    }

    pub fn create_trystglobalbyname(self, acc: InstId, name: &str) -> Result<InstId> {
        self.make_str(DynOpcode::Trystglobalbyname, name, &[acc], &[])
    }

    pub fn create_ldglobalvar(self, name: &str) -> Result<InstId> {
        self.make_str(DynOpcode::Ldglobalvar, name, &[], &[])
    }

    pub fn create_stglobalvar(self, acc: InstId, name: &str) -> Result<InstId> {
        self.make_str(DynOpcode::Stglobalvar, name, &[acc], &[])
    }

    pub fn create_sttoglobalrecord(self, acc: InstId, name: &str) -> Result<InstId> {
        self.make_str(DynOpcode::Sttoglobalrecord, name, &[acc], &[])
    }

    pub fn create_stconsttoglobalrecord(self, acc: InstId, name: &str) -> Result<InstId> {
        self.make_str(DynOpcode::Stconsttoglobalrecord, name, &[acc], &[])
    }

    pub fn create_ldthisbyname(self, name: &str) -> Result<InstId> {
        self.make_str(DynOpcode::Ldthisbyname, name, &[], &[])
    }

    pub fn create_stthisbyname(self, acc: InstId, name: &str) -> Result<InstId> {
        self.make_str(DynOpcode::Stthisbyname, name, &[acc], &[])
    }

    pub fn create_ldthisbyvalue(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Ldthisbyvalue, &[acc], &[], Payload::None)
    }

    pub fn create_stthisbyvalue(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(DynOpcode::Stthisbyvalue, &[acc, input0], &[], Payload::None)
    }

    // ── Modules ─────────────────────────────────────────────────────

    pub fn create_getmodulenamespace(self, module: ModuleId) -> Result<InstId> {
        self.make(
            DynOpcode::Getmodulenamespace,
            &[],
            &[],
            Payload::Module(module),
        )
    }

    pub fn create_wide_getmodulenamespace(self, module: ModuleId) -> Result<InstId> {
        self.make(
            DynOpcode::WideGetmodulenamespace,
            &[],
            &[],
            Payload::Module(module),
        )
    }

    pub fn create_ldexternalmodulevar(self, import: ImportId) -> Result<InstId> {
        self.make(
            DynOpcode::Ldexternalmodulevar,
            &[],
            &[],
            Payload::Import(import),
        )
    }

    pub fn create_wide_ldexternalmodulevar(self, import: ImportId) -> Result<InstId> {
        self.make(
            DynOpcode::WideLdexternalmodulevar,
            &[],
            &[],
            Payload::Import(import),
        )
    }

    pub fn create_ldlocalmodulevar(self, export: ExportId) -> Result<InstId> {
        self.make(
            DynOpcode::Ldlocalmodulevar,
            &[],
            &[],
            Payload::Export(export),
        )
    }

    pub fn create_wide_ldlocalmodulevar(self, export: ExportId) -> Result<InstId> {
        self.make(
            DynOpcode::WideLdlocalmodulevar,
            &[],
            &[],
            Payload::Export(export),
        )
    }

    pub fn create_stmodulevar(self, acc: InstId, export: ExportId) -> Result<InstId> {
        self.make(DynOpcode::Stmodulevar, &[acc], &[], Payload::Export(export))
    }

    pub fn create_wide_stmodulevar(self, acc: InstId, export: ExportId) -> Result<InstId> {
        self.make(
            DynOpcode::WideStmodulevar,
            &[acc],
            &[],
            Payload::Export(export),
        )
    }

    pub fn create_dynamicimport(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::Dynamicimport, &[acc], &[], Payload::None)
    }

    // ── Function definition ─────────────────────────────────────────

    pub fn create_definefunc(self, function: FunctionId, argc: u64) -> Result<InstId> {
        self.make(
            DynOpcode::Definefunc,
            &[],
            &[argc],
            Payload::Function(function),
        )
    }

    pub fn create_definemethod(
        self,
        acc: InstId,
        function: FunctionId,
        argc: u64,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::Definemethod,
            &[acc],
            &[argc],
            Payload::Function(function),
        )
    }

    pub fn create_defineclasswithbuffer(
        self,
        function: FunctionId,
        buffer: LiteralArrayId,
        argc: u64,
        input0: InstId,
    ) -> Result<InstId> {
        // Single-payload records: the class constructor wins the payload
        // slot, the literal buffer rides as an immediate-encoded id.
        self.make(
            DynOpcode::Defineclasswithbuffer,
            &[input0],
            &[argc, u64::from(buffer.raw())],
            Payload::Function(function),
        )
    }

    // ── Runtime intrinsics ──────────────────────────────────────────

    pub fn create_callruntime_notifyconcurrentresult(self, acc: InstId) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeNotifyconcurrentresult,
            &[acc],
            &[],
            Payload::None,
        )
    }

    pub fn create_callruntime_istrue(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::CallruntimeIstrue, &[acc], &[], Payload::None)
    }

    pub fn create_callruntime_isfalse(self, acc: InstId) -> Result<InstId> {
        self.make(DynOpcode::CallruntimeIsfalse, &[acc], &[], Payload::None)
    }

    pub fn create_callruntime_topropertykey(self, acc: InstId) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeTopropertykey,
            &[acc],
            &[],
            Payload::None,
        )
    }

    pub fn create_callruntime_callinit(self, acc: InstId, input0: InstId) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeCallinit,
            &[acc, input0],
            &[],
            Payload::None,
        )
    }

    pub fn create_callruntime_definefieldbyvalue(
        self,
        acc: InstId,
        input0: InstId,
        input1: InstId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeDefinefieldbyvalue,
            &[acc, input0, input1],
            &[],
            Payload::None,
        )
    }

    pub fn create_callruntime_definefieldbyindex(
        self,
        acc: InstId,
        index: u64,
        input0: InstId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeDefinefieldbyindex,
            &[acc, input0],
            &[index],
            Payload::None,
        )
    }

    pub fn create_callruntime_createprivateproperty(
        self,
        count: u64,
        buffer: LiteralArrayId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeCreateprivateproperty,
            &[],
            &[count],
            Payload::LiteralArray(buffer),
        )
    }

    pub fn create_callruntime_defineprivateproperty(
        self,
        acc: InstId,
        level: u64,
        slot: u64,
        input0: InstId,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeDefineprivateproperty,
            &[acc, input0],
            &[level, slot],
            Payload::None,
        )
    }

    pub fn create_callruntime_ldsendableclass(self, level: u64) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeLdsendableclass,
            &[],
            &[level],
            Payload::None,
        )
    }

    pub fn create_callruntime_newsendableenv(self, slots: u64) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeNewsendableenv,
            &[],
            &[slots],
            Payload::None,
        )
    }

    pub fn create_callruntime_widenewsendableenv(self, slots: u64) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeWidenewsendableenv,
            &[],
            &[slots],
            Payload::None,
        )
    }

    pub fn create_callruntime_stsendablevar(
        self,
        acc: InstId,
        level: u64,
        slot: u64,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeStsendablevar,
            &[acc],
            &[level, slot],
            Payload::None,
        )
    }

    pub fn create_callruntime_widestsendablevar(
        self,
        acc: InstId,
        level: u64,
        slot: u64,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeWidestsendablevar,
            &[acc],
            &[level, slot],
            Payload::None,
        )
    }

    pub fn create_callruntime_ldsendablevar(self, level: u64, slot: u64) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeLdsendablevar,
            &[],
            &[level, slot],
            Payload::None,
        )
    }

    pub fn create_callruntime_wideldsendablevar(self, level: u64, slot: u64) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeWideldsendablevar,
            &[],
            &[level, slot],
            Payload::None,
        )
    }

    pub fn create_callruntime_ldsendableexternalmodulevar(self, index: u64) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeLdsendableexternalmodulevar,
            &[],
            &[index],
            Payload::None,
        )
    }

    pub fn create_callruntime_wideldsendableexternalmodulevar(
        self,
        index: u64,
    ) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeWideldsendableexternalmodulevar,
            &[],
            &[index],
            Payload::None,
        )
    }

    pub fn create_callruntime_supercallforwardallargs(self, input0: InstId) -> Result<InstId> {
        self.make(
            DynOpcode::CallruntimeSupercallforwardallargs,
            &[input0],
            &[],
            Payload::None,
        )
    }
}

#[cfg(test)]
mod tests;
