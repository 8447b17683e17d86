use pretty_assertions::assert_eq;

use arkedit_core::Status;

use crate::graph::Graph;
use crate::opcode::{ConditionCode, DynOpcode, IsaKind, Opcode};
use crate::test_helpers::ok;

#[test]
fn created_instructions_start_unattached() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let inst = ok(graph.dyn_isa().create_ldundefined());
    assert_eq!(ok(graph.inst_block(inst)), None);
    assert_eq!(ok(graph.opcode(inst)), Opcode::Dynamic(DynOpcode::Ldundefined));
}

#[test]
fn load_string_interns_into_the_graph_table() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let first = ok(graph.dyn_isa().create_load_string("print"));
    let second = ok(graph.dyn_isa().create_load_string("print"));

    // Two distinct instructions sharing one interned operand.
    assert_ne!(first, second);
    assert_eq!(ok(graph.inst_string(first)), ok(graph.inst_string(second)));
    let id = ok(graph.inst_string(first));
    assert_eq!(graph.strings().get(id).as_deref(), Some("print"));
}

#[test]
fn binary_factories_wire_def_use_edges() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let lhs = graph.find_or_create_constant_i32(1);
    let rhs = graph.find_or_create_constant_i32(2);
    let sum = ok(graph.dyn_isa().create_add2(lhs, rhs));

    assert_eq!(ok(graph.inputs(sum)), vec![lhs, rhs]);
    assert_eq!(ok(graph.users(lhs)), vec![sum]);
    assert_eq!(ok(graph.users(rhs)), vec![sum]);
}

#[test]
fn dynamic_factory_on_static_graph_is_wrong_isa() {
    let mut graph = Graph::new(IsaKind::Static);
    let err = match graph.dyn_isa().create_ldtrue() {
        Ok(_) => panic!("creation should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::WrongIsa);
}

#[test]
fn factory_rejects_stale_operand() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let stale = {
        let mut scratch = Graph::new(IsaKind::Dynamic);
        ok(scratch.dyn_isa().create_ldtrue())
    };
    // `stale` may alias nothing in this graph's arena.
    let err = match graph.dyn_isa().create_neg(stale) {
        Ok(_) => panic!("creation should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::BadArgument);
}

#[test]
fn callrange_accepts_arbitrary_arity() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let callee = ok(graph.dyn_isa().create_ldfunction());
    let args: Vec<_> = (0..5)
        .map(|value| graph.find_or_create_constant_i32(value))
        .collect();
    let call = ok(graph.dyn_isa().create_callrange(callee, &args));
    assert_eq!(ok(graph.input_count(call)), 6);
    assert_eq!(ok(graph.input(call, 0)), callee);
    assert_eq!(ok(graph.input(call, 5)), args[4]);
}

#[test]
fn immediates_are_recorded_and_editable() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let inst = ok(graph.dyn_isa().create_ldlexvar(2, 7));
    assert_eq!(ok(graph.immediate_count(inst)), 2);
    assert_eq!(ok(graph.immediate(inst, 0)), 2);
    assert_eq!(ok(graph.immediate(inst, 1)), 7);

    ok(graph.set_immediate(inst, 1, 9));
    assert_eq!(ok(graph.immediate(inst, 1)), 9);

    let err = match graph.immediate(inst, 4) {
        Ok(_) => panic!("immediate(4) should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::OutOfRange);
}

// ── If and condition codes ──────────────────────────────────────────

#[test]
fn dynamic_if_carries_its_condition_code() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let one = graph.find_or_create_constant_i32(1);
    let cond = ok(graph.dyn_isa().create_istrue(one));
    let branch = ok(graph.dyn_isa().create_if(cond, ConditionCode::Ne));
    assert_eq!(ok(graph.dyn_isa().get_condition_code(branch)), ConditionCode::Ne);

    ok(graph.dyn_isa().set_condition_code(branch, ConditionCode::Eq));
    assert_eq!(ok(graph.dyn_isa().get_condition_code(branch)), ConditionCode::Eq);
}

#[test]
fn dynamic_if_rejects_ordered_condition_codes() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let cond = ok(graph.dyn_isa().create_ldtrue());
    let err = match graph.dyn_isa().create_if(cond, ConditionCode::Lt) {
        Ok(_) => panic!("creation should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::BadArgument);
}

#[test]
fn condition_code_on_non_if_is_unsupported() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let inst = ok(graph.dyn_isa().create_ldtrue());
    let err = match graph.dyn_isa().get_condition_code(inst) {
        Ok(_) => panic!("query should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::UnsupportedOperation);
}

// ── Opcode introspection ────────────────────────────────────────────

#[test]
fn get_opcode_returns_dialect_opcode() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let inst = ok(graph.dyn_isa().create_createemptyarray());
    assert_eq!(ok(graph.dyn_isa().get_opcode(inst)), DynOpcode::Createemptyarray);
}

// ── Module / import / export operands ───────────────────────────────

#[test]
fn module_operand_round_trips() {
    use arkedit_core::ModuleId;

    let mut graph = Graph::new(IsaKind::Dynamic);
    let inst = ok(graph.dyn_isa().create_getmodulenamespace(ModuleId::new(0)));
    assert_eq!(ok(graph.dyn_isa().get_module(inst)), ModuleId::new(0));

    ok(graph.dyn_isa().set_module(inst, ModuleId::new(3)));
    assert_eq!(ok(graph.dyn_isa().get_module(inst)), ModuleId::new(3));
}

#[test]
fn module_operand_on_wrong_opcode_is_bad_argument() {
    use arkedit_core::ModuleId;

    let mut graph = Graph::new(IsaKind::Dynamic);
    let inst = ok(graph.dyn_isa().create_ldtrue());
    let err = match graph.dyn_isa().set_module(inst, ModuleId::new(0)) {
        Ok(()) => panic!("set should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::BadArgument);
}

#[test]
fn import_and_export_operands_round_trip() {
    use arkedit_core::{ExportId, ImportId};

    let mut graph = Graph::new(IsaKind::Dynamic);
    let load = ok(graph.dyn_isa().create_ldexternalmodulevar(ImportId::new(1)));
    assert_eq!(ok(graph.dyn_isa().get_import_descriptor(load)), ImportId::new(1));
    ok(graph.dyn_isa().set_import_descriptor(load, ImportId::new(2)));
    assert_eq!(ok(graph.dyn_isa().get_import_descriptor(load)), ImportId::new(2));

    let acc = ok(graph.dyn_isa().create_ldtrue());
    let store = ok(graph.dyn_isa().create_stmodulevar(acc, ExportId::new(0)));
    assert_eq!(ok(graph.dyn_isa().get_export_descriptor(store)), ExportId::new(0));
}
