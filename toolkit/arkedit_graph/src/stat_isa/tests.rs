use pretty_assertions::assert_eq;

use arkedit_core::{FunctionId, Status};

use crate::graph::Graph;
use crate::opcode::{ConditionCode, IsaKind, Opcode, StatOpcode};
use crate::test_helpers::ok;

#[test]
fn arithmetic_factories_build_expected_opcodes() {
    let mut graph = Graph::new(IsaKind::Static);
    let lhs = graph.find_or_create_constant_i64(4);
    let rhs = graph.find_or_create_constant_i64(2);

    let sum = ok(graph.stat_isa().create_add(lhs, rhs));
    assert_eq!(ok(graph.opcode(sum)), Opcode::Static(StatOpcode::Add));
    assert_eq!(ok(graph.inputs(sum)), vec![lhs, rhs]);

    let shifted = ok(graph.stat_isa().create_shl_i(sum, 3));
    assert_eq!(ok(graph.opcode(shifted)), Opcode::Static(StatOpcode::ShlI));
    assert_eq!(ok(graph.immediate(shifted, 0)), 3);
}

#[test]
fn static_factory_on_dynamic_graph_is_wrong_isa() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let err = match graph.stat_isa().create_return_void() {
        Ok(_) => panic!("creation should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::WrongIsa);
}

#[test]
fn static_if_accepts_full_condition_code_set() {
    let mut graph = Graph::new(IsaKind::Static);
    let lhs = graph.find_or_create_constant_i64(1);
    let rhs = graph.find_or_create_constant_i64(2);
    let branch = ok(graph.stat_isa().create_if(lhs, rhs, ConditionCode::Lt));
    assert_eq!(
        ok(graph.stat_isa().get_condition_code(branch)),
        ConditionCode::Lt
    );

    ok(graph.stat_isa().set_condition_code(branch, ConditionCode::Ae));
    assert_eq!(
        ok(graph.stat_isa().get_condition_code(branch)),
        ConditionCode::Ae
    );
}

#[test]
fn static_if_rejects_none() {
    let mut graph = Graph::new(IsaKind::Static);
    let lhs = graph.find_or_create_constant_i64(1);
    let rhs = graph.find_or_create_constant_i64(2);
    let err = match graph.stat_isa().create_if(lhs, rhs, ConditionCode::None) {
        Ok(_) => panic!("creation should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::BadArgument);
}

#[test]
fn call_static_carries_callee_and_args() {
    let mut graph = Graph::new(IsaKind::Static);
    let arg = graph.find_or_create_constant_i64(5);
    let call = ok(graph.stat_isa().create_call_static(FunctionId::new(3), &[arg]));
    assert_eq!(ok(graph.inst_function(call)), FunctionId::new(3));
    assert_eq!(ok(graph.inputs(call)), vec![arg]);
}

#[test]
fn call_virtual_prepends_receiver() {
    let mut graph = Graph::new(IsaKind::Static);
    let receiver = ok(graph.stat_isa().create_null_ptr());
    let arg = graph.find_or_create_constant_i64(5);
    let call = ok(graph
        .stat_isa()
        .create_call_virtual(receiver, FunctionId::new(1), &[arg]));
    assert_eq!(ok(graph.input(call, 0)), receiver);
    assert_eq!(ok(graph.input(call, 1)), arg);
}

#[test]
fn load_string_interns_like_the_dynamic_builder() {
    let mut graph = Graph::new(IsaKind::Static);
    let inst = ok(graph.stat_isa().create_load_string("greeting"));
    let id = ok(graph.inst_string(inst));
    assert_eq!(graph.strings().get(id).as_deref(), Some("greeting"));
}

#[test]
fn get_opcode_returns_static_opcode() {
    let mut graph = Graph::new(IsaKind::Static);
    let inst = ok(graph.stat_isa().create_load_undefined());
    assert_eq!(ok(graph.stat_isa().get_opcode(inst)), StatOpcode::LoadUndefined);
}
