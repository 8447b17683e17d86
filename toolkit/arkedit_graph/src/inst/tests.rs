use pretty_assertions::assert_eq;

use arkedit_core::Status;

use crate::graph::Graph;
use crate::opcode::IsaKind;
use crate::test_helpers::ok;

#[test]
fn set_input_rewires_user_lists() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let old = graph.find_or_create_constant_i32(1);
    let new = graph.find_or_create_constant_i32(2);
    let user = ok(graph.dyn_isa().create_neg(old));

    assert_eq!(ok(graph.users(old)), vec![user]);
    ok(graph.set_input(user, 0, new));

    assert_eq!(ok(graph.input(user, 0)), new);
    assert!(ok(graph.users(old)).is_empty());
    assert_eq!(ok(graph.users(new)), vec![user]);
}

#[test]
fn set_input_out_of_range() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let value = graph.find_or_create_constant_i32(1);
    let inst = ok(graph.dyn_isa().create_neg(value));
    let err = match graph.set_input(inst, 3, value) {
        Ok(()) => panic!("set_input(3) should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::OutOfRange);
}

#[test]
fn set_inputs_replaces_the_whole_operand_list() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let a = graph.find_or_create_constant_i32(1);
    let b = graph.find_or_create_constant_i32(2);
    let c = graph.find_or_create_constant_i32(3);
    let inst = ok(graph.dyn_isa().create_add2(a, b));

    ok(graph.set_inputs(inst, &[c]));
    assert_eq!(ok(graph.inputs(inst)), vec![c]);
    assert!(ok(graph.users(a)).is_empty());
    assert!(ok(graph.users(b)).is_empty());
    assert_eq!(ok(graph.users(c)), vec![inst]);
}

#[test]
fn append_input_adds_a_use() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let a = graph.find_or_create_constant_i32(1);
    let phi = ok(graph.create_phi(graph.start_block(), &[]));
    ok(graph.append_input(phi, a));
    ok(graph.append_input(phi, a));

    // One user entry per use.
    assert_eq!(ok(graph.inputs(phi)), vec![a, a]);
    assert_eq!(ok(graph.user_count(a)), 2);
}

#[test]
fn visit_users_short_circuits() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let shared = graph.find_or_create_constant_i32(1);
    for _ in 0..4 {
        let _ = ok(graph.dyn_isa().create_neg(shared));
    }

    let mut visited = 0;
    let completed = ok(graph.visit_users(shared, |_| {
        visited += 1;
        false
    }));
    assert!(!completed);
    assert_eq!(visited, 1);
}

#[test]
fn remove_inst_refuses_while_used() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let value = graph.find_or_create_constant_i32(1);
    let user = ok(graph.dyn_isa().create_neg(value));

    let err = match graph.remove_inst(value) {
        Ok(()) => panic!("removal should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::InconsistentState);

    // Dropping the use unblocks removal.
    let replacement = graph.find_or_create_constant_i32(2);
    ok(graph.set_input(user, 0, replacement));
    ok(graph.remove_inst(value));
    assert!(graph.opcode(value).is_err());

    // Interning the same value again yields a fresh, live constant.
    let fresh = graph.find_or_create_constant_i32(1);
    assert_ne!(fresh, value);
    assert_eq!(ok(graph.constant_i32(fresh)), 1);
}

#[test]
fn remove_inst_unlinks_from_its_block() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let bb = graph.create_empty_block();
    let a = ok(graph.dyn_isa().create_ldtrue());
    let b = ok(graph.dyn_isa().create_ldfalse());
    let c = ok(graph.dyn_isa().create_ldnull());
    ok(graph.add_inst_back(bb, a));
    ok(graph.add_inst_back(bb, b));
    ok(graph.add_inst_back(bb, c));

    ok(graph.remove_inst(b));
    assert_eq!(ok(graph.instructions(bb)), vec![a, c]);
    assert_eq!(ok(graph.next_inst(a)), Some(c));
    assert_eq!(ok(graph.prev_inst(c)), Some(a));
}

#[test]
fn constant_payload_accessors_enforce_kind() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let int = graph.find_or_create_constant_i32(5);
    assert_eq!(ok(graph.constant_i32(int)), 5);
    let err = match graph.constant_f64(int) {
        Ok(_) => panic!("accessor should fail"),
        Err(e) => e,
    };
    assert_eq!(err.status(), Status::UnsupportedOperation);
}

#[test]
fn string_payload_accessor() {
    let mut graph = Graph::new(IsaKind::Dynamic);
    let inst = ok(graph.dyn_isa().create_load_string("text"));
    let id = ok(graph.inst_string(inst));
    assert_eq!(graph.strings().get(id).as_deref(), Some("text"));

    let plain = ok(graph.dyn_isa().create_ldtrue());
    assert!(graph.inst_string(plain).is_err());
}
